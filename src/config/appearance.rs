//! Appearance configuration (status banner images)

use serde::Deserialize;

use crate::config::error::ValidationError;
use crate::domain::recruitment::Appearance;

/// Banner images shown on rendered session messages, one per status.
#[derive(Debug, Clone, Deserialize)]
pub struct AppearanceConfig {
    /// Image shown while the session accepts participants
    #[serde(default = "default_open_image")]
    pub open_image: String,

    /// Image shown once the session is closed
    #[serde(default = "default_closed_image")]
    pub closed_image: String,
}

fn default_open_image() -> String {
    Appearance::default().open_image
}

fn default_closed_image() -> String {
    Appearance::default().closed_image
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            open_image: default_open_image(),
            closed_image: default_closed_image(),
        }
    }
}

impl AppearanceConfig {
    /// Validate appearance configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        for url in [&self.open_image, &self.closed_image] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidImageUrl(url.clone()));
            }
        }
        Ok(())
    }

    /// The domain-level appearance handed to the codecs.
    pub fn appearance(&self) -> Appearance {
        Appearance {
            open_image: self.open_image.clone(),
            closed_image: self.closed_image.clone(),
        }
    }
}
