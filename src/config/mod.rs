//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `RECRUIT_BOARD_` prefix and nested values use double underscores as
//! separators. Every section has defaults, so an empty environment is a
//! valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use recruit_board::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod appearance;
mod error;
mod interaction;

pub use appearance::AppearanceConfig;
pub use error::{ConfigError, ValidationError};
pub use interaction::InteractionConfig;

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Banner images per session status
    #[serde(default)]
    pub appearance: AppearanceConfig,

    /// Activation handling tuning
    #[serde(default)]
    pub interaction: InteractionConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `RECRUIT_BOARD` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `RECRUIT_BOARD__APPEARANCE__OPEN_IMAGE=https://...`
    /// - `RECRUIT_BOARD__INTERACTION__RESPONSE_DEADLINE_MS=2000`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("RECRUIT_BOARD")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.appearance.validate()?;
        self.interaction.validate()?;
        Ok(())
    }
}
