//! Interaction handling configuration

use serde::Deserialize;
use std::time::Duration;

use crate::config::error::ValidationError;

const MAX_RESPONSE_DEADLINE_MS: u64 = 30_000;

/// Tuning for activation handling.
#[derive(Debug, Clone, Deserialize)]
pub struct InteractionConfig {
    /// Budget for resolving one activation before the platform gives up
    /// on the acknowledgement, in milliseconds
    #[serde(default = "default_response_deadline_ms")]
    pub response_deadline_ms: u64,
}

fn default_response_deadline_ms() -> u64 {
    2_500
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            response_deadline_ms: default_response_deadline_ms(),
        }
    }
}

impl InteractionConfig {
    /// Validate interaction configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.response_deadline_ms == 0 || self.response_deadline_ms > MAX_RESPONSE_DEADLINE_MS {
            return Err(ValidationError::InvalidResponseDeadline);
        }
        Ok(())
    }

    /// The deadline as a `Duration`.
    pub fn response_deadline(&self) -> Duration {
        Duration::from_millis(self.response_deadline_ms)
    }
}
