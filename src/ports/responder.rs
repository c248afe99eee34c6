//! Responder port.
//!
//! Delivers ephemeral text to the acting user: validation errors from
//! form submissions, the notify confirmation prompt, and generic
//! collaborator-failure notices. Nothing sent through this port touches
//! the session message.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::recruitment::ControlSpec;

/// Port for ephemeral replies to the acting user.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Sends a plain text notice visible only to the actor.
    ///
    /// # Errors
    ///
    /// - `StoreError` on transport failure
    async fn notify(&self, actor: &UserId, text: &str) -> Result<(), DomainError>;

    /// Sends a notice carrying pressable controls (the notify prompt).
    ///
    /// # Errors
    ///
    /// - `StoreError` on transport failure
    async fn prompt(
        &self,
        actor: &UserId,
        text: &str,
        controls: Vec<Vec<ControlSpec>>,
    ) -> Result<(), DomainError>;
}
