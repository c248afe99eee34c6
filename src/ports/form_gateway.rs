//! Form gateway port.
//!
//! Opens a pre-filled form in front of the acting user. The form's UI
//! and runtime belong to the host platform; this subsystem only supplies
//! the request and later validates the submitted values.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::recruitment::forms::FormRequest;

/// Port for presenting forms to users.
#[async_trait]
pub trait FormGateway: Send + Sync {
    /// Opens a form for the actor.
    ///
    /// # Errors
    ///
    /// - `StoreError` if the platform refuses to show the form
    async fn open(&self, actor: &UserId, form: FormRequest) -> Result<(), DomainError>;
}
