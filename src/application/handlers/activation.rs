//! Activation payloads and the handler contract.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::foundation::{DomainError, MessageId, UserId};

/// A submitted form: its id (carrying addressing data), the submitting
/// user, and the raw input values keyed by input id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    pub form_id: String,
    pub actor: UserId,
    pub values: HashMap<String, String>,
}

impl FormSubmission {
    /// Returns a submitted value, or the empty string if absent.
    pub fn value(&self, input_id: &str) -> &str {
        self.values.get(input_id).map(String::as_str).unwrap_or("")
    }
}

/// One control activation, delivered by the host platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Activation {
    /// A button press on a rendered message (or an ephemeral prompt).
    Button {
        token: String,
        message: MessageId,
        actor: UserId,
    },
    /// A form submission.
    Form(FormSubmission),
}

/// Terminal state of one activation.
///
/// `Applied` means a message was written (edit or publish); everything
/// else - unknown token, decode failure, business-rule rejection, a form
/// or prompt being opened - is `NoOp`, and the session message is
/// guaranteed untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    NoOp,
}

/// One entry of the dispatch table.
///
/// `claims` is a cheap, side-effect-free check whether the activation
/// belongs to this handler; `run` performs the full cycle. A handler must
/// resolve anything it claims - returning `NoOp` is always acceptable,
/// failing to terminate is not.
#[async_trait]
pub trait ActivationHandler: Send + Sync {
    /// Name for log correlation.
    fn name(&self) -> &'static str;

    /// Whether this activation belongs to this handler.
    fn claims(&self, activation: &Activation) -> bool;

    /// Executes the activation.
    ///
    /// # Errors
    ///
    /// Only unrecoverable collaborator failures (a `Responder` that
    /// cannot deliver the failure notice) escape as errors; expected
    /// rejections resolve to `Ok(Outcome::NoOp)`.
    async fn run(&self, activation: &Activation) -> Result<Outcome, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_form_value_reads_as_empty() {
        let submission = FormSubmission {
            form_id: "recruit-form:owner-1".into(),
            actor: UserId::new("owner-1").unwrap(),
            values: HashMap::new(),
        };
        assert_eq!(submission.value("title"), "");
    }

    #[test]
    fn activation_handler_is_object_safe() {
        fn _accepts_dyn(_handler: &dyn ActivationHandler) {}
    }
}
