//! Activation dispatch.
//!
//! The router is the explicit replacement for framework-level handler
//! registration: a table of handlers built once at startup, consulted on
//! every activation. The first handler that claims an activation runs
//! it; an unclaimed activation is inert.
//!
//! # Concurrency
//!
//! Dispatch is cooperative and lock-free. Two activations against the
//! same session can interleave between their fetch and their write, and
//! the later write silently overwrites the earlier one (a lost update).
//! This is accepted: there is no lock, no version token, and no retry.
//! A retry without a conflict check would only re-read state that
//! already reflects the lost update.

use std::sync::Arc;

use crate::application::handlers::{Activation, ActivationHandler, Outcome};
use crate::domain::foundation::DomainError;

/// Dispatch table over activation handlers.
pub struct ActivationRouter {
    handlers: Vec<Arc<dyn ActivationHandler>>,
}

impl ActivationRouter {
    /// Builds the table. Call once at startup.
    pub fn new(handlers: Vec<Arc<dyn ActivationHandler>>) -> Self {
        Self { handlers }
    }

    /// Routes one activation to the handler that claims it.
    ///
    /// # Errors
    ///
    /// Propagates only unrecoverable collaborator failures from the
    /// claiming handler.
    pub async fn dispatch(&self, activation: &Activation) -> Result<Outcome, DomainError> {
        for handler in &self.handlers {
            if handler.claims(activation) {
                tracing::debug!(handler = handler.name(), "activation claimed");
                return handler.run(activation).await;
            }
        }
        tracing::debug!("activation unclaimed, ignoring");
        Ok(Outcome::NoOp)
    }
}
