//! Application handlers - the session coordinators.
//!
//! Each handler turns one control activation into a
//! decode → fetch → decode → apply → encode → write cycle. Handlers are
//! registered in an [`ActivationRouter`] built once at startup; there is
//! no runtime reflection and no ambient registry.

mod activation;
mod party_button;
mod party_form;
mod recruit_button;
mod recruit_form;
mod recruit_notify;
mod router;

pub use activation::{Activation, ActivationHandler, FormSubmission, Outcome};
pub use party_button::PartyButtonHandler;
pub use party_form::PartyFormHandler;
pub use recruit_button::RecruitButtonHandler;
pub use recruit_form::RecruitFormHandler;
pub use recruit_notify::RecruitNotifyHandler;
pub use router::ActivationRouter;

use crate::domain::foundation::{DomainError, UserId};
use crate::ports::Responder;

/// Notice sent to the actor when a collaborator call fails (tier 3).
pub(crate) const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

/// Reports a collaborator failure to the actor and resolves the
/// activation as a no-op. Store failures are never retried.
pub(crate) async fn report_failure(
    responder: &dyn Responder,
    actor: &UserId,
    err: DomainError,
) -> Result<Outcome, DomainError> {
    tracing::warn!(error = %err, actor = %actor, "collaborator failure during activation");
    responder.notify(actor, GENERIC_FAILURE).await?;
    Ok(Outcome::NoOp)
}
