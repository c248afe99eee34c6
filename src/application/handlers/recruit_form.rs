//! Coordinator for single-pool create and edit forms.
//!
//! Creation publishes a brand-new session message; editing splices the
//! submitted title, body, and slot count onto whatever the roster and
//! status are at submission time, so members who joined while the form
//! was open are never dropped.
//!
//! Validation failures are the one place a rejection speaks: the actor
//! gets the validation message verbatim, and nothing is written.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::handlers::{
    report_failure, Activation, ActivationHandler, FormSubmission, Outcome,
};
use crate::domain::foundation::{DomainError, MessageId, UserId};
use crate::domain::recruitment::forms::{
    parse_recruit_form_id, recruit_create_form, FormTarget, RecruitInput, INPUT_BODY, INPUT_SLOTS,
    INPUT_TITLE,
};
use crate::domain::recruitment::{
    decode_recruitment, encode_recruitment, Appearance, Recruitment,
};
use crate::ports::{FormGateway, MessageStore, Responder};

const STALE_EDIT_NOTICE: &str =
    "This recruitment could not be read back, so your changes were not applied.";
const UPDATED_NOTICE: &str = "Recruitment updated.";

pub struct RecruitFormHandler {
    store: Arc<dyn MessageStore>,
    forms: Arc<dyn FormGateway>,
    responder: Arc<dyn Responder>,
    appearance: Appearance,
}

impl RecruitFormHandler {
    pub fn new(
        store: Arc<dyn MessageStore>,
        forms: Arc<dyn FormGateway>,
        responder: Arc<dyn Responder>,
        appearance: Appearance,
    ) -> Self {
        Self {
            store,
            forms,
            responder,
            appearance,
        }
    }

    /// Entry point for the host command that starts a new recruitment:
    /// opens the blank creation form for the actor.
    ///
    /// # Errors
    ///
    /// Propagates the form collaborator's failure.
    pub async fn open_create_form(&self, actor: &UserId) -> Result<(), DomainError> {
        self.forms.open(actor, recruit_create_form(actor)).await
    }

    /// Publishes a new session from already-validated input. This is the
    /// path for host commands that carry their arguments inline instead
    /// of going through the create form.
    ///
    /// # Errors
    ///
    /// Propagates the store's publish failure.
    pub async fn create_session(
        &self,
        owner: &UserId,
        input: RecruitInput,
    ) -> Result<MessageId, DomainError> {
        let state = Recruitment::open(owner.clone(), input.title, input.body, input.slots);
        let payload = encode_recruitment(&state, &self.appearance);
        let message = self.store.publish(payload).await?;
        tracing::info!(message = %message, owner = %owner, "recruitment opened");
        Ok(message)
    }

    async fn create(
        &self,
        owner: &UserId,
        submission: &FormSubmission,
    ) -> Result<Outcome, DomainError> {
        let input = match RecruitInput::parse(
            submission.value(INPUT_TITLE),
            submission.value(INPUT_BODY),
            submission.value(INPUT_SLOTS),
        ) {
            Ok(input) => input,
            Err(err) => {
                self.responder.notify(&submission.actor, &err.to_string()).await?;
                return Ok(Outcome::NoOp);
            }
        };

        match self.create_session(owner, input).await {
            Ok(_) => Ok(Outcome::Applied),
            Err(err) => report_failure(self.responder.as_ref(), &submission.actor, err).await,
        }
    }

    async fn edit(
        &self,
        owner: &UserId,
        message: &MessageId,
        submission: &FormSubmission,
    ) -> Result<Outcome, DomainError> {
        let input = match RecruitInput::parse(
            submission.value(INPUT_TITLE),
            submission.value(INPUT_BODY),
            submission.value(INPUT_SLOTS),
        ) {
            Ok(input) => input,
            Err(err) => {
                self.responder.notify(&submission.actor, &err.to_string()).await?;
                return Ok(Outcome::NoOp);
            }
        };

        let payload = match self.store.fetch_by_id(message).await {
            Ok(payload) => payload,
            Err(err) => return report_failure(self.responder.as_ref(), &submission.actor, err).await,
        };
        // Re-decode at submission time: the roster may have moved while
        // the form was open, and the splice must land on the live state.
        let Some(current) = decode_recruitment(&payload, owner) else {
            self.responder.notify(&submission.actor, STALE_EDIT_NOTICE).await?;
            return Ok(Outcome::NoOp);
        };

        let mut next = current;
        next.title = input.title;
        next.body = input.body;
        next.remaining = input.slots;

        let payload = encode_recruitment(&next, &self.appearance);
        if let Err(err) = self.store.edit_in_place(message, payload).await {
            return report_failure(self.responder.as_ref(), &submission.actor, err).await;
        }
        self.responder.notify(&submission.actor, UPDATED_NOTICE).await?;
        Ok(Outcome::Applied)
    }
}

#[async_trait]
impl ActivationHandler for RecruitFormHandler {
    fn name(&self) -> &'static str {
        "recruit-form"
    }

    fn claims(&self, activation: &Activation) -> bool {
        matches!(activation, Activation::Form(s) if parse_recruit_form_id(&s.form_id).is_some())
    }

    async fn run(&self, activation: &Activation) -> Result<Outcome, DomainError> {
        let Activation::Form(submission) = activation else {
            return Ok(Outcome::NoOp);
        };
        let Some(target) = parse_recruit_form_id(&submission.form_id) else {
            return Ok(Outcome::NoOp);
        };

        match target {
            FormTarget::Create { owner } => {
                if owner != submission.actor {
                    tracing::debug!(form = %submission.form_id, actor = %submission.actor, "form identity mismatch");
                    return Ok(Outcome::NoOp);
                }
                self.create(&owner, submission).await
            }
            FormTarget::Edit { owner, message } => {
                if owner != submission.actor {
                    tracing::debug!(form = %submission.form_id, actor = %submission.actor, "form identity mismatch");
                    return Ok(Outcome::NoOp);
                }
                self.edit(&owner, &message, submission).await
            }
        }
    }
}
