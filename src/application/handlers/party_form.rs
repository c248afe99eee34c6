//! Coordinator for party create and edit forms.
//!
//! Mirrors the single-pool form coordinator over the role-partitioned
//! shape. An edit may set a pool's capacity below its current occupancy;
//! the splice keeps the occupants and the pool simply stops admitting
//! until enough of them leave.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::handlers::{
    report_failure, Activation, ActivationHandler, FormSubmission, Outcome,
};
use crate::domain::foundation::{DomainError, MessageId, UserId};
use crate::domain::recruitment::forms::{
    parse_party_form_id, party_create_form, FormTarget, PartyInput, INPUT_ATTACKER_SLOTS,
    INPUT_BODY, INPUT_HEALER_SLOTS, INPUT_TANK_SLOTS, INPUT_TITLE,
};
use crate::domain::recruitment::{decode_party, encode_party, Appearance, PartyRecruitment};
use crate::ports::{FormGateway, MessageStore, Responder};

const STALE_EDIT_NOTICE: &str =
    "This recruitment could not be read back, so your changes were not applied.";
const UPDATED_NOTICE: &str = "Recruitment updated.";

pub struct PartyFormHandler {
    store: Arc<dyn MessageStore>,
    forms: Arc<dyn FormGateway>,
    responder: Arc<dyn Responder>,
    appearance: Appearance,
}

impl PartyFormHandler {
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

    /// Entry point for the host command that starts a new party
    /// recruitment: opens the blank creation form for the actor.
    ///
    /// # Errors
    ///
    /// Propagates the form collaborator's failure.
    pub async fn open_create_form(&self, actor: &UserId) -> Result<(), DomainError> {
        self.forms.open(actor, party_create_form(actor)).await
    }

    /// Publishes a new party session from already-validated input. This
    /// is the path for host commands that carry their arguments inline
    /// instead of going through the create form.
    ///
    /// # Errors
    ///
    /// Propagates the store's publish failure.
    pub async fn create_session(
        &self,
        owner: &UserId,
        input: PartyInput,
    ) -> Result<MessageId, DomainError> {
        let state = PartyRecruitment::open(
            owner.clone(),
            input.title,
            input.body,
            input.tank_slots,
            input.attacker_slots,
            input.healer_slots,
        );
        let payload = encode_party(&state, &self.appearance);
        let message = self.store.publish(payload).await?;
        tracing::info!(message = %message, owner = %owner, "party recruitment opened");
        Ok(message)
    }

    fn validated(
        &self,
        submission: &FormSubmission,
    ) -> Result<PartyInput, crate::domain::foundation::ValidationError> {
        PartyInput::parse(
            submission.value(INPUT_TITLE),
            submission.value(INPUT_BODY),
            submission.value(INPUT_TANK_SLOTS),
            submission.value(INPUT_ATTACKER_SLOTS),
            submission.value(INPUT_HEALER_SLOTS),
        )
    }

    async fn create(
        &self,
        owner: &UserId,
        submission: &FormSubmission,
    ) -> Result<Outcome, DomainError> {
        let input = match self.validated(submission) {
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
        let input = match self.validated(submission) {
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
        let Some(current) = decode_party(&payload, owner) else {
            self.responder.notify(&submission.actor, STALE_EDIT_NOTICE).await?;
            return Ok(Outcome::NoOp);
        };

        let mut next = current;
        next.title = input.title;
        next.body = input.body;
        next.tank_slots = input.tank_slots;
        next.attacker_slots = input.attacker_slots;
        next.healer_slots = input.healer_slots;

        let payload = encode_party(&next, &self.appearance);
        if let Err(err) = self.store.edit_in_place(message, payload).await {
            return report_failure(self.responder.as_ref(), &submission.actor, err).await;
        }
        self.responder.notify(&submission.actor, UPDATED_NOTICE).await?;
        Ok(Outcome::Applied)
    }
}

#[async_trait]
impl ActivationHandler for PartyFormHandler {
    fn name(&self) -> &'static str {
        "party-form"
    }

    fn claims(&self, activation: &Activation) -> bool {
        matches!(activation, Activation::Form(s) if parse_party_form_id(&s.form_id).is_some())
    }

    async fn run(&self, activation: &Activation) -> Result<Outcome, DomainError> {
        let Activation::Form(submission) = activation else {
            return Ok(Outcome::NoOp);
        };
        let Some(target) = parse_party_form_id(&submission.form_id) else {
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
