//! Coordinator for party session buttons.
//!
//! Same cycle as the single-pool coordinator, over the role-partitioned
//! shape. There are no capacity buttons here; the edit form is the only
//! way to change pool sizes.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::handlers::{report_failure, Activation, ActivationHandler, Outcome};
use crate::domain::foundation::{DomainError, MessageId, UserId};
use crate::domain::recruitment::forms::party_edit_form;
use crate::domain::recruitment::{
    decode_party, encode_party, Appearance, PartyAction, PartyToken,
};
use crate::ports::{FormGateway, MessageStore, Responder};

pub struct PartyButtonHandler {
    store: Arc<dyn MessageStore>,
    forms: Arc<dyn FormGateway>,
    responder: Arc<dyn Responder>,
    appearance: Appearance,
}

impl PartyButtonHandler {
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

    async fn handle(
        &self,
        token: PartyToken,
        message: &MessageId,
        actor: &UserId,
    ) -> Result<Outcome, DomainError> {
        let payload = match self.store.fetch_by_id(message).await {
            Ok(payload) => payload,
            Err(err) => return report_failure(self.responder.as_ref(), actor, err).await,
        };
        let state = match decode_party(&payload, &token.owner) {
            Some(state) => state,
            None => {
                tracing::debug!(message = %message, "message no longer decodes, ignoring press");
                return Ok(Outcome::NoOp);
            }
        };

        match token.action {
            PartyAction::Edit => {
                if !state.is_owner(actor) {
                    return Ok(Outcome::NoOp);
                }
                let form = party_edit_form(&state, message);
                if let Err(err) = self.forms.open(actor, form).await {
                    return report_failure(self.responder.as_ref(), actor, err).await;
                }
                Ok(Outcome::NoOp)
            }
            action => {
                let next = match state.apply(action, actor) {
                    Some(next) => next,
                    None => {
                        tracing::debug!(?action, actor = %actor, "transition rejected");
                        return Ok(Outcome::NoOp);
                    }
                };
                let payload = encode_party(&next, &self.appearance);
                if let Err(err) = self.store.edit_in_place(message, payload).await {
                    return report_failure(self.responder.as_ref(), actor, err).await;
                }
                Ok(Outcome::Applied)
            }
        }
    }
}

#[async_trait]
impl ActivationHandler for PartyButtonHandler {
    fn name(&self) -> &'static str {
        "party-button"
    }

    fn claims(&self, activation: &Activation) -> bool {
        matches!(activation, Activation::Button { token, .. } if PartyToken::decode(token).is_some())
    }

    async fn run(&self, activation: &Activation) -> Result<Outcome, DomainError> {
        let Activation::Button {
            token,
            message,
            actor,
        } = activation
        else {
            return Ok(Outcome::NoOp);
        };
        let Some(token) = PartyToken::decode(token) else {
            return Ok(Outcome::NoOp);
        };
        self.handle(token, message, actor).await
    }
}
