//! Coordinator for single-pool session buttons.
//!
//! Runs the full cycle for every `recruit:` token: decode the token,
//! fetch the live message, decode it back into state, apply the
//! transition, re-encode, write. Any step that fails to produce a next
//! state resolves to a silent no-op with the message untouched.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::handlers::recruit_notify::{notify_prompt_controls, notify_prompt_text};
use crate::application::handlers::{report_failure, Activation, ActivationHandler, Outcome};
use crate::domain::foundation::{DomainError, MessageId, UserId};
use crate::domain::recruitment::forms::recruit_edit_form;
use crate::domain::recruitment::{
    decode_recruitment, encode_recruitment, Appearance, RecruitAction, RecruitToken,
};
use crate::ports::{FormGateway, MessageStore, Responder};

pub struct RecruitButtonHandler {
    store: Arc<dyn MessageStore>,
    forms: Arc<dyn FormGateway>,
    responder: Arc<dyn Responder>,
    appearance: Appearance,
}

impl RecruitButtonHandler {
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
        token: RecruitToken,
        message: &MessageId,
        actor: &UserId,
    ) -> Result<Outcome, DomainError> {
        let payload = match self.store.fetch_by_id(message).await {
            Ok(payload) => payload,
            Err(err) => return report_failure(self.responder.as_ref(), actor, err).await,
        };
        let state = match decode_recruitment(&payload, &token.owner) {
            Some(state) => state,
            None => {
                tracing::debug!(message = %message, "message no longer decodes, ignoring press");
                return Ok(Outcome::NoOp);
            }
        };

        match token.action {
            RecruitAction::Edit => {
                if !state.is_owner(actor) {
                    return Ok(Outcome::NoOp);
                }
                let form = recruit_edit_form(&state, message);
                if let Err(err) = self.forms.open(actor, form).await {
                    return report_failure(self.responder.as_ref(), actor, err).await;
                }
                Ok(Outcome::NoOp)
            }
            RecruitAction::Notify => {
                if !state.is_owner(actor) {
                    return Ok(Outcome::NoOp);
                }
                if state.members.is_empty() {
                    self.responder
                        .notify(actor, "Nobody has joined yet, so there is no one to notify.")
                        .await?;
                    return Ok(Outcome::NoOp);
                }
                let text = notify_prompt_text(state.members.len());
                let controls = notify_prompt_controls(&state.owner, message);
                if let Err(err) = self.responder.prompt(actor, &text, controls).await {
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
                let payload = encode_recruitment(&next, &self.appearance);
                if let Err(err) = self.store.edit_in_place(message, payload).await {
                    return report_failure(self.responder.as_ref(), actor, err).await;
                }
                Ok(Outcome::Applied)
            }
        }
    }
}

#[async_trait]
impl ActivationHandler for RecruitButtonHandler {
    fn name(&self) -> &'static str {
        "recruit-button"
    }

    fn claims(&self, activation: &Activation) -> bool {
        matches!(activation, Activation::Button { token, .. } if RecruitToken::decode(token).is_some())
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
        let Some(token) = RecruitToken::decode(token) else {
            return Ok(Outcome::NoOp);
        };
        self.handle(token, message, actor).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryMessageStore, RecordingFormGateway, RecordingResponder};
    use crate::application::handlers::GENERIC_FAILURE;
    use crate::domain::foundation::SessionStatus;
    use crate::domain::recruitment::Recruitment;

    struct Fixture {
        store: Arc<InMemoryMessageStore>,
        forms: Arc<RecordingFormGateway>,
        responder: Arc<RecordingResponder>,
        handler: RecruitButtonHandler,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryMessageStore::new());
        let forms = Arc::new(RecordingFormGateway::new());
        let responder = Arc::new(RecordingResponder::new());
        let handler = RecruitButtonHandler::new(
            store.clone(),
            forms.clone(),
            responder.clone(),
            Appearance::default(),
        );
        Fixture {
            store,
            forms,
            responder,
            handler,
        }
    }

    fn owner() -> UserId {
        UserId::new("owner-1").unwrap()
    }

    fn state() -> Recruitment {
        Recruitment::open(owner(), "Raid".into(), "Tonight".into(), 2)
    }

    fn seed(fx: &Fixture, state: &Recruitment) -> MessageId {
        let id = MessageId::new("m1").unwrap();
        fx.store
            .seed(id.clone(), encode_recruitment(state, &Appearance::default()));
        id
    }

    fn press(action: RecruitAction, message: &MessageId, actor: &str) -> Activation {
        Activation::Button {
            token: RecruitToken::new(action, owner()).encode(),
            message: message.clone(),
            actor: UserId::new(actor).unwrap(),
        }
    }

    #[test]
    fn claims_only_recruit_tokens() {
        let fx = fixture();
        let message = MessageId::new("m1").unwrap();
        assert!(fx.handler.claims(&press(RecruitAction::Join, &message, "u1")));
        assert!(!fx.handler.claims(&Activation::Button {
            token: "party:cancel:owner-1".into(),
            message,
            actor: UserId::new("u1").unwrap(),
        }));
    }

    #[tokio::test]
    async fn join_writes_the_updated_message() {
        let fx = fixture();
        let message = seed(&fx, &state());

        let outcome = fx
            .handler
            .run(&press(RecruitAction::Join, &message, "555"))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Applied);
        let decoded = decode_recruitment(&fx.store.message(&message).unwrap(), &owner()).unwrap();
        assert_eq!(decoded.members, vec!["<@555>".to_string()]);
        assert_eq!(decoded.remaining, 1);
        assert_eq!(fx.store.write_count(), 1);
    }

    #[tokio::test]
    async fn rejected_transition_leaves_message_untouched() {
        let fx = fixture();
        let mut full = state();
        full.remaining = 0;
        let message = seed(&fx, &full);
        let before = fx.store.message(&message).unwrap();

        let outcome = fx
            .handler
            .run(&press(RecruitAction::Join, &message, "555"))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::NoOp);
        assert_eq!(fx.store.message(&message).unwrap(), before);
        assert_eq!(fx.store.write_count(), 0);
        assert!(fx.responder.notices().is_empty());
    }

    #[tokio::test]
    async fn undecodable_message_is_a_silent_no_op() {
        let fx = fixture();
        let message = seed(&fx, &state());
        let mut garbage = fx.store.message(&message).unwrap();
        garbage.description = "someone replaced this".into();
        fx.store.seed(message.clone(), garbage);

        let outcome = fx
            .handler
            .run(&press(RecruitAction::Join, &message, "555"))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::NoOp);
        assert_eq!(fx.store.write_count(), 0);
        assert!(fx.responder.notices().is_empty());
    }

    #[tokio::test]
    async fn store_failure_surfaces_the_generic_notice() {
        let fx = fixture();
        let message = seed(&fx, &state());
        fx.store.set_failing(true);

        let outcome = fx
            .handler
            .run(&press(RecruitAction::Join, &message, "555"))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::NoOp);
        let notices = fx.responder.notices();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].1, GENERIC_FAILURE);
    }

    #[tokio::test]
    async fn close_by_owner_flips_status() {
        let fx = fixture();
        let message = seed(&fx, &state());

        let outcome = fx
            .handler
            .run(&press(RecruitAction::Close, &message, "owner-1"))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::Applied);
        let decoded = decode_recruitment(&fx.store.message(&message).unwrap(), &owner()).unwrap();
        assert_eq!(decoded.status, SessionStatus::Closed);
    }

    #[tokio::test]
    async fn close_by_non_owner_is_rejected() {
        let fx = fixture();
        let message = seed(&fx, &state());

        let outcome = fx
            .handler
            .run(&press(RecruitAction::Close, &message, "555"))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::NoOp);
        assert_eq!(fx.store.write_count(), 0);
    }

    #[tokio::test]
    async fn edit_by_owner_opens_a_prefilled_form() {
        let fx = fixture();
        let message = seed(&fx, &state());

        let outcome = fx
            .handler
            .run(&press(RecruitAction::Edit, &message, "owner-1"))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::NoOp);
        let opened = fx.forms.opened();
        assert_eq!(opened.len(), 1);
        assert_eq!(opened[0].1.form_id, format!("recruit-edit:owner-1:{message}"));
        assert_eq!(fx.store.write_count(), 0);
    }

    #[tokio::test]
    async fn edit_by_non_owner_opens_nothing() {
        let fx = fixture();
        let message = seed(&fx, &state());

        fx.handler
            .run(&press(RecruitAction::Edit, &message, "555"))
            .await
            .unwrap();

        assert!(fx.forms.opened().is_empty());
    }

    #[tokio::test]
    async fn notify_with_members_prompts_for_confirmation() {
        let fx = fixture();
        let mut s = state();
        s.members.push("<@555>".into());
        s.remaining = 1;
        let message = seed(&fx, &s);

        let outcome = fx
            .handler
            .run(&press(RecruitAction::Notify, &message, "owner-1"))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::NoOp);
        let prompts = fx.responder.prompts();
        assert_eq!(prompts.len(), 1);
        let tokens: Vec<String> = prompts[0].2.iter().flatten().map(|c| c.token.clone()).collect();
        assert_eq!(
            tokens,
            vec![
                format!("recruit-notify:send:owner-1:{message}"),
                format!("recruit-notify:compose:owner-1:{message}"),
                format!("recruit-notify:dismiss:owner-1:{message}"),
            ]
        );
    }

    #[tokio::test]
    async fn notify_with_empty_roster_explains_instead_of_prompting() {
        let fx = fixture();
        let message = seed(&fx, &state());

        fx.handler
            .run(&press(RecruitAction::Notify, &message, "owner-1"))
            .await
            .unwrap();

        assert!(fx.responder.prompts().is_empty());
        assert_eq!(fx.responder.notices().len(), 1);
    }

    #[tokio::test]
    async fn notify_by_non_owner_is_silent() {
        let fx = fixture();
        let mut s = state();
        s.members.push("<@555>".into());
        let message = seed(&fx, &s);

        fx.handler
            .run(&press(RecruitAction::Notify, &message, "555"))
            .await
            .unwrap();

        assert!(fx.responder.prompts().is_empty());
        assert!(fx.responder.notices().is_empty());
    }
}
