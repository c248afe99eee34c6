//! Coordinator for the notify flow of single-pool sessions.
//!
//! The owner's Notify press (handled by the button coordinator) produces
//! an ephemeral confirmation prompt whose controls carry `recruit-notify`
//! tokens. This handler runs those tokens and the compose form: Send
//! posts a mention reply beneath the session message, Compose opens a
//! free-text form first, Dismiss drops the prompt.
//!
//! Mentions are re-read from the live message at send time, not captured
//! at prompt time, so late joiners are included and leavers are not.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::handlers::{
    report_failure, Activation, ActivationHandler, FormSubmission, Outcome,
};
use crate::domain::foundation::{DomainError, MessageId, UserId, ValidationError};
use crate::domain::recruitment::forms::{
    notify_compose_form, parse_notify_form_id, INPUT_NOTIFY_MESSAGE,
};
use crate::domain::recruitment::{
    decode_recruitment, ControlSpec, ControlStyle, NotifyAction, NotifyToken,
};
use crate::ports::{FormGateway, MessageStore, Responder};

const DEFAULT_ANNOUNCEMENT: &str = "📢 The organizer has an update for this recruitment.";
const SENT_NOTICE: &str = "Notification sent.";
const DISMISSED_NOTICE: &str = "Notification cancelled.";
const ROSTER_GONE_NOTICE: &str = "The recruitment could not be read, nothing was sent.";
const ROSTER_EMPTY_NOTICE: &str = "Nobody is on the roster any more, nothing was sent.";

/// Confirmation prompt text for a roster of `count` members.
pub(crate) fn notify_prompt_text(count: usize) -> String {
    format!("Send a notification to {count} participant(s)?")
}

/// Control row of the confirmation prompt.
pub(crate) fn notify_prompt_controls(owner: &UserId, message: &MessageId) -> Vec<Vec<ControlSpec>> {
    let token = |action: NotifyAction| {
        NotifyToken::new(action, owner.clone(), message.clone()).encode()
    };
    vec![vec![
        ControlSpec {
            token: token(NotifyAction::Send),
            label: "Send".to_string(),
            style: ControlStyle::Primary,
            disabled: false,
        },
        ControlSpec {
            token: token(NotifyAction::Compose),
            label: "Add a message".to_string(),
            style: ControlStyle::Secondary,
            disabled: false,
        },
        ControlSpec {
            token: token(NotifyAction::Dismiss),
            label: "Cancel".to_string(),
            style: ControlStyle::Danger,
            disabled: false,
        },
    ]]
}

/// Builds the reply text: all roster mentions, then the announcement.
fn notification_text(members: &[String], custom: Option<&str>) -> String {
    let mentions = members.join(" ");
    match custom {
        Some(text) => format!("{mentions}\n{text}"),
        None => format!("{mentions}\n{DEFAULT_ANNOUNCEMENT}"),
    }
}

pub struct RecruitNotifyHandler {
    store: Arc<dyn MessageStore>,
    forms: Arc<dyn FormGateway>,
    responder: Arc<dyn Responder>,
}

impl RecruitNotifyHandler {
    pub fn new(
        store: Arc<dyn MessageStore>,
        forms: Arc<dyn FormGateway>,
        responder: Arc<dyn Responder>,
    ) -> Self {
        Self {
            store,
            forms,
            responder,
        }
    }

    /// Re-reads the roster and posts the mention reply.
    async fn send(
        &self,
        owner: &UserId,
        message: &MessageId,
        actor: &UserId,
        custom: Option<&str>,
    ) -> Result<Outcome, DomainError> {
        let payload = match self.store.fetch_by_id(message).await {
            Ok(payload) => payload,
            Err(err) => return report_failure(self.responder.as_ref(), actor, err).await,
        };
        let Some(state) = decode_recruitment(&payload, owner) else {
            self.responder.notify(actor, ROSTER_GONE_NOTICE).await?;
            return Ok(Outcome::NoOp);
        };
        if state.members.is_empty() {
            self.responder.notify(actor, ROSTER_EMPTY_NOTICE).await?;
            return Ok(Outcome::NoOp);
        }

        let text = notification_text(&state.members, custom);
        if let Err(err) = self.store.reply(message, &text).await {
            return report_failure(self.responder.as_ref(), actor, err).await;
        }
        self.responder.notify(actor, SENT_NOTICE).await?;
        Ok(Outcome::NoOp)
    }

    async fn button(&self, token: NotifyToken, actor: &UserId) -> Result<Outcome, DomainError> {
        // The prompt is ephemeral to the owner, but the token is still
        // checked against the presser.
        if &token.owner != actor {
            return Ok(Outcome::NoOp);
        }
        match token.action {
            NotifyAction::Send => self.send(&token.owner, &token.message, actor, None).await,
            NotifyAction::Compose => {
                let form = notify_compose_form(&token.owner, &token.message);
                if let Err(err) = self.forms.open(actor, form).await {
                    return report_failure(self.responder.as_ref(), actor, err).await;
                }
                Ok(Outcome::NoOp)
            }
            NotifyAction::Dismiss => {
                self.responder.notify(actor, DISMISSED_NOTICE).await?;
                Ok(Outcome::NoOp)
            }
        }
    }

    async fn compose_submission(
        &self,
        owner: &UserId,
        message: &MessageId,
        submission: &FormSubmission,
    ) -> Result<Outcome, DomainError> {
        if owner != &submission.actor {
            tracing::debug!(form = %submission.form_id, actor = %submission.actor, "form identity mismatch");
            return Ok(Outcome::NoOp);
        }
        let text = submission.value(INPUT_NOTIFY_MESSAGE).trim().to_string();
        if text.is_empty() {
            let err = ValidationError::empty_field(INPUT_NOTIFY_MESSAGE);
            self.responder.notify(&submission.actor, &err.to_string()).await?;
            return Ok(Outcome::NoOp);
        }
        self.send(owner, message, &submission.actor, Some(&text)).await
    }
}

#[async_trait]
impl ActivationHandler for RecruitNotifyHandler {
    fn name(&self) -> &'static str {
        "recruit-notify"
    }

    fn claims(&self, activation: &Activation) -> bool {
        match activation {
            Activation::Button { token, .. } => NotifyToken::decode(token).is_some(),
            Activation::Form(s) => parse_notify_form_id(&s.form_id).is_some(),
        }
    }

    async fn run(&self, activation: &Activation) -> Result<Outcome, DomainError> {
        match activation {
            Activation::Button { token, actor, .. } => {
                let Some(token) = NotifyToken::decode(token) else {
                    return Ok(Outcome::NoOp);
                };
                self.button(token, actor).await
            }
            Activation::Form(submission) => {
                let Some((owner, message)) = parse_notify_form_id(&submission.form_id) else {
                    return Ok(Outcome::NoOp);
                };
                self.compose_submission(&owner, &message, submission).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryMessageStore, RecordingFormGateway, RecordingResponder};
    use crate::domain::recruitment::{encode_recruitment, Appearance, Recruitment};
    use std::collections::HashMap;

    struct Fixture {
        store: Arc<InMemoryMessageStore>,
        forms: Arc<RecordingFormGateway>,
        responder: Arc<RecordingResponder>,
        handler: RecruitNotifyHandler,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(InMemoryMessageStore::new());
        let forms = Arc::new(RecordingFormGateway::new());
        let responder = Arc::new(RecordingResponder::new());
        let handler =
            RecruitNotifyHandler::new(store.clone(), forms.clone(), responder.clone());
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

    fn seed_with_members(fx: &Fixture, members: &[&str]) -> MessageId {
        let mut state = Recruitment::open(owner(), "Raid".into(), "Tonight".into(), 4);
        state.members = members.iter().map(|m| m.to_string()).collect();
        let id = MessageId::new("m1").unwrap();
        fx.store
            .seed(id.clone(), encode_recruitment(&state, &Appearance::default()));
        id
    }

    fn press(action: NotifyAction, message: &MessageId, actor: &str) -> Activation {
        Activation::Button {
            token: NotifyToken::new(action, owner(), message.clone()).encode(),
            message: message.clone(),
            actor: UserId::new(actor).unwrap(),
        }
    }

    #[tokio::test]
    async fn send_replies_with_all_mentions() {
        let fx = fixture();
        let message = seed_with_members(&fx, &["<@100>", "<@200>"]);

        let outcome = fx
            .handler
            .run(&press(NotifyAction::Send, &message, "owner-1"))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::NoOp);
        let replies = fx.store.replies();
        assert_eq!(replies.len(), 1);
        assert!(replies[0].1.starts_with("<@100> <@200>\n"));
        assert_eq!(fx.store.write_count(), 0);
        let notices = fx.responder.notices();
        assert_eq!(notices.last().map(|(_, t)| t.as_str()), Some(SENT_NOTICE));
    }

    #[tokio::test]
    async fn send_reads_the_roster_at_send_time() {
        let fx = fixture();
        let message = seed_with_members(&fx, &["<@100>"]);

        // the roster moves between prompt and confirmation
        let mut state = Recruitment::open(owner(), "Raid".into(), "Tonight".into(), 4);
        state.members = vec!["<@300>".into()];
        fx.store
            .seed(message.clone(), encode_recruitment(&state, &Appearance::default()));

        fx.handler
            .run(&press(NotifyAction::Send, &message, "owner-1"))
            .await
            .unwrap();

        assert!(fx.store.replies()[0].1.starts_with("<@300>\n"));
    }

    #[tokio::test]
    async fn send_with_emptied_roster_explains_and_posts_nothing() {
        let fx = fixture();
        let message = seed_with_members(&fx, &[]);

        fx.handler
            .run(&press(NotifyAction::Send, &message, "owner-1"))
            .await
            .unwrap();

        assert!(fx.store.replies().is_empty());
        assert_eq!(
            fx.responder.notices().last().map(|(_, t)| t.clone()),
            Some(ROSTER_EMPTY_NOTICE.to_string())
        );
    }

    #[tokio::test]
    async fn press_by_someone_else_is_silent() {
        let fx = fixture();
        let message = seed_with_members(&fx, &["<@100>"]);

        let outcome = fx
            .handler
            .run(&press(NotifyAction::Send, &message, "intruder"))
            .await
            .unwrap();

        assert_eq!(outcome, Outcome::NoOp);
        assert!(fx.store.replies().is_empty());
        assert!(fx.responder.notices().is_empty());
    }

    #[tokio::test]
    async fn compose_opens_the_free_text_form() {
        let fx = fixture();
        let message = seed_with_members(&fx, &["<@100>"]);

        fx.handler
            .run(&press(NotifyAction::Compose, &message, "owner-1"))
            .await
            .unwrap();

        let opened = fx.forms.opened();
        assert_eq!(opened.len(), 1);
        assert_eq!(
            opened[0].1.form_id,
            format!("recruit-notify-form:owner-1:{message}")
        );
    }

    #[tokio::test]
    async fn dismiss_confirms_and_touches_nothing() {
        let fx = fixture();
        let message = seed_with_members(&fx, &["<@100>"]);

        fx.handler
            .run(&press(NotifyAction::Dismiss, &message, "owner-1"))
            .await
            .unwrap();

        assert!(fx.store.replies().is_empty());
        assert_eq!(
            fx.responder.notices().last().map(|(_, t)| t.clone()),
            Some(DISMISSED_NOTICE.to_string())
        );
    }

    #[tokio::test]
    async fn composed_submission_appends_the_custom_line() {
        let fx = fixture();
        let message = seed_with_members(&fx, &["<@100>"]);

        let submission = Activation::Form(FormSubmission {
            form_id: format!("recruit-notify-form:owner-1:{message}"),
            actor: owner(),
            values: HashMap::from([(
                INPUT_NOTIFY_MESSAGE.to_string(),
                "We start in ten minutes.".to_string(),
            )]),
        });
        fx.handler.run(&submission).await.unwrap();

        let replies = fx.store.replies();
        assert_eq!(replies.len(), 1);
        assert_eq!(replies[0].1, "<@100>\nWe start in ten minutes.");
    }

    #[tokio::test]
    async fn blank_composed_text_reports_a_validation_message() {
        let fx = fixture();
        let message = seed_with_members(&fx, &["<@100>"]);

        let submission = Activation::Form(FormSubmission {
            form_id: format!("recruit-notify-form:owner-1:{message}"),
            actor: owner(),
            values: HashMap::from([(INPUT_NOTIFY_MESSAGE.to_string(), "   ".to_string())]),
        });
        fx.handler.run(&submission).await.unwrap();

        assert!(fx.store.replies().is_empty());
        assert_eq!(fx.responder.notices().len(), 1);
    }

    #[test]
    fn claims_notify_tokens_and_compose_forms() {
        let fx = fixture();
        let message = MessageId::new("m1").unwrap();
        assert!(fx.handler.claims(&press(NotifyAction::Send, &message, "u")));
        assert!(fx.handler.claims(&Activation::Form(FormSubmission {
            form_id: "recruit-notify-form:owner-1:m1".into(),
            actor: owner(),
            values: HashMap::new(),
        })));
        assert!(!fx.handler.claims(&Activation::Button {
            token: "recruit:notify:owner-1".into(),
            message,
            actor: owner(),
        }));
    }
}
