//! In-memory port implementations for testing.
//!
//! Deterministic, lock-guarded stand-ins for the host platform. These
//! adapters are for **testing only**: they use `.expect()` on lock
//! operations, which will panic if a lock is poisoned. Production code
//! talks to the real chat platform through its own adapters.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Mutex, RwLock};

use crate::domain::foundation::{DomainError, ErrorCode, MessageId, UserId};
use crate::domain::recruitment::forms::FormRequest;
use crate::domain::recruitment::{ControlSpec, RenderedMessage};
use crate::ports::{FormGateway, MessageStore, Responder};

/// In-memory message store.
///
/// `fetch_by_id` always observes the latest write, matching the
/// no-stale-reads contract of the port. A write counter supports
/// zero-write assertions in no-op tests, and `fail_next` simulates a
/// store outage.
#[derive(Default)]
pub struct InMemoryMessageStore {
    messages: RwLock<HashMap<MessageId, RenderedMessage>>,
    replies: Mutex<Vec<(MessageId, String)>>,
    writes: AtomicUsize,
    published: AtomicUsize,
    failing: AtomicBool,
}

impl InMemoryMessageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a message under a fixed id.
    pub fn seed(&self, id: MessageId, payload: RenderedMessage) {
        self.messages
            .write()
            .expect("InMemoryMessageStore: messages lock poisoned")
            .insert(id, payload);
    }

    /// Returns the current payload of a message.
    pub fn message(&self, id: &MessageId) -> Option<RenderedMessage> {
        self.messages
            .read()
            .expect("InMemoryMessageStore: messages lock poisoned")
            .get(id)
            .cloned()
    }

    /// Returns all posted replies in order.
    pub fn replies(&self) -> Vec<(MessageId, String)> {
        self.replies
            .lock()
            .expect("InMemoryMessageStore: replies lock poisoned")
            .clone()
    }

    /// Number of message writes (edits and publishes) so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Makes every subsequent call fail with a store error.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), DomainError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(DomainError::store("simulated store outage"));
        }
        Ok(())
    }
}

#[async_trait]
impl MessageStore for InMemoryMessageStore {
    async fn fetch_by_id(&self, id: &MessageId) -> Result<RenderedMessage, DomainError> {
        self.check_available()?;
        self.message(id).ok_or_else(|| {
            DomainError::new(ErrorCode::MessageNotFound, format!("no message {}", id))
        })
    }

    async fn edit_in_place(
        &self,
        id: &MessageId,
        payload: RenderedMessage,
    ) -> Result<(), DomainError> {
        self.check_available()?;
        let mut messages = self
            .messages
            .write()
            .expect("InMemoryMessageStore: messages lock poisoned");
        if !messages.contains_key(id) {
            return Err(DomainError::new(
                ErrorCode::MessageNotFound,
                format!("no message {}", id),
            ));
        }
        messages.insert(id.clone(), payload);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn publish(&self, payload: RenderedMessage) -> Result<MessageId, DomainError> {
        self.check_available()?;
        let n = self.published.fetch_add(1, Ordering::SeqCst);
        let id = MessageId::new(format!("msg-{}", n + 1)).map_err(DomainError::from)?;
        self.messages
            .write()
            .expect("InMemoryMessageStore: messages lock poisoned")
            .insert(id.clone(), payload);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(id)
    }

    async fn reply(&self, id: &MessageId, text: &str) -> Result<(), DomainError> {
        self.check_available()?;
        if self.message(id).is_none() {
            return Err(DomainError::new(
                ErrorCode::MessageNotFound,
                format!("no message {}", id),
            ));
        }
        self.replies
            .lock()
            .expect("InMemoryMessageStore: replies lock poisoned")
            .push((id.clone(), text.to_string()));
        Ok(())
    }
}

/// Records every form the coordinators try to open.
#[derive(Default)]
pub struct RecordingFormGateway {
    opened: Mutex<Vec<(UserId, FormRequest)>>,
}

impl RecordingFormGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn opened(&self) -> Vec<(UserId, FormRequest)> {
        self.opened
            .lock()
            .expect("RecordingFormGateway: lock poisoned")
            .clone()
    }
}

#[async_trait]
impl FormGateway for RecordingFormGateway {
    async fn open(&self, actor: &UserId, form: FormRequest) -> Result<(), DomainError> {
        self.opened
            .lock()
            .expect("RecordingFormGateway: lock poisoned")
            .push((actor.clone(), form));
        Ok(())
    }
}

/// Records every ephemeral notice and prompt.
#[derive(Default)]
pub struct RecordingResponder {
    notices: Mutex<Vec<(UserId, String)>>,
    prompts: Mutex<Vec<(UserId, String, Vec<Vec<ControlSpec>>)>>,
}

impl RecordingResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notices(&self) -> Vec<(UserId, String)> {
        self.notices
            .lock()
            .expect("RecordingResponder: lock poisoned")
            .clone()
    }

    pub fn prompts(&self) -> Vec<(UserId, String, Vec<Vec<ControlSpec>>)> {
        self.prompts
            .lock()
            .expect("RecordingResponder: lock poisoned")
            .clone()
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn notify(&self, actor: &UserId, text: &str) -> Result<(), DomainError> {
        self.notices
            .lock()
            .expect("RecordingResponder: lock poisoned")
            .push((actor.clone(), text.to_string()));
        Ok(())
    }

    async fn prompt(
        &self,
        actor: &UserId,
        text: &str,
        controls: Vec<Vec<ControlSpec>>,
    ) -> Result<(), DomainError> {
        self.prompts
            .lock()
            .expect("RecordingResponder: lock poisoned")
            .push((actor.clone(), text.to_string(), controls));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recruitment::{encode_recruitment, Appearance, Recruitment};

    fn payload() -> RenderedMessage {
        let state = Recruitment::open(
            UserId::new("owner-1").unwrap(),
            "t".into(),
            "b".into(),
            1,
        );
        encode_recruitment(&state, &Appearance::default())
    }

    #[tokio::test]
    async fn fetch_sees_latest_write() {
        let store = InMemoryMessageStore::new();
        let id = store.publish(payload()).await.unwrap();

        let mut updated = payload();
        updated.title = "changed".into();
        store.edit_in_place(&id, updated.clone()).await.unwrap();

        assert_eq!(store.fetch_by_id(&id).await.unwrap(), updated);
        assert_eq!(store.write_count(), 2);
    }

    #[tokio::test]
    async fn fetch_of_unknown_message_fails() {
        let store = InMemoryMessageStore::new();
        let err = store
            .fetch_by_id(&MessageId::new("nope").unwrap())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::MessageNotFound);
    }

    #[tokio::test]
    async fn failing_store_rejects_everything() {
        let store = InMemoryMessageStore::new();
        let id = store.publish(payload()).await.unwrap();
        store.set_failing(true);
        assert!(store.fetch_by_id(&id).await.is_err());
        assert!(store.edit_in_place(&id, payload()).await.is_err());
        assert!(store.reply(&id, "hi").await.is_err());
    }

    #[tokio::test]
    async fn replies_are_recorded_in_order() {
        let store = InMemoryMessageStore::new();
        let id = store.publish(payload()).await.unwrap();
        store.reply(&id, "one").await.unwrap();
        store.reply(&id, "two").await.unwrap();
        let texts: Vec<String> = store.replies().into_iter().map(|(_, t)| t).collect();
        assert_eq!(texts, vec!["one", "two"]);
    }
}
