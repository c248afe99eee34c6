//! Message store port.
//!
//! The rendered message is the session's only durable state, so this is
//! the storage contract of the whole subsystem. The coordinator depends
//! on `fetch_by_id` always returning the most recent write (no stale
//! reads) and on `edit_in_place` being atomic from the caller's
//! perspective.
//!
//! There is deliberately no compare-and-swap here: concurrent activations
//! race between their fetch and their write, and the later writer wins.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, MessageId};
use crate::domain::recruitment::RenderedMessage;

/// Port for reading and writing rendered session messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Fetches the current payload of a message.
    ///
    /// Must return the latest write, never a cached copy.
    ///
    /// # Errors
    ///
    /// - `MessageNotFound` if the message no longer exists
    /// - `StoreError` on transport failure
    async fn fetch_by_id(&self, id: &MessageId) -> Result<RenderedMessage, DomainError>;

    /// Overwrites a message's payload in one write.
    ///
    /// # Errors
    ///
    /// - `MessageNotFound` if the message no longer exists
    /// - `StoreError` if the platform refuses the write
    async fn edit_in_place(&self, id: &MessageId, payload: RenderedMessage)
        -> Result<(), DomainError>;

    /// Publishes a brand-new session message and returns its id.
    ///
    /// This is the one create path of a session's lifecycle.
    ///
    /// # Errors
    ///
    /// - `StoreError` on transport failure
    async fn publish(&self, payload: RenderedMessage) -> Result<MessageId, DomainError>;

    /// Posts a plain-text reply beneath an existing message.
    ///
    /// # Errors
    ///
    /// - `MessageNotFound` if the message no longer exists
    /// - `StoreError` on transport failure
    async fn reply(&self, id: &MessageId, text: &str) -> Result<(), DomainError>;
}
