//! Adapters - Implementations of port interfaces.
//!
//! Only the in-memory test adapters live in this crate; the adapters for
//! the real chat platform belong to the host bot process.

pub mod memory;

pub use memory::{InMemoryMessageStore, RecordingFormGateway, RecordingResponder};
