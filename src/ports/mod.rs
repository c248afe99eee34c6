//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `MessageStore` - the rendered message per session (the only durable state)
//! - `FormGateway` - presents pre-filled forms to users
//! - `Responder` - ephemeral notices to the acting user
//!
//! The acting user's identity arrives on the activation payload itself,
//! so there is no identity port.

mod form_gateway;
mod message_store;
mod responder;

pub use form_gateway::FormGateway;
pub use message_store::MessageStore;
pub use responder::Responder;
