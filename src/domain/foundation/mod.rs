//! Shared domain primitives (value objects, IDs, enums, errors).

mod errors;
mod ids;
mod status;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{MessageId, UserId};
pub use status::SessionStatus;
