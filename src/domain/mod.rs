//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, enums, errors)
//! - `recruitment` - Session states, transition engine, and wire codecs

pub mod foundation;
pub mod recruitment;
