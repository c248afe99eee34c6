//! Strongly-typed identifier value objects.
//!
//! Identifiers are opaque strings assigned by the chat platform. They are
//! never parsed beyond a non-empty check, and they travel verbatim inside
//! control tokens and mention entries.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Identity of a platform user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl UserId {
    /// Creates a UserId from a platform-assigned string.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the string is empty or whitespace
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("user_id"));
        }
        Ok(Self(id))
    }

    /// Returns the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Renders this user as a mention entry for a roster field.
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }

    /// Checks whether a rendered roster entry refers to this user.
    ///
    /// Entries are mention strings carrying the raw id as a substring;
    /// this is the membership test the whole subsystem relies on.
    pub fn appears_in(&self, entry: &str) -> bool {
        entry.contains(self.0.as_str())
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a rendered chat message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(String);

impl MessageId {
    /// Creates a MessageId from a platform-assigned string.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the string is empty or whitespace
    pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::empty_field("message_id"));
        }
        Ok(Self(id))
    }

    /// Returns the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_id_rejects_empty() {
        assert!(UserId::new("").is_err());
        assert!(UserId::new("   ").is_err());
    }

    #[test]
    fn user_id_round_trips_raw_string() {
        let id = UserId::new("111222333").unwrap();
        assert_eq!(id.as_str(), "111222333");
        assert_eq!(id.to_string(), "111222333");
    }

    #[test]
    fn mention_wraps_raw_id() {
        let id = UserId::new("42").unwrap();
        assert_eq!(id.mention(), "<@42>");
    }

    #[test]
    fn appears_in_matches_own_mention() {
        let id = UserId::new("9001").unwrap();
        assert!(id.appears_in(&id.mention()));
        assert!(!id.appears_in("<@9002>"));
    }

    #[test]
    fn message_id_rejects_empty() {
        assert!(MessageId::new("").is_err());
    }

    #[test]
    fn ids_serialize_transparently() {
        let id = UserId::new("77").unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"77\"");
    }
}
