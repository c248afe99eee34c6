//! SessionStatus enum for the lifecycle of a recruitment session.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of a recruitment session.
///
/// There is no terminal state: `close` toggles, so a Closed session can
/// always be reopened by its owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Open,
    Closed,
}

impl SessionStatus {
    /// Returns true if participants can still join or leave.
    pub fn is_open(&self) -> bool {
        matches!(self, SessionStatus::Open)
    }

    /// Returns the opposite status. `close` is a toggle in both directions.
    pub fn toggled(&self) -> Self {
        match self {
            SessionStatus::Open => SessionStatus::Closed,
            SessionStatus::Closed => SessionStatus::Open,
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Open => "Open",
            SessionStatus::Closed => "Closed",
        };
        write!(f, "{}", s)
    }
}
