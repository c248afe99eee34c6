//! Closed action vocabularies, one per session shape.
//!
//! Every vocabulary maps to and from the exact keyword carried inside a
//! control token. `from_keyword` is fail-closed: anything outside the
//! closed set is `None`, never an error.

use crate::domain::recruitment::Role;

/// Actions on a single-pool session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecruitAction {
    Join,
    Cancel,
    Plus,
    Minus,
    Close,
    Edit,
    Notify,
}

impl RecruitAction {
    pub fn keyword(&self) -> &'static str {
        match self {
            RecruitAction::Join => "join",
            RecruitAction::Cancel => "cancel",
            RecruitAction::Plus => "plus",
            RecruitAction::Minus => "minus",
            RecruitAction::Close => "close",
            RecruitAction::Edit => "edit",
            RecruitAction::Notify => "notify",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "join" => Some(RecruitAction::Join),
            "cancel" => Some(RecruitAction::Cancel),
            "plus" => Some(RecruitAction::Plus),
            "minus" => Some(RecruitAction::Minus),
            "close" => Some(RecruitAction::Close),
            "edit" => Some(RecruitAction::Edit),
            "notify" => Some(RecruitAction::Notify),
            _ => None,
        }
    }
}

/// Actions on a role-partitioned session.
///
/// There is no plus/minus here: per-pool capacities change only through
/// the edit form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyAction {
    Join(Role),
    Cancel,
    Close,
    Edit,
}

impl PartyAction {
    pub fn keyword(&self) -> &'static str {
        match self {
            PartyAction::Join(Role::Tank) => "join-tank",
            PartyAction::Join(Role::Attacker) => "join-attacker",
            PartyAction::Join(Role::Healer) => "join-healer",
            PartyAction::Cancel => "cancel",
            PartyAction::Close => "close",
            PartyAction::Edit => "edit",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "join-tank" => Some(PartyAction::Join(Role::Tank)),
            "join-attacker" => Some(PartyAction::Join(Role::Attacker)),
            "join-healer" => Some(PartyAction::Join(Role::Healer)),
            "cancel" => Some(PartyAction::Cancel),
            "close" => Some(PartyAction::Close),
            "edit" => Some(PartyAction::Edit),
            _ => None,
        }
    }
}

/// Actions on a notify confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyAction {
    Send,
    Compose,
    Dismiss,
}

impl NotifyAction {
    pub fn keyword(&self) -> &'static str {
        match self {
            NotifyAction::Send => "send",
            NotifyAction::Compose => "compose",
            NotifyAction::Dismiss => "dismiss",
        }
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "send" => Some(NotifyAction::Send),
            "compose" => Some(NotifyAction::Compose),
            "dismiss" => Some(NotifyAction::Dismiss),
            _ => None,
        }
    }
}
