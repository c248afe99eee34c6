//! Token codec for interactive controls.
//!
//! Every pressable control carries an opaque token: colon-delimited
//! segments, first a family prefix, then an action keyword from a closed
//! vocabulary, then the owner id, then optional addressing segments.
//!
//! Decoding is total and fail-closed: wrong family, wrong segment count,
//! unknown keyword, or an empty segment all yield `None`. A `None` means
//! "not mine" or "inert" to the caller, never an error.

use crate::domain::foundation::{MessageId, UserId};
use crate::domain::recruitment::{NotifyAction, PartyAction, RecruitAction};

const RECRUIT_PREFIX: &str = "recruit";
const PARTY_PREFIX: &str = "party";
const NOTIFY_PREFIX: &str = "recruit-notify";

/// Token on a single-pool session control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecruitToken {
    pub action: RecruitAction,
    pub owner: UserId,
}

impl RecruitToken {
    pub fn new(action: RecruitAction, owner: UserId) -> Self {
        Self { action, owner }
    }

    pub fn encode(&self) -> String {
        format!("{}:{}:{}", RECRUIT_PREFIX, self.action.keyword(), self.owner)
    }

    pub fn decode(token: &str) -> Option<Self> {
        let mut parts = token.split(':');
        let (prefix, keyword, owner) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() || prefix != RECRUIT_PREFIX {
            return None;
        }
        Some(Self {
            action: RecruitAction::from_keyword(keyword)?,
            owner: UserId::new(owner).ok()?,
        })
    }
}

/// Token on a party session control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyToken {
    pub action: PartyAction,
    pub owner: UserId,
}

impl PartyToken {
    pub fn new(action: PartyAction, owner: UserId) -> Self {
        Self { action, owner }
    }

    pub fn encode(&self) -> String {
        format!("{}:{}:{}", PARTY_PREFIX, self.action.keyword(), self.owner)
    }

    pub fn decode(token: &str) -> Option<Self> {
        let mut parts = token.split(':');
        let (prefix, keyword, owner) = (parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() || prefix != PARTY_PREFIX {
            return None;
        }
        Some(Self {
            action: PartyAction::from_keyword(keyword)?,
            owner: UserId::new(owner).ok()?,
        })
    }
}

/// Token on a notify confirmation control; carries the target message id
/// because the prompt lives outside the session message itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifyToken {
    pub action: NotifyAction,
    pub owner: UserId,
    pub message: MessageId,
}

impl NotifyToken {
    pub fn new(action: NotifyAction, owner: UserId, message: MessageId) -> Self {
        Self {
            action,
            owner,
            message,
        }
    }

    pub fn encode(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            NOTIFY_PREFIX,
            self.action.keyword(),
            self.owner,
            self.message
        )
    }

    pub fn decode(token: &str) -> Option<Self> {
        let mut parts = token.split(':');
        let (prefix, keyword, owner, message) =
            (parts.next()?, parts.next()?, parts.next()?, parts.next()?);
        if parts.next().is_some() || prefix != NOTIFY_PREFIX {
            return None;
        }
        Some(Self {
            action: NotifyAction::from_keyword(keyword)?,
            owner: UserId::new(owner).ok()?,
            message: MessageId::new(message).ok()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::recruitment::Role;

    fn owner() -> UserId {
        UserId::new("owner-1").unwrap()
    }

    #[test]
    fn recruit_token_round_trips() {
        let token = RecruitToken::new(RecruitAction::Join, owner());
        assert_eq!(token.encode(), "recruit:join:owner-1");
        assert_eq!(RecruitToken::decode(&token.encode()), Some(token));
    }

    #[test]
    fn party_token_round_trips() {
        let token = PartyToken::new(PartyAction::Join(Role::Healer), owner());
        assert_eq!(token.encode(), "party:join-healer:owner-1");
        assert_eq!(PartyToken::decode(&token.encode()), Some(token));
    }

    #[test]
    fn notify_token_round_trips() {
        let token = NotifyToken::new(
            NotifyAction::Compose,
            owner(),
            MessageId::new("msg-9").unwrap(),
        );
        assert_eq!(token.encode(), "recruit-notify:compose:owner-1:msg-9");
        assert_eq!(NotifyToken::decode(&token.encode()), Some(token));
    }

    #[test]
    fn wrong_family_decodes_to_none() {
        assert_eq!(RecruitToken::decode("party:join:owner-1"), None);
        assert_eq!(PartyToken::decode("recruit:cancel:owner-1"), None);
        assert_eq!(NotifyToken::decode("recruit:notify:owner-1:m"), None);
    }

    #[test]
    fn wrong_segment_count_decodes_to_none() {
        assert_eq!(RecruitToken::decode("recruit:join"), None);
        assert_eq!(RecruitToken::decode("recruit:join:owner-1:extra"), None);
        assert_eq!(NotifyToken::decode("recruit-notify:send:owner-1"), None);
    }

    #[test]
    fn unknown_keyword_decodes_to_none() {
        assert_eq!(RecruitToken::decode("recruit:explode:owner-1"), None);
        assert_eq!(PartyToken::decode("party:plus:owner-1"), None);
    }

    #[test]
    fn empty_identity_segment_decodes_to_none() {
        assert_eq!(RecruitToken::decode("recruit:join:"), None);
        assert_eq!(NotifyToken::decode("recruit-notify:send::msg-9"), None);
        assert_eq!(NotifyToken::decode("recruit-notify:send:owner-1:"), None);
    }

    #[test]
    fn garbage_never_panics() {
        for garbage in ["", ":", ":::::", "recruit", "🛡️:join:owner"] {
            let _ = RecruitToken::decode(garbage);
            let _ = PartyToken::decode(garbage);
            let _ = NotifyToken::decode(garbage);
        }
    }
}
