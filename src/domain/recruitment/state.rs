//! Session state shapes.
//!
//! A session has no persisted record of its own: these structs exist only
//! between a decode of the live message and the re-encode that follows.
//! All mutation goes through the transition engine; this module holds the
//! data and the read-only queries.
//!
//! Roster entries are rendered mention strings (`<@id>`), stored verbatim
//! so that decode → encode reproduces the message byte for byte.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionStatus, UserId};

/// Single-pool recruitment session.
///
/// # Invariants
///
/// - `owner` never changes for the life of the session
/// - `members` is in join order
/// - `remaining` and `members` are mutated in lock-step: every transition
///   that changes one changes the other, except the owner's plus/minus,
///   which adjust capacity alone by design
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recruitment {
    pub owner: UserId,
    pub title: String,
    pub body: String,
    pub members: Vec<String>,
    pub remaining: u32,
    pub status: SessionStatus,
}

impl Recruitment {
    /// Creates a freshly opened session with an empty roster.
    pub fn open(owner: UserId, title: String, body: String, slots: u32) -> Self {
        Self {
            owner,
            title,
            body,
            members: Vec::new(),
            remaining: slots,
            status: SessionStatus::Open,
        }
    }

    /// Checks whether the actor already holds a roster entry.
    pub fn is_member(&self, actor: &UserId) -> bool {
        self.members.iter().any(|entry| actor.appears_in(entry))
    }

    /// Checks whether the actor owns this session.
    pub fn is_owner(&self, actor: &UserId) -> bool {
        &self.owner == actor
    }
}

/// One of the three role pools of a party session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Tank,
    Attacker,
    Healer,
}

impl Role {
    /// All roles, in rendering order.
    pub const ALL: [Role; 3] = [Role::Tank, Role::Attacker, Role::Healer];
}

/// Role-partitioned recruitment session.
///
/// Three independent pools, each with its own fixed capacity. Capacities
/// change only through the edit form, never through button presses.
///
/// # Invariants
///
/// - `owner` never changes for the life of the session
/// - each pool is in join order
/// - an actor appears in at most one pool at a time (enforced by the
///   transition engine, verified by `role_of`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartyRecruitment {
    pub owner: UserId,
    pub title: String,
    pub body: String,
    pub tanks: Vec<String>,
    pub attackers: Vec<String>,
    pub healers: Vec<String>,
    pub tank_slots: u32,
    pub attacker_slots: u32,
    pub healer_slots: u32,
    pub status: SessionStatus,
}

impl PartyRecruitment {
    /// Creates a freshly opened party session with empty pools.
    pub fn open(
        owner: UserId,
        title: String,
        body: String,
        tank_slots: u32,
        attacker_slots: u32,
        healer_slots: u32,
    ) -> Self {
        Self {
            owner,
            title,
            body,
            tanks: Vec::new(),
            attackers: Vec::new(),
            healers: Vec::new(),
            tank_slots,
            attacker_slots,
            healer_slots,
            status: SessionStatus::Open,
        }
    }

    /// Returns the pool for a role.
    pub fn pool(&self, role: Role) -> &[String] {
        match role {
            Role::Tank => &self.tanks,
            Role::Attacker => &self.attackers,
            Role::Healer => &self.healers,
        }
    }

    /// Returns the mutable pool for a role.
    pub(crate) fn pool_mut(&mut self, role: Role) -> &mut Vec<String> {
        match role {
            Role::Tank => &mut self.tanks,
            Role::Attacker => &mut self.attackers,
            Role::Healer => &mut self.healers,
        }
    }

    /// Returns the fixed capacity of a role's pool.
    pub fn capacity(&self, role: Role) -> u32 {
        match role {
            Role::Tank => self.tank_slots,
            Role::Attacker => self.attacker_slots,
            Role::Healer => self.healer_slots,
        }
    }

    /// Returns the role the actor currently occupies, if any.
    pub fn role_of(&self, actor: &UserId) -> Option<Role> {
        Role::ALL
            .into_iter()
            .find(|role| self.pool(*role).iter().any(|entry| actor.appears_in(entry)))
    }

    /// Checks whether the actor owns this session.
    pub fn is_owner(&self, actor: &UserId) -> bool {
        &self.owner == actor
    }
}
