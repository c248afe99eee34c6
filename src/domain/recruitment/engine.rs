//! Pure state-transition engine.
//!
//! `apply` takes a decoded state, an action, and the acting user, and
//! returns either a complete next state or `None`. `None` means the
//! action is rejected and the rendered message must be left untouched;
//! there is no partial application and no error artifact for the actor.
//!
//! The engine is the only place that mutates session state. It never
//! performs I/O and never sees the wire format.

use crate::domain::foundation::UserId;
use crate::domain::recruitment::{PartyAction, PartyRecruitment, RecruitAction, Recruitment};

impl Recruitment {
    /// Applies a single-pool button action.
    ///
    /// `Edit` and `Notify` are not engine transitions (they open a form
    /// or a prompt) and always return `None` here.
    pub fn apply(&self, action: RecruitAction, actor: &UserId) -> Option<Recruitment> {
        let is_owner = self.is_owner(actor);
        let is_open = self.status.is_open();

        match action {
            RecruitAction::Join => {
                if !is_open || self.is_member(actor) || self.remaining == 0 {
                    return None;
                }
                let mut next = self.clone();
                next.members.push(actor.mention());
                next.remaining -= 1;
                Some(next)
            }
            RecruitAction::Cancel => {
                if !is_open || !self.is_member(actor) {
                    return None;
                }
                let mut next = self.clone();
                next.members.retain(|entry| !actor.appears_in(entry));
                // leaving must always succeed, even at the u32 ceiling
                next.remaining = next.remaining.saturating_add(1);
                Some(next)
            }
            RecruitAction::Plus => {
                if !is_owner || !is_open {
                    return None;
                }
                let remaining = self.remaining.checked_add(1)?;
                let mut next = self.clone();
                next.remaining = remaining;
                Some(next)
            }
            RecruitAction::Minus => {
                if !is_owner || !is_open || self.remaining == 0 {
                    return None;
                }
                let mut next = self.clone();
                next.remaining -= 1;
                Some(next)
            }
            RecruitAction::Close => {
                if !is_owner {
                    return None;
                }
                let mut next = self.clone();
                next.status = next.status.toggled();
                Some(next)
            }
            RecruitAction::Edit | RecruitAction::Notify => None,
        }
    }
}

impl PartyRecruitment {
    /// Applies a party button action.
    ///
    /// `Join(role)` on an already-occupied other role vacates it and
    /// admits into the target in one step. The next state is computed
    /// speculatively: if the target pool is full the whole action
    /// rejects and the vacate never becomes visible.
    pub fn apply(&self, action: PartyAction, actor: &UserId) -> Option<PartyRecruitment> {
        let is_owner = self.is_owner(actor);
        let is_open = self.status.is_open();

        match action {
            PartyAction::Join(target) => {
                if !is_open {
                    return None;
                }
                let current = self.role_of(actor);
                if current == Some(target) {
                    return None;
                }
                // Admission is checked against the target pool as it is
                // now; vacating a different pool cannot free a target
                // slot, so the order is safe.
                if self.pool(target).len() as u32 >= self.capacity(target) {
                    return None;
                }
                let mut next = self.clone();
                if let Some(occupied) = current {
                    next.pool_mut(occupied).retain(|entry| !actor.appears_in(entry));
                }
                next.pool_mut(target).push(actor.mention());
                Some(next)
            }
            PartyAction::Cancel => {
                if !is_open {
                    return None;
                }
                let occupied = self.role_of(actor)?;
                let mut next = self.clone();
                next.pool_mut(occupied).retain(|entry| !actor.appears_in(entry));
                Some(next)
            }
            PartyAction::Close => {
                if !is_owner {
                    return None;
                }
                let mut next = self.clone();
                next.status = next.status.toggled();
                Some(next)
            }
            PartyAction::Edit => None,
        }
    }
}
