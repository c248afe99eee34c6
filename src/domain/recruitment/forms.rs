//! Form requests and submission validation.
//!
//! Forms are the only path that writes free text into a session: creation
//! and owner edits. The form collaborator is consumed purely for its
//! result contract — validated strings and integers — so this module owns
//! both the pre-filled request we hand it and the strict validation of
//! what comes back.
//!
//! Unlike button rejections, validation failures here surface an explicit
//! message to the actor (the one exception in the silent-no-op policy).

use crate::domain::foundation::{MessageId, UserId, ValidationError};
use crate::domain::recruitment::{PartyRecruitment, Recruitment};

const RECRUIT_CREATE_PREFIX: &str = "recruit-form:";
const RECRUIT_EDIT_PREFIX: &str = "recruit-edit:";
const PARTY_CREATE_PREFIX: &str = "party-form:";
const PARTY_EDIT_PREFIX: &str = "party-edit:";
const NOTIFY_COMPOSE_PREFIX: &str = "recruit-notify-form:";

pub const INPUT_TITLE: &str = "title";
pub const INPUT_BODY: &str = "body";
pub const INPUT_SLOTS: &str = "slots";
pub const INPUT_TANK_SLOTS: &str = "tank-slots";
pub const INPUT_ATTACKER_SLOTS: &str = "attacker-slots";
pub const INPUT_HEALER_SLOTS: &str = "healer-slots";
pub const INPUT_NOTIFY_MESSAGE: &str = "notify-message";

/// Input style hint for the form collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Short,
    Paragraph,
}

/// One text input of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub id: &'static str,
    pub label: &'static str,
    pub kind: InputKind,
    pub initial: Option<String>,
}

impl FormInput {
    fn short(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            kind: InputKind::Short,
            initial: None,
        }
    }

    fn paragraph(id: &'static str, label: &'static str) -> Self {
        Self {
            id,
            label,
            kind: InputKind::Paragraph,
            initial: None,
        }
    }

    fn with_initial(mut self, value: impl Into<String>) -> Self {
        self.initial = Some(value.into());
        self
    }
}

/// A pre-filled form handed to the form collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormRequest {
    pub form_id: String,
    pub title: String,
    pub inputs: Vec<FormInput>,
}

// ─────────────────────────────────────────────────────────────────────────
// Form builders
// ─────────────────────────────────────────────────────────────────────────

pub fn recruit_create_form(owner: &UserId) -> FormRequest {
    FormRequest {
        form_id: format!("{}{}", RECRUIT_CREATE_PREFIX, owner),
        title: "Open a recruitment".to_string(),
        inputs: vec![
            FormInput::short(INPUT_SLOTS, "How many people do you need?"),
            FormInput::short(INPUT_TITLE, "Title"),
            FormInput::paragraph(INPUT_BODY, "Details"),
        ],
    }
}

/// Edit form seeded from the currently decoded state. Membership is not
/// part of the form; the submission is spliced onto whatever the roster
/// is at submission time.
pub fn recruit_edit_form(state: &Recruitment, message: &MessageId) -> FormRequest {
    FormRequest {
        form_id: format!("{}{}:{}", RECRUIT_EDIT_PREFIX, state.owner, message),
        title: "Edit recruitment".to_string(),
        inputs: vec![
            FormInput::short(INPUT_SLOTS, "How many people do you need?")
                .with_initial(state.remaining.to_string()),
            FormInput::short(INPUT_TITLE, "Title").with_initial(state.title.clone()),
            FormInput::paragraph(INPUT_BODY, "Details").with_initial(state.body.clone()),
        ],
    }
}

pub fn party_create_form(owner: &UserId) -> FormRequest {
    FormRequest {
        form_id: format!("{}{}", PARTY_CREATE_PREFIX, owner),
        title: "Open a party recruitment".to_string(),
        inputs: vec![
            FormInput::short(INPUT_TITLE, "Title"),
            FormInput::paragraph(INPUT_BODY, "Details"),
            FormInput::short(INPUT_TANK_SLOTS, "🛡️ Tank slots"),
            FormInput::short(INPUT_ATTACKER_SLOTS, "⚔️ Attacker slots"),
            FormInput::short(INPUT_HEALER_SLOTS, "💚 Healer slots"),
        ],
    }
}

pub fn party_edit_form(state: &PartyRecruitment, message: &MessageId) -> FormRequest {
    FormRequest {
        form_id: format!("{}{}:{}", PARTY_EDIT_PREFIX, state.owner, message),
        title: "Edit party recruitment".to_string(),
        inputs: vec![
            FormInput::short(INPUT_TITLE, "Title").with_initial(state.title.clone()),
            FormInput::paragraph(INPUT_BODY, "Details").with_initial(state.body.clone()),
            FormInput::short(INPUT_TANK_SLOTS, "🛡️ Tank slots")
                .with_initial(state.tank_slots.to_string()),
            FormInput::short(INPUT_ATTACKER_SLOTS, "⚔️ Attacker slots")
                .with_initial(state.attacker_slots.to_string()),
            FormInput::short(INPUT_HEALER_SLOTS, "💚 Healer slots")
                .with_initial(state.healer_slots.to_string()),
        ],
    }
}

pub fn notify_compose_form(owner: &UserId, message: &MessageId) -> FormRequest {
    FormRequest {
        form_id: format!("{}{}:{}", NOTIFY_COMPOSE_PREFIX, owner, message),
        title: "Message the participants".to_string(),
        inputs: vec![FormInput::paragraph(
            INPUT_NOTIFY_MESSAGE,
            "Announcement to send",
        )],
    }
}

// ─────────────────────────────────────────────────────────────────────────
// Form-id codec
// ─────────────────────────────────────────────────────────────────────────

/// Addressing decoded from a submitted form id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormTarget {
    Create { owner: UserId },
    Edit { owner: UserId, message: MessageId },
}

fn parse_owner(payload: &str) -> Option<UserId> {
    UserId::new(payload).ok()
}

fn parse_owner_message(payload: &str) -> Option<(UserId, MessageId)> {
    let (owner, message) = payload.split_once(':')?;
    Some((UserId::new(owner).ok()?, MessageId::new(message).ok()?))
}

fn parse_family(form_id: &str, create_prefix: &str, edit_prefix: &str) -> Option<FormTarget> {
    if let Some(payload) = form_id.strip_prefix(create_prefix) {
        if payload.contains(':') {
            return None;
        }
        return Some(FormTarget::Create {
            owner: parse_owner(payload)?,
        });
    }
    let payload = form_id.strip_prefix(edit_prefix)?;
    let (owner, message) = parse_owner_message(payload)?;
    Some(FormTarget::Edit { owner, message })
}

/// Decodes a single-pool form id, or `None` if it belongs elsewhere.
pub fn parse_recruit_form_id(form_id: &str) -> Option<FormTarget> {
    parse_family(form_id, RECRUIT_CREATE_PREFIX, RECRUIT_EDIT_PREFIX)
}

/// Decodes a party form id, or `None` if it belongs elsewhere.
pub fn parse_party_form_id(form_id: &str) -> Option<FormTarget> {
    parse_family(form_id, PARTY_CREATE_PREFIX, PARTY_EDIT_PREFIX)
}

/// Decodes a notify-compose form id.
pub fn parse_notify_form_id(form_id: &str) -> Option<(UserId, MessageId)> {
    parse_owner_message(form_id.strip_prefix(NOTIFY_COMPOSE_PREFIX)?)
}

// ─────────────────────────────────────────────────────────────────────────
// Submission validation
// ─────────────────────────────────────────────────────────────────────────

/// Validated fields of a single-pool create/edit submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecruitInput {
    pub title: String,
    pub body: String,
    pub slots: u32,
}

impl RecruitInput {
    /// Validates raw form values.
    ///
    /// # Errors
    ///
    /// - `InvalidFormat`/`BelowMinimum` if slots is not an integer ≥ 1
    /// - `EmptyField` if title or body is blank after trimming
    pub fn parse(title: &str, body: &str, slots: &str) -> Result<Self, ValidationError> {
        let slots = parse_slots(slots, INPUT_SLOTS)?;
        if slots < 1 {
            return Err(ValidationError::below_minimum(INPUT_SLOTS, 1, slots));
        }
        Ok(Self {
            title: required_text(title, INPUT_TITLE)?,
            body: required_text(body, INPUT_BODY)?,
            slots,
        })
    }
}

/// Validated fields of a party create/edit submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartyInput {
    pub title: String,
    pub body: String,
    pub tank_slots: u32,
    pub attacker_slots: u32,
    pub healer_slots: u32,
}

impl PartyInput {
    /// Validates raw form values.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if title or body is blank after trimming
    /// - `InvalidFormat` if any slot count is not an integer ≥ 0
    /// - `BelowMinimum` if all three capacities are zero
    pub fn parse(
        title: &str,
        body: &str,
        tank_slots: &str,
        attacker_slots: &str,
        healer_slots: &str,
    ) -> Result<Self, ValidationError> {
        let title = required_text(title, INPUT_TITLE)?;
        let body = required_text(body, INPUT_BODY)?;
        let tank_slots = parse_slots(tank_slots, INPUT_TANK_SLOTS)?;
        let attacker_slots = parse_slots(attacker_slots, INPUT_ATTACKER_SLOTS)?;
        let healer_slots = parse_slots(healer_slots, INPUT_HEALER_SLOTS)?;
        // an overflowing sum cannot be zero, so only Some(0) fails
        let total = tank_slots
            .checked_add(attacker_slots)
            .and_then(|sum| sum.checked_add(healer_slots));
        if total == Some(0) {
            return Err(ValidationError::below_minimum("total slots", 1, 0));
        }
        Ok(Self {
            title,
            body,
            tank_slots,
            attacker_slots,
            healer_slots,
        })
    }
}

fn required_text(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

/// Parses a slot count, accepting fullwidth digits from IME input.
fn parse_slots(value: &str, field: &'static str) -> Result<u32, ValidationError> {
    let normalized = normalize_digits(value.trim());
    if normalized.is_empty() || !normalized.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            field,
            "expected a whole number",
        ));
    }
    normalized
        .parse()
        .map_err(|_| ValidationError::invalid_format(field, "number too large"))
}

/// Maps fullwidth digits (U+FF10–U+FF19) onto their ASCII counterparts.
fn normalize_digits(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            '０'..='９' => char::from(b'0' + (c as u32 - '０' as u32) as u8),
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::SessionStatus;

    fn owner() -> UserId {
        UserId::new("owner-1").unwrap()
    }

    fn message() -> MessageId {
        MessageId::new("msg-1").unwrap()
    }

    // Form-id codec

    #[test]
    fn create_form_id_round_trips() {
        let form = recruit_create_form(&owner());
        assert_eq!(
            parse_recruit_form_id(&form.form_id),
            Some(FormTarget::Create { owner: owner() })
        );
    }

    #[test]
    fn edit_form_id_round_trips() {
        let state = Recruitment::open(owner(), "t".into(), "b".into(), 2);
        let form = recruit_edit_form(&state, &message());
        assert_eq!(
            parse_recruit_form_id(&form.form_id),
            Some(FormTarget::Edit {
                owner: owner(),
                message: message()
            })
        );
    }

    #[test]
    fn party_form_ids_do_not_cross_families() {
        let form = party_create_form(&owner());
        assert_eq!(parse_recruit_form_id(&form.form_id), None);
        assert!(parse_party_form_id(&form.form_id).is_some());
    }

    #[test]
    fn notify_form_id_round_trips() {
        let form = notify_compose_form(&owner(), &message());
        assert_eq!(
            parse_notify_form_id(&form.form_id),
            Some((owner(), message()))
        );
    }

    #[test]
    fn malformed_form_ids_decode_to_none() {
        assert_eq!(parse_recruit_form_id("recruit-form:"), None);
        assert_eq!(parse_recruit_form_id("recruit-edit:owner-1"), None);
        assert_eq!(parse_recruit_form_id("recruit-edit:owner-1:"), None);
        assert_eq!(parse_notify_form_id("recruit-notify-form:owner-1"), None);
        assert_eq!(parse_recruit_form_id("something-else:owner-1"), None);
    }

    // Edit form pre-fill

    #[test]
    fn edit_form_is_seeded_from_state() {
        let mut state = Recruitment::open(owner(), "Raid".into(), "Bring food".into(), 4);
        state.status = SessionStatus::Closed;
        let form = recruit_edit_form(&state, &message());
        let initial: Vec<Option<&str>> =
            form.inputs.iter().map(|i| i.initial.as_deref()).collect();
        assert_eq!(initial, vec![Some("4"), Some("Raid"), Some("Bring food")]);
    }

    #[test]
    fn party_edit_form_carries_all_capacities() {
        let state = PartyRecruitment::open(owner(), "t".into(), "b".into(), 1, 2, 3);
        let form = party_edit_form(&state, &message());
        let slots: Vec<Option<&str>> = form
            .inputs
            .iter()
            .skip(2)
            .map(|i| i.initial.as_deref())
            .collect();
        assert_eq!(slots, vec![Some("1"), Some("2"), Some("3")]);
    }

    // Validation

    #[test]
    fn recruit_input_trims_text() {
        let input = RecruitInput::parse("  Raid  ", " details\n", "3").unwrap();
        assert_eq!(input.title, "Raid");
        assert_eq!(input.body, "details");
        assert_eq!(input.slots, 3);
    }

    #[test]
    fn recruit_input_rejects_zero_slots() {
        assert!(RecruitInput::parse("t", "b", "0").is_err());
    }

    #[test]
    fn recruit_input_rejects_blank_title_and_body() {
        assert!(RecruitInput::parse("  ", "b", "1").is_err());
        assert!(RecruitInput::parse("t", "\n", "1").is_err());
    }

    #[test]
    fn recruit_input_rejects_non_numeric_slots() {
        for bad in ["three", "-1", "+2", "2.5", ""] {
            assert!(RecruitInput::parse("t", "b", bad).is_err(), "{bad:?}");
        }
    }

    #[test]
    fn fullwidth_digits_are_accepted() {
        let input = RecruitInput::parse("t", "b", "３").unwrap();
        assert_eq!(input.slots, 3);
    }

    #[test]
    fn party_input_allows_zero_in_one_pool() {
        let input = PartyInput::parse("t", "b", "0", "2", "1").unwrap();
        assert_eq!(input.tank_slots, 0);
    }

    #[test]
    fn party_input_rejects_all_zero_capacities() {
        assert!(PartyInput::parse("t", "b", "0", "0", "0").is_err());
    }

    #[test]
    fn party_input_accepts_capacities_summing_past_the_u32_ceiling() {
        let max = u32::MAX.to_string();
        let input = PartyInput::parse("t", "b", &max, &max, "1").unwrap();
        assert_eq!(input.tank_slots, u32::MAX);
        assert_eq!(input.attacker_slots, u32::MAX);
    }
}
