//! State codec: session state ⇄ rendered message payload.
//!
//! The rendered message is the only durable representation of a session,
//! so this codec is a wire protocol, not a view layer. Every literal in
//! this file is load-bearing: encode and decode share the same constants
//! and a drifting copy on either side silently bricks every session.
//!
//! Decode is fail-closed. A missing field, a foreign first line, or a
//! value that does not match its template exactly yields `None` — the
//! coordinator then leaves the message untouched rather than guessing.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionStatus, UserId};
use crate::domain::recruitment::{
    PartyAction, PartyRecruitment, PartyToken, RecruitAction, RecruitToken, Recruitment, Role,
};

const OPEN_MARKER: &str = "[RECRUITING]";
const CLOSED_MARKER: &str = "[CLOSED]";
const EMPTY_POOL: &str = "(no participants)";

const MEMBERS_FIELD: &str = "Members";
const REMAINING_FIELD: &str = "Open slots";
const REMAINING_PREFIX: &str = "Needs ";
const REMAINING_SUFFIX: &str = " more";

const TANK_LABEL: &str = "🛡️ Tanks";
const ATTACKER_LABEL: &str = "⚔️ Attackers";
const HEALER_LABEL: &str = "💚 Healers";

const DEFAULT_OPEN_IMAGE: &str = "https://static.recruit-board.dev/banner-open.png";
const DEFAULT_CLOSED_IMAGE: &str = "https://static.recruit-board.dev/banner-closed.png";

/// One named field of the rendered message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    pub name: String,
    pub value: String,
}

impl Field {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Visual style of a control, interpreted by the rendering collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ControlStyle {
    Primary,
    Secondary,
    Success,
    Danger,
}

/// One pressable control: a token plus presentation hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlSpec {
    pub token: String,
    pub label: String,
    pub style: ControlStyle,
    pub disabled: bool,
}

impl ControlSpec {
    fn new(token: String, label: &str, style: ControlStyle, disabled: bool) -> Self {
        Self {
            token,
            label: label.to_string(),
            style,
            disabled,
        }
    }
}

/// The complete rendered payload written to the message store.
///
/// `image_ref` and `controls` are derived from state on every encode and
/// never consumed on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedMessage {
    pub title: String,
    pub description: String,
    pub fields: Vec<Field>,
    pub image_ref: String,
    pub controls: Vec<Vec<ControlSpec>>,
}

impl RenderedMessage {
    fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn field_starting_with(&self, label: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name.starts_with(label))
    }
}

/// Status image references, overridable through configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appearance {
    pub open_image: String,
    pub closed_image: String,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            open_image: DEFAULT_OPEN_IMAGE.to_string(),
            closed_image: DEFAULT_CLOSED_IMAGE.to_string(),
        }
    }
}

impl Appearance {
    fn image_for(&self, status: SessionStatus) -> String {
        match status {
            SessionStatus::Open => self.open_image.clone(),
            SessionStatus::Closed => self.closed_image.clone(),
        }
    }
}

fn status_marker(status: SessionStatus) -> &'static str {
    match status {
        SessionStatus::Open => OPEN_MARKER,
        SessionStatus::Closed => CLOSED_MARKER,
    }
}

fn close_label(status: SessionStatus) -> &'static str {
    if status.is_open() {
        "Close"
    } else {
        "Reopen"
    }
}

fn render_pool(entries: &[String]) -> String {
    if entries.is_empty() {
        EMPTY_POOL.to_string()
    } else {
        entries.join("\n")
    }
}

fn parse_pool(value: &str) -> Vec<String> {
    if value.contains(EMPTY_POOL) {
        return Vec::new();
    }
    value
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Strict unsigned parse: ASCII digits only, no sign, no whitespace.
fn parse_count(digits: &str) -> Option<u32> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

fn split_description(description: &str) -> Option<(SessionStatus, String)> {
    let mut lines = description.lines();
    let status = match lines.next()?.trim() {
        OPEN_MARKER => SessionStatus::Open,
        CLOSED_MARKER => SessionStatus::Closed,
        _ => return None,
    };
    let body = lines.collect::<Vec<_>>().join("\n").trim().to_string();
    Some((status, body))
}

fn pool_field_name(label: &str, occupied: usize, capacity: u32) -> String {
    format!("{} ({}/{})", label, occupied, capacity)
}

/// Re-derives a pool's capacity from its rendered field name.
fn parse_pool_capacity(name: &str, label: &str) -> Option<u32> {
    let rest = name.strip_prefix(label)?.strip_prefix(" (")?.strip_suffix(')')?;
    let (occupied, capacity) = rest.split_once('/')?;
    parse_count(occupied)?;
    parse_count(capacity)
}

// ─────────────────────────────────────────────────────────────────────────
// Single-pool shape
// ─────────────────────────────────────────────────────────────────────────

/// Encodes a single-pool session into its rendered message.
pub fn encode_recruitment(state: &Recruitment, appearance: &Appearance) -> RenderedMessage {
    let disabled = !state.status.is_open();
    let token = |action: RecruitAction| RecruitToken::new(action, state.owner.clone()).encode();

    RenderedMessage {
        title: state.title.clone(),
        description: format!("{}\n{}", status_marker(state.status), state.body),
        fields: vec![
            Field::new(MEMBERS_FIELD, render_pool(&state.members)),
            Field::new(
                REMAINING_FIELD,
                format!("{}{}{}", REMAINING_PREFIX, state.remaining, REMAINING_SUFFIX),
            ),
        ],
        image_ref: appearance.image_for(state.status),
        controls: vec![
            vec![
                ControlSpec::new(token(RecruitAction::Join), "Join", ControlStyle::Primary, disabled),
                ControlSpec::new(token(RecruitAction::Cancel), "Leave", ControlStyle::Danger, disabled),
            ],
            vec![
                ControlSpec::new(
                    token(RecruitAction::Close),
                    close_label(state.status),
                    ControlStyle::Success,
                    false,
                ),
                ControlSpec::new(token(RecruitAction::Plus), "+1 slot", ControlStyle::Secondary, disabled),
                ControlSpec::new(token(RecruitAction::Minus), "-1 slot", ControlStyle::Secondary, disabled),
                ControlSpec::new(token(RecruitAction::Edit), "Edit", ControlStyle::Secondary, false),
                ControlSpec::new(token(RecruitAction::Notify), "📢 Notify", ControlStyle::Secondary, false),
            ],
        ],
    }
}

/// Decodes a rendered message back into a single-pool session.
///
/// The owner comes from the control token, not from the payload; a
/// message that does not match the wire format exactly yields `None`.
pub fn decode_recruitment(message: &RenderedMessage, owner: &UserId) -> Option<Recruitment> {
    let (status, body) = split_description(&message.description)?;

    let members_field = message.field(MEMBERS_FIELD)?;
    let remaining_field = message.field(REMAINING_FIELD)?;

    let remaining = parse_count(
        remaining_field
            .value
            .strip_prefix(REMAINING_PREFIX)?
            .strip_suffix(REMAINING_SUFFIX)?,
    )?;

    Some(Recruitment {
        owner: owner.clone(),
        title: message.title.clone(),
        body,
        members: parse_pool(&members_field.value),
        remaining,
        status,
    })
}

// ─────────────────────────────────────────────────────────────────────────
// Role-partitioned shape
// ─────────────────────────────────────────────────────────────────────────

fn role_label(role: Role) -> &'static str {
    match role {
        Role::Tank => TANK_LABEL,
        Role::Attacker => ATTACKER_LABEL,
        Role::Healer => HEALER_LABEL,
    }
}

/// Encodes a party session into its rendered message.
pub fn encode_party(state: &PartyRecruitment, appearance: &Appearance) -> RenderedMessage {
    let disabled = !state.status.is_open();
    let token = |action: PartyAction| PartyToken::new(action, state.owner.clone()).encode();

    let fields = Role::ALL
        .into_iter()
        .map(|role| {
            Field::new(
                pool_field_name(role_label(role), state.pool(role).len(), state.capacity(role)),
                render_pool(state.pool(role)),
            )
        })
        .collect();

    RenderedMessage {
        title: state.title.clone(),
        description: format!("{}\n{}", status_marker(state.status), state.body),
        fields,
        image_ref: appearance.image_for(state.status),
        controls: vec![
            vec![
                ControlSpec::new(
                    token(PartyAction::Join(Role::Tank)),
                    "🛡️ Tank",
                    ControlStyle::Primary,
                    disabled,
                ),
                ControlSpec::new(
                    token(PartyAction::Join(Role::Attacker)),
                    "⚔️ Attacker",
                    ControlStyle::Primary,
                    disabled,
                ),
                ControlSpec::new(
                    token(PartyAction::Join(Role::Healer)),
                    "💚 Healer",
                    ControlStyle::Primary,
                    disabled,
                ),
            ],
            vec![
                ControlSpec::new(token(PartyAction::Cancel), "Leave", ControlStyle::Danger, disabled),
                ControlSpec::new(
                    token(PartyAction::Close),
                    close_label(state.status),
                    ControlStyle::Success,
                    false,
                ),
                ControlSpec::new(token(PartyAction::Edit), "Edit", ControlStyle::Secondary, false),
            ],
        ],
    }
}

/// Decodes a rendered message back into a party session.
///
/// All three pool fields must be present and their names must carry a
/// parseable `(occupied/capacity)` suffix, or the whole decode fails.
pub fn decode_party(message: &RenderedMessage, owner: &UserId) -> Option<PartyRecruitment> {
    let (status, body) = split_description(&message.description)?;

    let tank_field = message.field_starting_with(TANK_LABEL)?;
    let attacker_field = message.field_starting_with(ATTACKER_LABEL)?;
    let healer_field = message.field_starting_with(HEALER_LABEL)?;

    let tank_slots = parse_pool_capacity(&tank_field.name, TANK_LABEL)?;
    let attacker_slots = parse_pool_capacity(&attacker_field.name, ATTACKER_LABEL)?;
    let healer_slots = parse_pool_capacity(&healer_field.name, HEALER_LABEL)?;

    Some(PartyRecruitment {
        owner: owner.clone(),
        title: message.title.clone(),
        body,
        tanks: parse_pool(&tank_field.value),
        attackers: parse_pool(&attacker_field.value),
        healers: parse_pool(&healer_field.value),
        tank_slots,
        attacker_slots,
        healer_slots,
        status,
    })
}
