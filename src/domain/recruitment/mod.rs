//! Recruitment session domain: state shapes, the transition engine, and
//! the two wire codecs (control tokens and the rendered message).

mod actions;
mod engine;
pub mod forms;
mod render;
mod state;
mod token;

pub use actions::{NotifyAction, PartyAction, RecruitAction};
pub use render::{
    decode_party, decode_recruitment, encode_party, encode_recruitment, Appearance, ControlSpec,
    ControlStyle, Field, RenderedMessage,
};
pub use state::{PartyRecruitment, Recruitment, Role};
pub use token::{NotifyToken, PartyToken, RecruitToken};
