//! Application layer - session coordinators and dispatch.

pub mod handlers;

pub use handlers::{
    Activation, ActivationHandler, ActivationRouter, FormSubmission, Outcome, PartyButtonHandler,
    PartyFormHandler, RecruitButtonHandler, RecruitFormHandler, RecruitNotifyHandler,
};
