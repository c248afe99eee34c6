//! Recruit Board - Chat-Native Recruitment Sessions
//!
//! This crate implements recruitment sessions whose only durable state is
//! the rendered chat message itself: buttons carry self-describing tokens,
//! every press re-reads the live message, and every accepted transition is
//! one in-place rewrite.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
