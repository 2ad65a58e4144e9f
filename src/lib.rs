//! Sparks Onboarding - Conversational onboarding engine
//!
//! This crate runs the onboarding conversation for new users: a scripted
//! question sequence that opens into free conversation, regex-based entity
//! extraction for the mandatory profile fields, keyword-based personality and
//! interest inference, and a time budget that forces completion.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
