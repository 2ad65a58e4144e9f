//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, state machine)
//! - `onboarding` - Conversation engine, analyzers and question script

pub mod foundation;
pub mod onboarding;
