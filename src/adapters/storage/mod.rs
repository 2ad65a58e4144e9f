//! Storage Adapters
//!
//! Implementations of the OnboardingSessionStore port.
//!
//! - **InMemorySessionStore** - Keeps live sessions in a map for the life of the process

mod in_memory_session_store;

pub use in_memory_session_store::InMemorySessionStore;
