//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Text-completion providers (OpenAI, Anthropic, mock)
//! - `clock` - System and manual clocks
//! - `http` - REST API over axum
//! - `storage` - Live session store
//! - `voice` - Terminal and scripted voice I/O

pub mod ai;
pub mod clock;
pub mod http;
pub mod storage;
pub mod voice;

pub use ai::{provider_from_config, AnthropicProvider, MockAIProvider, OpenAIProvider};
pub use clock::{ManualClock, SystemClock};
pub use storage::InMemorySessionStore;
pub use voice::{ScriptedVoice, TerminalVoice};
