//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AIProvider` - Optional model used to phrase replies
//! - `VoiceIo` - Speech recognition and synthesis
//! - `Clock` - Current time, injected so tests can control it
//! - `OnboardingSessionStore` - Live sessions for the HTTP surface

mod ai_provider;
mod clock;
mod session_store;
mod voice;

pub use ai_provider::{
    AIError, AIProvider, GeneratedReply, ReplyRequest, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE,
};
pub use clock::Clock;
pub use session_store::{OnboardingSessionStore, SessionStoreError, SharedSession};
pub use voice::{TranscriptEvent, VoiceError, VoiceIo};
