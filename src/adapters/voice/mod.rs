//! Voice I/O Adapters
//!
//! - **TerminalVoice** - Reads typed lines and prints replies; stands in for speech
//! - **ScriptedVoice** - Plays back canned transcripts and records what was spoken (testing)

mod scripted;
mod terminal;

pub use scripted::ScriptedVoice;
pub use terminal::{LineVoice, TerminalVoice};
