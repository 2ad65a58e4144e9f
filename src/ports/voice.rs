//! Voice I/O Port - Speech recognition and synthesis.
//!
//! The real implementation (browser speech APIs, a cloud service) lives
//! outside this crate. The engine only consumes final transcript text.

use async_trait::async_trait;
use tokio::sync::mpsc;

/// Something the recognizer heard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptEvent {
    /// Partial transcript; may still change.
    Interim(String),
    /// Settled transcript for the current utterance.
    Final(String),
    /// The speaker stopped talking.
    Silence,
    /// Recognition failed.
    Error(String),
}

/// Errors that can occur during voice operations
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("Voice capability not supported: {0}")]
    Unsupported(String),

    #[error("Speech synthesis failed: {0}")]
    Synthesis(String),

    #[error("Speech recognition failed: {0}")]
    Recognition(String),

    #[error("Voice input closed")]
    Closed,
}

/// Port for speech-to-text and text-to-speech.
#[async_trait]
pub trait VoiceIo: Send + Sync {
    /// Plays `text` and returns when playback has finished.
    async fn speak(&self, text: &str) -> Result<(), VoiceError>;

    /// Starts recognition. Events arrive on the returned channel until
    /// `stop_listening` is called or the input ends.
    async fn start_listening(&self) -> Result<mpsc::Receiver<TranscriptEvent>, VoiceError>;

    /// Stops recognition. Calling it while not listening is a no-op.
    async fn stop_listening(&self) -> Result<(), VoiceError>;
}
