//! Turns a voice transcript stream into one utterance.

use std::time::Duration;

use crate::ports::{TranscriptEvent, VoiceError, VoiceIo};

/// A final transcript longer than this ends the turn straight away.
pub const MIN_FINAL_CHARS: usize = 5;

/// Longest a single recording may run.
pub const MAX_RECORDING: Duration = Duration::from_secs(60);

/// Listens until the user has said something.
///
/// The turn ends on a final result longer than [`MIN_FINAL_CHARS`], on
/// silence once anything has been heard, when the channel closes, or after
/// `max_recording`. Returns `None` if nothing usable was heard. A closed
/// channel with nothing heard is `VoiceError::Closed`.
pub async fn listen_for_utterance(
    voice: &dyn VoiceIo,
    max_recording: Duration,
) -> Result<Option<String>, VoiceError> {
    let mut events = voice.start_listening().await?;
    let mut transcript = String::new();
    let mut closed = false;

    let outcome = tokio::time::timeout(max_recording, async {
        while let Some(event) = events.recv().await {
            match event {
                TranscriptEvent::Interim(_) => {}
                TranscriptEvent::Final(text) => {
                    transcript = text.trim().to_string();
                    if transcript.chars().count() > MIN_FINAL_CHARS {
                        return Ok(());
                    }
                }
                TranscriptEvent::Silence => {
                    if !transcript.is_empty() {
                        return Ok(());
                    }
                }
                TranscriptEvent::Error(message) => return Err(VoiceError::Recognition(message)),
            }
        }
        closed = true;
        Ok(())
    })
    .await;

    voice.stop_listening().await?;

    match outcome {
        Ok(Err(e)) => Err(e),
        Ok(Ok(())) if closed && transcript.is_empty() => Err(VoiceError::Closed),
        Ok(Ok(())) => Ok(Some(transcript).filter(|t| !t.is_empty())),
        Err(_) => {
            tracing::debug!(heard = !transcript.is_empty(), "Recording hit its time cap");
            Ok(Some(transcript).filter(|t| !t.is_empty()))
        }
    }
}
