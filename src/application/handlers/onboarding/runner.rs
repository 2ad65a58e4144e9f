//! OnboardingRunner - Drives one session over a voice channel.
//!
//! Speak the current question, listen, process the answer, speak the reply.
//! If the reply carries a next question, ask it; otherwise complete when the
//! session says completion is due, or keep listening in open conversation.
//! An expired clock forces completion before the next listen.

use std::sync::Arc;
use std::time::Duration;

use super::listen::{listen_for_utterance, MAX_RECORDING};
use super::response_generator::ResponseGenerator;
use crate::domain::onboarding::{
    CompletionReason, OnboardingError, OnboardingSession, UserProfile,
};
use crate::ports::{Clock, VoiceError, VoiceIo};

pub const TIME_UP_MESSAGE: &str =
    "Time's up! Let's finish setting up your profile with what we know so far.";
pub const PROFILE_READY_MESSAGE: &str =
    "Profile created! Your profile has been successfully set up.";

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error(transparent)]
    Voice(#[from] VoiceError),

    #[error(transparent)]
    Onboarding(#[from] OnboardingError),
}

/// How a run ended.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub profile: UserProfile,
    pub reason: CompletionReason,
    pub turns: u32,
}

pub struct OnboardingRunner {
    voice: Arc<dyn VoiceIo>,
    clock: Arc<dyn Clock>,
    generator: ResponseGenerator,
    max_recording: Duration,
}

impl OnboardingRunner {
    pub fn new(voice: Arc<dyn VoiceIo>, clock: Arc<dyn Clock>, generator: ResponseGenerator) -> Self {
        Self {
            voice,
            clock,
            generator,
            max_recording: MAX_RECORDING,
        }
    }

    pub fn with_max_recording(mut self, max_recording: Duration) -> Self {
        self.max_recording = max_recording;
        self
    }

    /// Runs the session to completion.
    ///
    /// Closed voice input completes the session as `Requested`. Speech
    /// playback failures are logged and skipped.
    pub async fn run(&self, session: &mut OnboardingSession) -> Result<RunOutcome, RunnerError> {
        if let Some(question) = session.current_question() {
            let text = question.text.clone();
            self.say(&text).await;
        }

        loop {
            if session.is_time_expired(self.clock.now()) {
                self.say(TIME_UP_MESSAGE).await;
                return self.finish(session, CompletionReason::TimeExpired).await;
            }

            let utterance = match listen_for_utterance(self.voice.as_ref(), self.max_recording).await
            {
                Ok(Some(text)) => text,
                Ok(None) => continue,
                Err(VoiceError::Closed) => {
                    tracing::info!(session_id = %session.id(), "Voice input closed");
                    return self.finish(session, CompletionReason::Requested).await;
                }
                Err(VoiceError::Recognition(message)) => {
                    tracing::warn!(session_id = %session.id(), %message, "Speech recognition failed");
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let outcome = session.process_utterance(&utterance, self.clock.now())?;
            let context = session.history().to_context_json();
            let response = self
                .generator
                .generate(session.id(), &outcome, &context)
                .await;

            self.say(&response.text).await;

            if let Some(next) = &response.next_question {
                self.say(&next.text).await;
                continue;
            }

            if let Some(reason) = session.completion_due(self.clock.now()) {
                if reason == CompletionReason::TimeExpired {
                    self.say(TIME_UP_MESSAGE).await;
                }
                return self.finish(session, reason).await;
            }
        }
    }

    async fn finish(
        &self,
        session: &mut OnboardingSession,
        reason: CompletionReason,
    ) -> Result<RunOutcome, RunnerError> {
        let profile = session.complete(reason, self.clock.now())?;
        self.say(PROFILE_READY_MESSAGE).await;
        Ok(RunOutcome {
            profile,
            reason,
            turns: session.turn_count(),
        })
    }

    async fn say(&self, text: &str) {
        if let Err(e) = self.voice.speak(text).await {
            tracing::warn!(error = %e, "Speech playback failed");
        }
    }
}
