//! SubmitUtteranceHandler - Command handler for one conversational turn.
//!
//! The session lock is held for the whole turn, generation included. A
//! second turn on the same session is rejected instead of queued.

use std::sync::Arc;

use super::error::OnboardingServiceError;
use super::response_generator::ResponseGenerator;
use crate::domain::foundation::{Percentage, SessionId};
use crate::domain::onboarding::{
    AIResponse, CompletionReason, MandatoryField, OnboardingError, OnboardingPhase,
};
use crate::ports::{Clock, OnboardingSessionStore};

/// Command carrying one user utterance.
#[derive(Debug, Clone)]
pub struct SubmitUtteranceCommand {
    pub session_id: SessionId,
    pub text: String,
}

/// Result of a processed turn.
#[derive(Debug, Clone)]
pub struct SubmitUtteranceResult {
    pub response: AIResponse,
    pub phase: OnboardingPhase,
    pub newly_collected: Vec<MandatoryField>,
    pub missing_fields: Vec<MandatoryField>,
    pub remaining_secs: u64,
    pub progress: Percentage,
    /// Set when the caller should complete the session now.
    pub completion_due: Option<CompletionReason>,
}

/// Handler for conversational turns.
pub struct SubmitUtteranceHandler {
    store: Arc<dyn OnboardingSessionStore>,
    clock: Arc<dyn Clock>,
    generator: ResponseGenerator,
}

impl SubmitUtteranceHandler {
    pub fn new(
        store: Arc<dyn OnboardingSessionStore>,
        clock: Arc<dyn Clock>,
        generator: ResponseGenerator,
    ) -> Self {
        Self {
            store,
            clock,
            generator,
        }
    }

    pub async fn handle(
        &self,
        cmd: SubmitUtteranceCommand,
    ) -> Result<SubmitUtteranceResult, OnboardingServiceError> {
        let shared = self.store.get(cmd.session_id).await?;
        let mut session = shared
            .try_lock()
            .map_err(|_| OnboardingError::TurnInProgress)?;

        let outcome = session.process_utterance(&cmd.text, self.clock.now())?;
        let context = session.history().to_context_json();
        let response = self
            .generator
            .generate(session.id(), &outcome, &context)
            .await;

        // Generation takes time; re-read the clock for what we report back.
        let now = self.clock.now();

        Ok(SubmitUtteranceResult {
            response,
            phase: session.phase(),
            newly_collected: outcome.newly_collected,
            missing_fields: outcome.missing_fields,
            remaining_secs: session.remaining_time(now).as_secs(),
            progress: session.time_progress(now),
            completion_due: session.completion_due(now),
        })
    }
}
