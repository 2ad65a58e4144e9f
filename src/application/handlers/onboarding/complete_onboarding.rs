//! CompleteOnboardingHandler - Command handler for finishing a session.
//!
//! Builds the profile (placeholders fill any gaps) and discards the session.

use std::sync::Arc;

use super::error::OnboardingServiceError;
use crate::domain::foundation::SessionId;
use crate::domain::onboarding::{CompletionReason, OnboardingError, UserProfile};
use crate::ports::{Clock, OnboardingSessionStore};

/// Command to complete a session.
#[derive(Debug, Clone, Copy)]
pub struct CompleteOnboardingCommand {
    pub session_id: SessionId,
    /// Defaults to whatever completion the session reports as due, else `Requested`.
    pub reason: Option<CompletionReason>,
}

/// Result of completion.
#[derive(Debug, Clone)]
pub struct CompleteOnboardingResult {
    pub profile: UserProfile,
    pub reason: CompletionReason,
}

/// Handler for completing sessions.
pub struct CompleteOnboardingHandler {
    store: Arc<dyn OnboardingSessionStore>,
    clock: Arc<dyn Clock>,
}

impl CompleteOnboardingHandler {
    pub fn new(store: Arc<dyn OnboardingSessionStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn handle(
        &self,
        cmd: CompleteOnboardingCommand,
    ) -> Result<CompleteOnboardingResult, OnboardingServiceError> {
        let shared = self.store.get(cmd.session_id).await?;
        let profile_and_reason = {
            let mut session = shared
                .try_lock()
                .map_err(|_| OnboardingError::TurnInProgress)?;
            let now = self.clock.now();
            let reason = cmd
                .reason
                .or_else(|| session.completion_due(now))
                .unwrap_or(CompletionReason::Requested);
            (session.complete(reason, now)?, reason)
        };

        self.store.remove(cmd.session_id).await?;

        let (profile, reason) = profile_and_reason;
        Ok(CompleteOnboardingResult { profile, reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::ManualClock;
    use crate::adapters::storage::InMemorySessionStore;
    use crate::domain::foundation::Timestamp;
    use crate::domain::onboarding::{OnboardingPolicy, OnboardingSession, QuestionScript};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;

    async fn setup(
        answers: &[&str],
    ) -> (Arc<InMemorySessionStore>, Arc<ManualClock>, SessionId) {
        let clock = Arc::new(ManualClock::new(Timestamp::from_unix_secs(1_700_000_000)));
        let store = Arc::new(InMemorySessionStore::new());
        let mut session = OnboardingSession::start(
            QuestionScript::standard(),
            OnboardingPolicy::default(),
            StdRng::seed_from_u64(9),
            clock.now(),
        )
        .unwrap();
        for answer in answers {
            session.process_utterance(answer, clock.now()).unwrap();
        }
        let id = session.id();
        store.insert(session).await.unwrap();
        (store, clock, id)
    }

    #[tokio::test]
    async fn builds_profile_from_answers_and_discards_session() {
        let (store, clock, id) = setup(&["my name is Alex", "I'm 15", "I live in Boston"]).await;
        let handler = CompleteOnboardingHandler::new(store.clone(), clock);

        let result = handler
            .handle(CompleteOnboardingCommand {
                session_id: id,
                reason: None,
            })
            .await
            .unwrap();

        assert_eq!(result.profile.name, "Alex");
        assert_eq!(result.profile.age, 15);
        assert_eq!(result.profile.location, "Boston");
        assert_eq!(result.reason, CompletionReason::Requested);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn expired_session_completes_with_defaults() {
        let (store, clock, id) = setup(&[]).await;
        clock.advance(Duration::from_secs(400));
        let handler = CompleteOnboardingHandler::new(store, clock);

        let result = handler
            .handle(CompleteOnboardingCommand {
                session_id: id,
                reason: None,
            })
            .await
            .unwrap();

        assert_eq!(result.reason, CompletionReason::TimeExpired);
        assert_eq!(result.profile.name, "User");
        assert_eq!(result.profile.age, 16);
        assert_eq!(result.profile.location, "Unknown");
    }

    #[tokio::test]
    async fn explicit_reason_wins() {
        let (store, clock, id) = setup(&[]).await;
        let result = CompleteOnboardingHandler::new(store, clock)
            .handle(CompleteOnboardingCommand {
                session_id: id,
                reason: Some(CompletionReason::TimeNearlyUp),
            })
            .await
            .unwrap();
        assert_eq!(result.reason, CompletionReason::TimeNearlyUp);
    }

    #[tokio::test]
    async fn second_completion_is_not_found() {
        let (store, clock, id) = setup(&[]).await;
        let handler = CompleteOnboardingHandler::new(store, clock);
        let cmd = CompleteOnboardingCommand {
            session_id: id,
            reason: None,
        };

        handler.handle(cmd).await.unwrap();
        assert!(matches!(
            handler.handle(cmd).await,
            Err(OnboardingServiceError::NotFound(_))
        ));
    }
}
