//! StartOnboardingHandler - Command handler for starting onboarding sessions.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;

use super::error::OnboardingServiceError;
use crate::domain::foundation::SessionId;
use crate::domain::onboarding::{
    OnboardingPolicy, OnboardingQuestion, OnboardingSession, QuestionScript,
};
use crate::ports::{Clock, OnboardingSessionStore};

/// Command to start a new onboarding session.
#[derive(Debug, Clone, Default)]
pub struct StartOnboardingCommand {
    /// Seed for the session's random source; falls back to the configured seed.
    pub seed: Option<u64>,
    /// Overrides the configured time limit.
    pub time_limit_secs: Option<u64>,
}

/// Result of starting a session.
#[derive(Debug, Clone)]
pub struct StartOnboardingResult {
    pub session_id: SessionId,
    /// The first question to ask.
    pub question: OnboardingQuestion,
    pub time_limit_secs: u64,
    pub ai_enabled: bool,
}

/// Handler for starting sessions.
pub struct StartOnboardingHandler {
    store: Arc<dyn OnboardingSessionStore>,
    clock: Arc<dyn Clock>,
    script: Arc<QuestionScript>,
    policy: OnboardingPolicy,
    default_seed: Option<u64>,
    ai_enabled: bool,
    abandoned_grace: Duration,
}

/// Default time an unfinished session is kept past its limit.
pub const DEFAULT_ABANDONED_GRACE: Duration = Duration::from_secs(120);

impl StartOnboardingHandler {
    pub fn new(
        store: Arc<dyn OnboardingSessionStore>,
        clock: Arc<dyn Clock>,
        policy: OnboardingPolicy,
    ) -> Self {
        Self {
            store,
            clock,
            script: QuestionScript::standard(),
            policy,
            default_seed: None,
            ai_enabled: false,
            abandoned_grace: DEFAULT_ABANDONED_GRACE,
        }
    }

    pub fn with_script(mut self, script: Arc<QuestionScript>) -> Self {
        self.script = script;
        self
    }

    pub fn with_default_seed(mut self, seed: Option<u64>) -> Self {
        self.default_seed = seed;
        self
    }

    /// Reported back to clients; generation itself is the submit handler's concern.
    pub fn with_ai_enabled(mut self, enabled: bool) -> Self {
        self.ai_enabled = enabled;
        self
    }

    /// Sessions this far past their time limit are swept before each start.
    pub fn with_abandoned_grace(mut self, grace: Duration) -> Self {
        self.abandoned_grace = grace;
        self
    }

    pub async fn handle(
        &self,
        cmd: StartOnboardingCommand,
    ) -> Result<StartOnboardingResult, OnboardingServiceError> {
        let mut policy = self.policy;
        if let Some(secs) = cmd.time_limit_secs {
            policy = policy.with_time_limit(secs);
        }

        let now = self.clock.now();
        let evicted = self.store.evict_abandoned(now, self.abandoned_grace).await;
        if evicted > 0 {
            tracing::info!(evicted, "Evicted abandoned onboarding sessions");
        }

        let rng = match cmd.seed.or(self.default_seed) {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let session = OnboardingSession::start(
            Arc::clone(&self.script),
            policy,
            rng,
            now,
        )?;
        let session_id = session.id();
        let question = self.script.initial().clone();

        self.store.insert(session).await?;

        tracing::info!(
            session_id = %session_id,
            time_limit_secs = policy.time_limit_secs,
            ai_enabled = self.ai_enabled,
            "Onboarding session started"
        );

        Ok(StartOnboardingResult {
            session_id,
            question,
            time_limit_secs: policy.time_limit_secs,
            ai_enabled: self.ai_enabled,
        })
    }
}
