//! GetOnboardingStateHandler - Query handler for a session snapshot.

use std::sync::Arc;

use super::error::OnboardingServiceError;
use crate::domain::foundation::SessionId;
use crate::domain::onboarding::SessionSnapshot;
use crate::ports::{Clock, OnboardingSessionStore};

/// Query for the current state of a session.
#[derive(Debug, Clone, Copy)]
pub struct GetOnboardingStateQuery {
    pub session_id: SessionId,
}

/// Handler for state queries. Waits for an in-flight turn to finish.
pub struct GetOnboardingStateHandler {
    store: Arc<dyn OnboardingSessionStore>,
    clock: Arc<dyn Clock>,
}

impl GetOnboardingStateHandler {
    pub fn new(store: Arc<dyn OnboardingSessionStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    pub async fn handle(
        &self,
        query: GetOnboardingStateQuery,
    ) -> Result<SessionSnapshot, OnboardingServiceError> {
        let shared = self.store.get(query.session_id).await?;
        let session = shared.lock().await;
        Ok(session.snapshot(self.clock.now()))
    }
}
