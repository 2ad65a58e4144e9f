//! Session Store Port - Holds live onboarding sessions.
//!
//! Sessions live only as long as the onboarding run. Each one sits behind
//! its own async mutex so a turn, including any generation call, runs to
//! completion before the next one on the same session can start.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::onboarding::OnboardingSession;

/// A live session shared between the store and the handler running a turn.
pub type SharedSession = Arc<Mutex<OnboardingSession>>;

/// Errors that can occur during session store operations
#[derive(Debug, thiserror::Error)]
pub enum SessionStoreError {
    #[error("Onboarding session not found: {0}")]
    NotFound(SessionId),

    #[error("Onboarding session already exists: {0}")]
    AlreadyExists(SessionId),

    #[error("Session store is at capacity ({0} sessions)")]
    CapacityExceeded(usize),
}

/// Port for storing live onboarding sessions
#[async_trait]
pub trait OnboardingSessionStore: Send + Sync {
    /// Store a freshly started session.
    ///
    /// # Errors
    /// Returns `SessionStoreError::AlreadyExists` if the ID is taken
    async fn insert(&self, session: OnboardingSession) -> Result<SharedSession, SessionStoreError>;

    /// Look up a live session.
    ///
    /// # Errors
    /// Returns `SessionStoreError::NotFound` if no session has this ID
    async fn get(&self, id: SessionId) -> Result<SharedSession, SessionStoreError>;

    /// Drop a session, typically after completion.
    ///
    /// # Errors
    /// Returns `SessionStoreError::NotFound` if no session has this ID
    async fn remove(&self, id: SessionId) -> Result<(), SessionStoreError>;

    /// Drop sessions that are completed or past their time limit by more
    /// than `grace`. Sessions with a turn in flight are kept.
    ///
    /// Returns how many were dropped.
    async fn evict_abandoned(&self, now: Timestamp, grace: Duration) -> usize;

    /// Number of live sessions.
    async fn len(&self) -> usize;
}
