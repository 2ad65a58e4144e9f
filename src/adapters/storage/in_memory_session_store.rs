//! In-Memory Session Store Adapter
//!
//! Live onboarding sessions keyed by ID. Sessions are discarded on
//! completion, so nothing here outlives the process. Clients that walk away
//! leave their session behind until `evict_abandoned` sweeps it.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

use crate::domain::foundation::{SessionId, Timestamp};
use crate::domain::onboarding::OnboardingSession;
use crate::ports::{OnboardingSessionStore, SessionStoreError, SharedSession};

/// In-memory storage for live sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionId, SharedSession>>>,
    capacity: Option<usize>,
}

impl InMemorySessionStore {
    /// Create a new, unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Refuse new sessions once `capacity` are live
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            sessions: Arc::default(),
            capacity: Some(capacity),
        }
    }

    /// Clear all stored sessions (useful for tests)
    pub async fn clear(&self) {
        self.sessions.write().await.clear();
    }
}

#[async_trait]
impl OnboardingSessionStore for InMemorySessionStore {
    async fn insert(&self, session: OnboardingSession) -> Result<SharedSession, SessionStoreError> {
        let id = session.id();
        let mut sessions = self.sessions.write().await;

        if sessions.contains_key(&id) {
            return Err(SessionStoreError::AlreadyExists(id));
        }
        if let Some(capacity) = self.capacity {
            if sessions.len() >= capacity {
                return Err(SessionStoreError::CapacityExceeded(capacity));
            }
        }

        let shared = Arc::new(Mutex::new(session));
        sessions.insert(id, Arc::clone(&shared));
        Ok(shared)
    }

    async fn get(&self, id: SessionId) -> Result<SharedSession, SessionStoreError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(SessionStoreError::NotFound(id))
    }

    async fn remove(&self, id: SessionId) -> Result<(), SessionStoreError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(SessionStoreError::NotFound(id))
    }

    async fn evict_abandoned(&self, now: Timestamp, grace: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        // A locked session is mid-turn; leave it for the next sweep.
        sessions.retain(|_, shared| match shared.try_lock() {
            Ok(session) => !session.is_abandoned(now, grace),
            Err(_) => true,
        });

        before - sessions.len()
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;
    use crate::domain::onboarding::{OnboardingPolicy, QuestionScript};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const START: u64 = 1_700_000_000;

    fn session() -> OnboardingSession {
        session_at(START)
    }

    fn session_at(secs: u64) -> OnboardingSession {
        OnboardingSession::start(
            QuestionScript::standard(),
            OnboardingPolicy::default(),
            StdRng::seed_from_u64(1),
            Timestamp::from_unix_secs(secs),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn insert_then_get_returns_same_session() {
        let store = InMemorySessionStore::new();
        let session = session();
        let id = session.id();

        let inserted = store.insert(session).await.unwrap();
        let fetched = store.get(id).await.unwrap();

        assert!(Arc::ptr_eq(&inserted, &fetched));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn get_unknown_is_not_found() {
        let store = InMemorySessionStore::new();
        let id = SessionId::new();
        assert!(matches!(
            store.get(id).await,
            Err(SessionStoreError::NotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn remove_discards_session() {
        let store = InMemorySessionStore::new();
        let session = session();
        let id = session.id();
        store.insert(session).await.unwrap();

        store.remove(id).await.unwrap();

        assert_eq!(store.len().await, 0);
        assert!(store.remove(id).await.is_err());
    }

    #[tokio::test]
    async fn capacity_is_enforced() {
        let store = InMemorySessionStore::with_capacity(1);
        store.insert(session()).await.unwrap();

        assert!(matches!(
            store.insert(session()).await,
            Err(SessionStoreError::CapacityExceeded(1))
        ));
    }

    #[tokio::test]
    async fn evict_abandoned_drops_only_overdue_sessions() {
        let store = InMemorySessionStore::new();
        let stale = session_at(START);
        let stale_id = stale.id();
        let fresh = session_at(START + 400);
        let fresh_id = fresh.id();
        store.insert(stale).await.unwrap();
        store.insert(fresh).await.unwrap();

        // 300 s limit plus 120 s grace puts the first session past due.
        let now = Timestamp::from_unix_secs(START + 420);
        let evicted = store.evict_abandoned(now, Duration::from_secs(120)).await;

        assert_eq!(evicted, 1);
        assert!(store.get(stale_id).await.is_err());
        assert!(store.get(fresh_id).await.is_ok());
    }

    #[tokio::test]
    async fn evict_abandoned_skips_session_mid_turn() {
        let store = InMemorySessionStore::new();
        let shared = store.insert(session()).await.unwrap();
        let _turn = shared.lock().await;

        let now = Timestamp::from_unix_secs(START + 3_600);
        assert_eq!(store.evict_abandoned(now, Duration::ZERO).await, 0);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn eviction_frees_capacity() {
        let store = InMemorySessionStore::with_capacity(1);
        store.insert(session()).await.unwrap();

        let now = Timestamp::from_unix_secs(START + 600);
        store.evict_abandoned(now, Duration::from_secs(60)).await;

        assert!(store.insert(session_at(START + 600)).await.is_ok());
    }

    #[tokio::test]
    async fn clear_empties_store() {
        let store = InMemorySessionStore::new();
        store.insert(session()).await.unwrap();
        store.clear().await;
        assert_eq!(store.len().await, 0);
    }
}
