//! Scripted provider for tests.
//!
//! Replies are queued and consumed in order; once the queue is empty every
//! call gets [`DEFAULT_MOCK_REPLY`]. Clones share the queue and the request
//! log, so a test can keep a handle after giving one to a generator.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{AIError, AIProvider, GeneratedReply, ReplyRequest};

pub const DEFAULT_MOCK_REPLY: &str = "Mock reply";

const MOCK_MODEL: &str = "mock-model-1";

#[derive(Debug, Clone, Default)]
pub struct MockAIProvider {
    queue: Arc<Mutex<VecDeque<Result<String, AIError>>>>,
    delay: Duration,
    requests: Arc<Mutex<Vec<ReplyRequest>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockAIProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, text: impl Into<String>) -> Self {
        lock(&self.queue).push_back(Ok(text.into()));
        self
    }

    pub fn with_error(self, error: AIError) -> Self {
        lock(&self.queue).push_back(Err(error));
        self
    }

    /// Latency added to every call.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<ReplyRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl AIProvider for MockAIProvider {
    async fn generate_reply(&self, request: ReplyRequest) -> Result<GeneratedReply, AIError> {
        lock(&self.requests).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next = lock(&self.queue)
            .pop_front()
            .unwrap_or_else(|| Ok(DEFAULT_MOCK_REPLY.to_string()));
        next.map(|text| GeneratedReply::new(text, MOCK_MODEL))
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn model(&self) -> &str {
        MOCK_MODEL
    }
}
