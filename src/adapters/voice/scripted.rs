//! Scripted voice for tests and demos.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;

use crate::ports::{TranscriptEvent, VoiceError, VoiceIo};

/// Plays back queued transcript batches, one batch per `start_listening`.
///
/// Once the queue is empty, listening fails with `VoiceError::Closed`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedVoice {
    batches: Arc<Mutex<VecDeque<Vec<TranscriptEvent>>>>,
    spoken: Arc<Mutex<Vec<String>>>,
    listens: Arc<Mutex<usize>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl ScriptedVoice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues an utterance the way a recognizer reports it: interim, final, silence.
    pub fn with_utterance(self, text: impl Into<String>) -> Self {
        let text = text.into();
        let interim = text.split_whitespace().next().unwrap_or_default().to_string();
        self.with_events(vec![
            TranscriptEvent::Interim(interim),
            TranscriptEvent::Final(text),
            TranscriptEvent::Silence,
        ])
    }

    /// Queues a raw batch of events.
    pub fn with_events(self, events: Vec<TranscriptEvent>) -> Self {
        lock(&self.batches).push_back(events);
        self
    }

    /// Everything passed to `speak`, in order.
    pub fn spoken(&self) -> Vec<String> {
        lock(&self.spoken).clone()
    }

    pub fn listen_count(&self) -> usize {
        *lock(&self.listens)
    }

    pub fn remaining(&self) -> usize {
        lock(&self.batches).len()
    }
}

#[async_trait]
impl VoiceIo for ScriptedVoice {
    async fn speak(&self, text: &str) -> Result<(), VoiceError> {
        lock(&self.spoken).push(text.to_string());
        Ok(())
    }

    async fn start_listening(&self) -> Result<mpsc::Receiver<TranscriptEvent>, VoiceError> {
        let batch = lock(&self.batches).pop_front().ok_or(VoiceError::Closed)?;
        *lock(&self.listens) += 1;

        let (tx, rx) = mpsc::channel(batch.len().max(1));
        for event in batch {
            // Capacity covers the batch, so this never waits.
            let _ = tx.try_send(event);
        }
        Ok(rx)
    }

    async fn stop_listening(&self) -> Result<(), VoiceError> {
        Ok(())
    }
}
