//! AI Provider Port - Optional model that phrases onboarding replies.
//!
//! The engine already knows what it wants to say next; a provider only turns
//! that into friendlier wording. A request is always the same three parts:
//! the Sparks persona, the conversation so far as JSON, and this turn's
//! instruction. Any failure is recoverable because the session keeps a
//! templated reply for every turn.

use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

use crate::domain::foundation::SessionId;

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 150;

/// Port for reply generation.
#[async_trait]
pub trait AIProvider: Send + Sync {
    /// Phrases one reply. A single attempt; the caller falls back on error.
    async fn generate_reply(&self, request: ReplyRequest) -> Result<GeneratedReply, AIError>;

    /// Short provider name for logs, e.g. "openai".
    fn name(&self) -> &'static str;

    fn model(&self) -> &str;
}

/// Everything a provider needs for one turn.
#[derive(Debug, Clone)]
pub struct ReplyRequest {
    pub session_id: SessionId,
    /// Correlates provider logs with the turn.
    pub trace_id: String,
    /// The Sparks persona.
    pub system_prompt: String,
    /// Question/answer history as JSON.
    pub context_json: String,
    /// What the reply should do this turn.
    pub instruction: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl ReplyRequest {
    pub fn new(
        session_id: SessionId,
        system_prompt: impl Into<String>,
        context_json: impl Into<String>,
        instruction: impl Into<String>,
    ) -> Self {
        Self {
            session_id,
            trace_id: Uuid::new_v4().to_string(),
            system_prompt: system_prompt.into(),
            context_json: context_json.into(),
            instruction: instruction.into(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    /// The context line sent ahead of the instruction.
    pub fn context_message(&self) -> String {
        format!("Context: {}", self.context_json)
    }
}

/// Text a provider produced for one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedReply {
    pub text: String,
    /// Model that answered, as reported by the provider.
    pub model: String,
    pub output_tokens: Option<u32>,
    /// The provider stopped at the token limit.
    pub truncated: bool,
}

impl GeneratedReply {
    pub fn new(text: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: model.into(),
            output_tokens: None,
            truncated: false,
        }
    }
}

/// Reasons a provider produced no reply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AIError {
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("rate limited")]
    RateLimited,

    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("network error: {0}")]
    Network(String),

    #[error("rejected request: {0}")]
    InvalidRequest(String),

    #[error("unreadable response: {0}")]
    Parse(String),
}

impl AIError {
    /// Whether a later turn might succeed. Only affects log fields.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AIError::RateLimited | AIError::Unavailable(_) | AIError::Timeout(_) | AIError::Network(_)
        )
    }
}
