//! ResponseGenerator - Picks the reply text for a processed turn.
//!
//! With a provider configured, the turn's generation prompt is sent once and
//! the returned text is used verbatim. Without one, or on any failure or
//! blank reply, the session's templated reply is used instead.

use std::sync::Arc;

use crate::config::AiConfig;
use crate::domain::foundation::SessionId;
use crate::domain::onboarding::{AIResponse, TurnOutcome, SYSTEM_PROMPT};
use crate::ports::{AIProvider, ReplyRequest, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// Turns a `TurnOutcome` into the response the user hears.
#[derive(Clone)]
pub struct ResponseGenerator {
    provider: Option<Arc<dyn AIProvider>>,
    temperature: f32,
    max_tokens: u32,
}

impl ResponseGenerator {
    pub fn new(provider: Option<Arc<dyn AIProvider>>) -> Self {
        Self {
            provider,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Templated replies only.
    pub fn local() -> Self {
        Self::new(None)
    }

    /// Uses the sampling settings from configuration.
    pub fn from_config(config: &AiConfig, provider: Option<Arc<dyn AIProvider>>) -> Self {
        Self {
            provider,
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }
    }

    pub fn is_ai_enabled(&self) -> bool {
        self.provider.is_some()
    }

    /// Produces the response for one turn. Never fails.
    pub async fn generate(
        &self,
        session_id: SessionId,
        outcome: &TurnOutcome,
        context_json: &str,
    ) -> AIResponse {
        let Some(provider) = &self.provider else {
            return outcome.fallback_response();
        };

        let request = ReplyRequest::new(
            session_id,
            SYSTEM_PROMPT,
            context_json,
            outcome.generation_prompt.clone(),
        )
        .with_sampling(self.temperature, self.max_tokens);
        let trace_id = request.trace_id.clone();

        match provider.generate_reply(request).await {
            Ok(reply) if !reply.text.trim().is_empty() => {
                tracing::debug!(
                    session_id = %session_id,
                    trace_id = %trace_id,
                    provider = provider.name(),
                    model = %reply.model,
                    output_tokens = reply.output_tokens,
                    truncated = reply.truncated,
                    "Generated onboarding reply"
                );
                outcome.response_with_text(reply.text)
            }
            Ok(_) => {
                tracing::warn!(
                    session_id = %session_id,
                    trace_id = %trace_id,
                    "Provider returned empty text, using template"
                );
                outcome.fallback_response()
            }
            Err(e) => {
                tracing::warn!(
                    session_id = %session_id,
                    trace_id = %trace_id,
                    provider = provider.name(),
                    error = %e,
                    transient = e.is_transient(),
                    "Reply generation failed, using template"
                );
                outcome.fallback_response()
            }
        }
    }
}
