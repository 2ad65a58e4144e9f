//! OpenAI chat completions.
//!
//! The persona and the history context go out as two system messages ahead
//! of the turn instruction.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::transport::{ensure_success, ProviderSettings};
use crate::ports::{AIError, AIProvider, GeneratedReply, ReplyRequest};

pub struct OpenAIProvider {
    settings: ProviderSettings,
    client: Client,
}

impl OpenAIProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self, AIError> {
        let client = settings.client()?;
        Ok(Self { settings, client })
    }

    fn chat_request<'a>(&'a self, request: &'a ReplyRequest) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage::new("system", request.system_prompt.clone()),
                ChatMessage::new("system", request.context_message()),
                ChatMessage::new("user", request.instruction.clone()),
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    fn into_reply(response: ChatResponse) -> Result<GeneratedReply, AIError> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| AIError::Parse("no choices".to_string()))?;

        Ok(GeneratedReply {
            text: choice.message.content.unwrap_or_default(),
            model: response.model,
            output_tokens: response.usage.map(|u| u.completion_tokens),
            truncated: choice.finish_reason.as_deref() == Some("length"),
        })
    }
}

#[async_trait]
impl AIProvider for OpenAIProvider {
    async fn generate_reply(&self, request: ReplyRequest) -> Result<GeneratedReply, AIError> {
        tracing::debug!(trace_id = %request.trace_id, model = %self.settings.model, "OpenAI request");

        let response = self
            .client
            .post(self.settings.endpoint("chat/completions"))
            .bearer_auth(self.settings.api_key())
            .json(&self.chat_request(&request))
            .send()
            .await
            .map_err(|e| self.settings.send_error(e))?;

        let body: ChatResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| AIError::Parse(e.to_string()))?;

        Self::into_reply(body)
    }

    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.settings.model
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

impl ChatMessage {
    fn new(role: &'static str, content: String) -> Self {
        Self { role, content }
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: String,
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    completion_tokens: u32,
}
