//! Anthropic Messages API.
//!
//! The persona goes in the top-level `system` field. The Messages API has no
//! system role inside `messages`, so the history context leads the single
//! user turn.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::transport::{ensure_success, ProviderSettings};
use crate::ports::{AIError, AIProvider, GeneratedReply, ReplyRequest};

const API_VERSION: &str = "2023-06-01";

pub struct AnthropicProvider {
    settings: ProviderSettings,
    client: Client,
}

impl AnthropicProvider {
    pub fn new(settings: ProviderSettings) -> Result<Self, AIError> {
        let client = settings.client()?;
        Ok(Self { settings, client })
    }

    fn messages_request<'a>(&'a self, request: &'a ReplyRequest) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &self.settings.model,
            system: &request.system_prompt,
            messages: [UserTurn {
                role: "user",
                content: format!("{}\n\n{}", request.context_message(), request.instruction),
            }],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        }
    }

    fn into_reply(response: MessagesResponse) -> GeneratedReply {
        let text = response
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<String>();

        GeneratedReply {
            text,
            model: response.model,
            output_tokens: Some(response.usage.output_tokens),
            truncated: response.stop_reason.as_deref() == Some("max_tokens"),
        }
    }
}

#[async_trait]
impl AIProvider for AnthropicProvider {
    async fn generate_reply(&self, request: ReplyRequest) -> Result<GeneratedReply, AIError> {
        tracing::debug!(trace_id = %request.trace_id, model = %self.settings.model, "Anthropic request");

        let response = self
            .client
            .post(self.settings.endpoint("v1/messages"))
            .header("x-api-key", self.settings.api_key())
            .header("anthropic-version", API_VERSION)
            .json(&self.messages_request(&request))
            .send()
            .await
            .map_err(|e| self.settings.send_error(e))?;

        let body: MessagesResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(|e| AIError::Parse(e.to_string()))?;

        Ok(Self::into_reply(body))
    }

    fn name(&self) -> &'static str {
        "anthropic"
    }

    fn model(&self) -> &str {
        &self.settings.model
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    system: &'a str,
    messages: [UserTurn; 1],
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct UserTurn {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    model: String,
    content: Vec<ContentBlock>,
    stop_reason: Option<String>,
    usage: Usage,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    output_tokens: u32,
}
