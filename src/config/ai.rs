//! Text-completion provider configuration
//!
//! The provider is chosen from the model name: anything containing `gpt`
//! goes to OpenAI, anything containing `claude` goes to Anthropic. Without an
//! API key the engine runs on local templates only.

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Text-completion provider configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// API key for the provider the model belongs to
    pub api_key: Option<String>,

    /// Model name, e.g. `gpt-4o` or `claude-3-haiku-20240307`
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// OpenAI API base URL
    #[serde(default = "default_openai_base_url")]
    pub openai_base_url: String,

    /// Anthropic API base URL
    #[serde(default = "default_anthropic_base_url")]
    pub anthropic_base_url: String,
}

/// Provider family a model name belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AiProviderKind {
    OpenAI,
    Anthropic,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key.as_ref().is_some_and(|k| !k.trim().is_empty())
    }

    /// Provider family for the configured model, if it is a supported one
    pub fn provider_kind(&self) -> Option<AiProviderKind> {
        let model = self.model.to_lowercase();
        if model.contains("gpt") {
            Some(AiProviderKind::OpenAI)
        } else if model.contains("claude") {
            Some(AiProviderKind::Anthropic)
        } else {
            None
        }
    }

    /// Validate AI configuration. A missing API key is valid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("AI__MODEL"));
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.max_tokens == 0 || self.max_tokens > 4096 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            timeout_secs: default_timeout(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            openai_base_url: default_openai_base_url(),
            anthropic_base_url: default_anthropic_base_url(),
        }
    }
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

fn default_timeout() -> u64 {
    20
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    150
}

fn default_openai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_anthropic_base_url() -> String {
    "https://api.anthropic.com".to_string()
}
