//! AI Provider Adapters.
//!
//! - `MockAIProvider` - Scripted replies for tests
//! - `OpenAIProvider` - OpenAI chat completions
//! - `AnthropicProvider` - Anthropic Messages API
//!
//! [`provider_from_config`] picks one from the configured model name.

mod anthropic_provider;
mod mock_provider;
mod openai_provider;
mod transport;

pub use anthropic_provider::AnthropicProvider;
pub use mock_provider::{MockAIProvider, DEFAULT_MOCK_REPLY};
pub use openai_provider::OpenAIProvider;
pub use transport::ProviderSettings;

use std::sync::Arc;

use crate::config::{AiConfig, AiProviderKind};
use crate::ports::{AIError, AIProvider};

/// Builds the provider the configuration asks for.
///
/// Returns `Ok(None)` when no API key is set or the model belongs to no
/// supported provider; the engine then replies from local templates only.
pub fn provider_from_config(config: &AiConfig) -> Result<Option<Arc<dyn AIProvider>>, AIError> {
    let Some(api_key) = config.api_key.as_deref().filter(|_| config.has_api_key()) else {
        tracing::info!("No AI API key configured, using local replies");
        return Ok(None);
    };
    let settings =
        |base_url: &str| ProviderSettings::new(api_key, &config.model, base_url, config.timeout());

    let provider: Arc<dyn AIProvider> = match config.provider_kind() {
        Some(AiProviderKind::OpenAI) => {
            Arc::new(OpenAIProvider::new(settings(&config.openai_base_url))?)
        }
        Some(AiProviderKind::Anthropic) => {
            Arc::new(AnthropicProvider::new(settings(&config.anthropic_base_url))?)
        }
        None => {
            tracing::warn!(model = %config.model, "Unsupported AI model, using local replies");
            return Ok(None);
        }
    };

    tracing::info!(
        provider = provider.name(),
        model = provider.model(),
        timeout_secs = config.timeout_secs,
        "AI provider configured"
    );
    Ok(Some(provider))
}
