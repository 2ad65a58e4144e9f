//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Variables carry the `SPARKS_ONBOARDING`
//! prefix and nested values are separated by double underscores.
//!
//! # Example
//!
//! ```no_run
//! use sparks_onboarding::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod ai;
mod error;
mod onboarding;
mod server;

pub use ai::{AiConfig, AiProviderKind};
pub use error::{ConfigError, ValidationError};
pub use onboarding::OnboardingConfig;
pub use server::{Environment, ServerConfig};

use serde::{Deserialize, Serialize};

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a working
/// local-template setup. Load using [`AppConfig::load()`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Text-completion provider configuration (OpenAI/Anthropic)
    #[serde(default)]
    pub ai: AiConfig,

    /// Onboarding session policy
    #[serde(default)]
    pub onboarding: OnboardingConfig,
}

/// Non-secret view of the effective configuration, for logs and `/health`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigSnapshot {
    pub environment: String,
    pub model: String,
    pub has_api_key: bool,
    pub time_limit_secs: u64,
    pub reask_probability: f64,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SPARKS_ONBOARDING` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    ///
    /// # Environment Variable Format
    ///
    /// - `SPARKS_ONBOARDING__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SPARKS_ONBOARDING__AI__API_KEY=...` -> `ai.api_key = ...`
    /// - `SPARKS_ONBOARDING__ONBOARDING__TIME_LIMIT_SECS=120`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SPARKS_ONBOARDING")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.ai.validate()?;
        self.onboarding.validate()?;
        if self.ai.has_api_key() && self.ai.timeout() >= self.server.request_timeout() {
            return Err(ValidationError::GenerationOutlastsRequest);
        }
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// Non-secret summary of the effective settings
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            environment: self.server.environment.as_str().to_string(),
            model: self.ai.model.clone(),
            has_api_key: self.ai.has_api_key(),
            time_limit_secs: self.onboarding.time_limit_secs,
            reask_probability: self.onboarding.reask_probability,
        }
    }
}
