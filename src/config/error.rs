//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("AI temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("AI max tokens must be between 1 and 4096")]
    InvalidMaxTokens,

    #[error("Onboarding time limit must be between 60 and 600 seconds, got {0}")]
    InvalidTimeLimit(u64),

    #[error("Re-ask probability must be between 0.0 and 1.0")]
    InvalidProbability,

    #[error("AI timeout must be shorter than the request timeout")]
    GenerationOutlastsRequest,

    #[error("Wrap-up threshold must not exceed the urgent re-ask threshold")]
    InvalidThresholds,

    #[error("Session capacity must be at least 1")]
    InvalidMaxSessions,
}
