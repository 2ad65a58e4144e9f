//! HTTP plumbing shared by the hosted providers.

use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, Secret};
use std::time::Duration;

use crate::ports::AIError;

/// Connection settings for a hosted model.
#[derive(Debug, Clone)]
pub struct ProviderSettings {
    api_key: Secret<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ProviderSettings {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: model.into(),
            base_url: base_url.into(),
            timeout,
        }
    }

    pub(super) fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// `base_url` joined with `path`, tolerating a trailing slash.
    pub(super) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    pub(super) fn client(&self) -> Result<Client, AIError> {
        Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| AIError::InvalidRequest(format!("HTTP client: {}", e)))
    }

    pub(super) fn send_error(&self, err: reqwest::Error) -> AIError {
        if err.is_timeout() {
            AIError::Timeout(self.timeout)
        } else {
            AIError::Network(err.to_string())
        }
    }
}

/// Passes a 2xx response through and maps anything else to an `AIError`.
pub(super) async fn ensure_success(response: Response) -> Result<Response, AIError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, body))
}

fn status_error(status: StatusCode, body: String) -> AIError {
    match status.as_u16() {
        401 | 403 => AIError::AuthenticationFailed,
        429 => AIError::RateLimited,
        400 | 404 | 422 => AIError::InvalidRequest(body),
        // Anthropic reports overload as 529.
        500..=599 => AIError::Unavailable(format!("{}: {}", status, body)),
        _ => AIError::Network(format!("unexpected status {}: {}", status, body)),
    }
}
