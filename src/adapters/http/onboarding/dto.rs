//! HTTP DTOs for onboarding endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::onboarding::{
    CompleteOnboardingResult, StartOnboardingResult, SubmitUtteranceResult,
};
use crate::domain::onboarding::{
    AIResponse, CompletionReason, MandatoryField, OnboardingPhase, OnboardingQuestion,
    UserProfile,
};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to start a session. The body is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StartOnboardingRequest {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub time_limit_secs: Option<u64>,
}

/// One user utterance.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitUtteranceRequest {
    pub text: String,
}

/// Request to complete a session. The body is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompleteOnboardingRequest {
    #[serde(default)]
    pub reason: Option<CompletionReason>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct StartOnboardingResponse {
    pub session_id: String,
    pub question: OnboardingQuestion,
    pub time_limit_secs: u64,
    pub ai_enabled: bool,
}

impl From<StartOnboardingResult> for StartOnboardingResponse {
    fn from(result: StartOnboardingResult) -> Self {
        Self {
            session_id: result.session_id.to_string(),
            question: result.question,
            time_limit_secs: result.time_limit_secs,
            ai_enabled: result.ai_enabled,
        }
    }
}

/// The engine's reply plus where the session now stands.
#[derive(Debug, Clone, Serialize)]
pub struct UtteranceResponse {
    #[serde(flatten)]
    pub response: AIResponse,
    pub phase: OnboardingPhase,
    pub newly_collected: Vec<MandatoryField>,
    pub missing_fields: Vec<MandatoryField>,
    pub remaining_secs: u64,
    pub progress: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completion_due: Option<CompletionReason>,
}

impl From<SubmitUtteranceResult> for UtteranceResponse {
    fn from(result: SubmitUtteranceResult) -> Self {
        Self {
            response: result.response,
            phase: result.phase,
            newly_collected: result.newly_collected,
            missing_fields: result.missing_fields,
            remaining_secs: result.remaining_secs,
            progress: result.progress.value(),
            completion_due: result.completion_due,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CompleteOnboardingResponse {
    pub profile: UserProfile,
    pub reason: CompletionReason,
}

impl From<CompleteOnboardingResult> for CompleteOnboardingResponse {
    fn from(result: CompleteOnboardingResult) -> Self {
        Self {
            profile: result.profile,
            reason: result.reason,
        }
    }
}

/// Error response for API errors.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl ToString, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new("BAD_REQUEST", message)
    }

    pub fn not_found(resource_type: &str, id: &str) -> Self {
        Self::new("NOT_FOUND", format!("{} not found: {}", resource_type, id))
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_request_body_fields_are_optional() {
        let req: StartOnboardingRequest = serde_json::from_str("{}").unwrap();
        assert!(req.seed.is_none());
        assert!(req.time_limit_secs.is_none());
    }

    #[test]
    fn complete_request_parses_reason() {
        let req: CompleteOnboardingRequest =
            serde_json::from_str(r#"{"reason":"time_nearly_up"}"#).unwrap();
        assert_eq!(req.reason, Some(CompletionReason::TimeNearlyUp));
    }

    #[test]
    fn error_response_not_found_creates_correctly() {
        let error = ErrorResponse::not_found("Onboarding session", "abc-123");
        assert_eq!(error.code, "NOT_FOUND");
        assert!(error.message.contains("abc-123"));
    }
}
