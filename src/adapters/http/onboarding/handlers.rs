//! HTTP handlers for onboarding endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::handlers::onboarding::{
    CompleteOnboardingCommand, CompleteOnboardingHandler, GetOnboardingStateHandler,
    GetOnboardingStateQuery, OnboardingServiceError, StartOnboardingCommand,
    StartOnboardingHandler, SubmitUtteranceCommand, SubmitUtteranceHandler,
};
use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::onboarding::OnboardingError;
use crate::ports::SessionStoreError;

use super::dto::{
    CompleteOnboardingRequest, CompleteOnboardingResponse, ErrorResponse,
    StartOnboardingRequest, StartOnboardingResponse, SubmitUtteranceRequest, UtteranceResponse,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct OnboardingHandlers {
    start_handler: Arc<StartOnboardingHandler>,
    submit_handler: Arc<SubmitUtteranceHandler>,
    state_handler: Arc<GetOnboardingStateHandler>,
    complete_handler: Arc<CompleteOnboardingHandler>,
}

impl OnboardingHandlers {
    pub fn new(
        start_handler: Arc<StartOnboardingHandler>,
        submit_handler: Arc<SubmitUtteranceHandler>,
        state_handler: Arc<GetOnboardingStateHandler>,
        complete_handler: Arc<CompleteOnboardingHandler>,
    ) -> Self {
        Self {
            start_handler,
            submit_handler,
            state_handler,
            complete_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /onboarding/sessions - Start a session
pub async fn start_session(
    State(handlers): State<OnboardingHandlers>,
    body: Option<Json<StartOnboardingRequest>>,
) -> Response {
    let req = body.map(|Json(req)| req).unwrap_or_default();
    let cmd = StartOnboardingCommand {
        seed: req.seed,
        time_limit_secs: req.time_limit_secs,
    };

    match handlers.start_handler.handle(cmd).await {
        Ok(result) => {
            let response: StartOnboardingResponse = result.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_onboarding_error(e),
    }
}

/// POST /onboarding/sessions/:id/utterances - Process one utterance
pub async fn submit_utterance(
    State(handlers): State<OnboardingHandlers>,
    Path(session_id): Path<String>,
    Json(req): Json<SubmitUtteranceRequest>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let cmd = SubmitUtteranceCommand {
        session_id,
        text: req.text,
    };

    match handlers.submit_handler.handle(cmd).await {
        Ok(result) => {
            let response: UtteranceResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_onboarding_error(e),
    }
}

/// GET /onboarding/sessions/:id - Session snapshot
pub async fn get_session(
    State(handlers): State<OnboardingHandlers>,
    Path(session_id): Path<String>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .state_handler
        .handle(GetOnboardingStateQuery { session_id })
        .await
    {
        Ok(snapshot) => (StatusCode::OK, Json(snapshot)).into_response(),
        Err(e) => handle_onboarding_error(e),
    }
}

/// POST /onboarding/sessions/:id/complete - Finish and return the profile
pub async fn complete_session(
    State(handlers): State<OnboardingHandlers>,
    Path(session_id): Path<String>,
    body: Option<Json<CompleteOnboardingRequest>>,
) -> Response {
    let session_id = match parse_session_id(&session_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let req = body.map(|Json(req)| req).unwrap_or_default();

    let cmd = CompleteOnboardingCommand {
        session_id,
        reason: req.reason,
    };

    match handlers.complete_handler.handle(cmd).await {
        Ok(result) => {
            let response: CompleteOnboardingResponse = result.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_onboarding_error(e),
    }
}

fn parse_session_id(raw: &str) -> Result<SessionId, Response> {
    raw.parse::<SessionId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid session ID")),
        )
            .into_response()
    })
}

fn handle_onboarding_error(error: OnboardingServiceError) -> Response {
    let status = match &error {
        OnboardingServiceError::NotFound(id) => {
            return (
                StatusCode::NOT_FOUND,
                Json(ErrorResponse::not_found("Onboarding session", &id.to_string())),
            )
                .into_response();
        }
        OnboardingServiceError::Onboarding(e) => match e {
            OnboardingError::EmptyUtterance | OnboardingError::InvalidSettings(_) => {
                StatusCode::BAD_REQUEST
            }
            OnboardingError::TurnInProgress | OnboardingError::SessionCompleted => {
                StatusCode::CONFLICT
            }
            OnboardingError::InvalidTransition(_) | OnboardingError::QuestionOutOfRange(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        },
        OnboardingServiceError::Store(SessionStoreError::CapacityExceeded(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        OnboardingServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    if status.is_server_error() {
        tracing::error!(error = %error, "Onboarding request failed");
    }

    let code = error.code();
    let body = if code == ErrorCode::InternalError {
        ErrorResponse::internal(error.to_string())
    } else {
        ErrorResponse::new(code, error.to_string())
    };
    (status, Json(body)).into_response()
}
