//! HTTP routes for onboarding endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    complete_session, get_session, start_session, submit_utterance, OnboardingHandlers,
};

/// Creates the onboarding router with all endpoints.
pub fn onboarding_routes(handlers: OnboardingHandlers) -> Router {
    Router::new()
        .route("/sessions", post(start_session))
        .route("/sessions/:id", get(get_session))
        .route("/sessions/:id/utterances", post(submit_utterance))
        .route("/sessions/:id/complete", post(complete_session))
        .with_state(handlers)
}
