//! HTTP adapters - REST API implementations.
//!
//! [`app_router`] assembles the onboarding routes, the health check and the
//! tower-http layers for tracing, CORS and request timeouts.

pub mod onboarding;

pub use onboarding::{onboarding_routes, OnboardingHandlers};

use std::sync::Arc;

use axum::{http::HeaderValue, routing::get, Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::adapters::clock::SystemClock;
use crate::adapters::storage::InMemorySessionStore;
use crate::application::handlers::onboarding::{
    CompleteOnboardingHandler, GetOnboardingStateHandler, ResponseGenerator,
    StartOnboardingHandler, SubmitUtteranceHandler,
};
use crate::config::{AppConfig, ConfigSnapshot, ServerConfig};
use crate::ports::{Clock, OnboardingSessionStore};

/// Wires the four onboarding handlers around one store and clock.
pub fn onboarding_handlers(
    config: &AppConfig,
    store: Arc<dyn OnboardingSessionStore>,
    clock: Arc<dyn Clock>,
    generator: ResponseGenerator,
) -> OnboardingHandlers {
    let start = StartOnboardingHandler::new(store.clone(), clock.clone(), config.onboarding.policy())
        .with_default_seed(config.onboarding.random_seed)
        .with_ai_enabled(generator.is_ai_enabled())
        .with_abandoned_grace(config.onboarding.abandoned_grace());

    OnboardingHandlers::new(
        Arc::new(start),
        Arc::new(SubmitUtteranceHandler::new(store.clone(), clock.clone(), generator)),
        Arc::new(GetOnboardingStateHandler::new(store.clone(), clock.clone())),
        Arc::new(CompleteOnboardingHandler::new(store, clock)),
    )
}

/// Production wiring: a bounded in-memory store and the system clock.
pub fn default_handlers(config: &AppConfig, generator: ResponseGenerator) -> OnboardingHandlers {
    onboarding_handlers(
        config,
        Arc::new(InMemorySessionStore::with_capacity(config.onboarding.max_sessions)),
        Arc::new(SystemClock),
        generator,
    )
}

/// Builds the full application router.
pub fn app_router(handlers: OnboardingHandlers, config: &AppConfig) -> Router {
    let snapshot = config.snapshot();

    Router::new()
        .route("/health", get(move || health(snapshot.clone())))
        .nest("/onboarding", onboarding_routes(handlers))
        .layer(cors_layer(&config.server))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

async fn health(snapshot: ConfigSnapshot) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "config": snapshot,
    }))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .allowed_origins()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
