//! Integration tests for the onboarding HTTP API.
//!
//! These drive the full axum router with `tower::ServiceExt::oneshot`:
//! 1. Session lifecycle over HTTP (start, utterances, state, complete)
//! 2. Status code mapping for misuse
//! 3. Turn reentrancy through a slow provider
//! 4. Session capacity and abandoned-session eviction

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use sparks_onboarding::adapters::ai::MockAIProvider;
use sparks_onboarding::adapters::clock::ManualClock;
use sparks_onboarding::adapters::http::{app_router, onboarding_handlers};
use sparks_onboarding::adapters::storage::InMemorySessionStore;
use sparks_onboarding::application::handlers::onboarding::ResponseGenerator;
use sparks_onboarding::config::AppConfig;
use sparks_onboarding::domain::foundation::Timestamp;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    clock: Arc<ManualClock>,
}

fn test_app(generator: ResponseGenerator) -> TestApp {
    test_app_with_store(generator, InMemorySessionStore::new())
}

fn test_app_with_store(generator: ResponseGenerator, store: InMemorySessionStore) -> TestApp {
    let mut config = AppConfig::default();
    config.onboarding.random_seed = Some(7);
    let clock = Arc::new(ManualClock::new(Timestamp::from_unix_secs(1_700_000_000)));
    let handlers = onboarding_handlers(&config, Arc::new(store), clock.clone(), generator);
    TestApp {
        router: app_router(handlers, &config),
        clock,
    }
}

async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn start(router: &Router) -> String {
    let (status, body) = send(router, "POST", "/onboarding/sessions", Some(json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    body["session_id"].as_str().unwrap().to_string()
}

async fn say(router: &Router, id: &str, text: &str) -> (StatusCode, Value) {
    send(
        router,
        "POST",
        &format!("/onboarding/sessions/{}/utterances", id),
        Some(json!({ "text": text })),
    )
    .await
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn health_reports_ok_without_secrets() {
    let app = test_app(ResponseGenerator::local());
    let (status, body) = send(&app.router, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["config"]["has_api_key"], false);
    assert_eq!(body["config"]["time_limit_secs"], 300);
}

#[tokio::test]
async fn start_returns_first_question() {
    let app = test_app(ResponseGenerator::local());
    let (status, body) = send(&app.router, "POST", "/onboarding/sessions", None).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["question"]["id"], "q1");
    assert_eq!(body["time_limit_secs"], 300);
    assert_eq!(body["ai_enabled"], false);
    assert!(body["session_id"].as_str().is_some());
}

#[tokio::test]
async fn mandatory_answers_then_complete_returns_profile() {
    let app = test_app(ResponseGenerator::local());
    let id = start(&app.router).await;

    let (status, body) = say(&app.router, &id, "my name is Alex").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["newly_collected"], json!(["name"]));
    assert_eq!(body["next_question"]["id"], "q2");
    assert!(body["text"].as_str().unwrap().contains("Alex"));

    let (_, body) = say(&app.router, &id, "I'm 15 years old").await;
    assert_eq!(body["newly_collected"], json!(["age"]));

    app.clock.advance(Duration::from_secs(60));
    let (_, body) = say(&app.router, &id, "I live in Boston and love music").await;
    assert_eq!(body["newly_collected"], json!(["location"]));
    assert_eq!(body["missing_fields"], json!([]));
    assert_eq!(body["remaining_secs"], 240);
    assert_eq!(body["progress"], 20);
    assert!(body["suggested_interests"]
        .as_array()
        .unwrap()
        .contains(&json!("music")));

    let (status, state) = send(&app.router, "GET", &format!("/onboarding/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state["collected_fields"], json!(["name", "age", "location"]));
    assert_eq!(state["current_question"]["id"], "q4");
    assert_eq!(state["turn_count"], 3);

    let (status, done) = send(
        &app.router,
        "POST",
        &format!("/onboarding/sessions/{}/complete", id),
        Some(json!({})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(done["reason"], "requested");
    assert_eq!(done["profile"]["name"], "Alex");
    assert_eq!(done["profile"]["age"], 15);
    assert_eq!(done["profile"]["location"], "Boston");
    assert_eq!(done["profile"]["interests"], json!(["music"]));
    assert!(done["profile"]["id"].as_str().unwrap().starts_with("user-"));

    let (status, _) = send(&app.router, "GET", &format!("/onboarding/sessions/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn expired_session_completes_with_defaults() {
    let app = test_app(ResponseGenerator::local());
    let id = start(&app.router).await;
    app.clock.advance(Duration::from_secs(301));

    let (_, state) = send(&app.router, "GET", &format!("/onboarding/sessions/{}", id), None).await;
    assert_eq!(state["completion_due"], "time_expired");
    assert_eq!(state["remaining_secs"], 0);

    let (status, done) = send(
        &app.router,
        "POST",
        &format!("/onboarding/sessions/{}/complete", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(done["reason"], "time_expired");
    assert_eq!(done["profile"]["name"], "User");
    assert_eq!(done["profile"]["age"], 16);
    assert_eq!(done["profile"]["location"], "Unknown");
    assert_eq!(done["profile"]["profile_image"], "/placeholder.svg");
}

// =============================================================================
// Error mapping
// =============================================================================

#[tokio::test]
async fn empty_text_is_bad_request() {
    let app = test_app(ResponseGenerator::local());
    let id = start(&app.router).await;

    let (status, body) = say(&app.router, &id, "   ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "EMPTY_UTTERANCE");
}

#[tokio::test]
async fn unknown_and_malformed_ids() {
    let app = test_app(ResponseGenerator::local());

    let (status, body) = say(&app.router, "6f9619ff-8b86-d011-b42d-00cf4fc964ff", "hi").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");

    let (status, _) = say(&app.router, "not-a-uuid", "hi").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn out_of_range_time_limit_is_bad_request() {
    let app = test_app(ResponseGenerator::local());
    let (status, body) = send(
        &app.router,
        "POST",
        "/onboarding/sessions",
        Some(json!({ "time_limit_secs": 30 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn second_turn_while_generating_is_conflict() {
    let slow = MockAIProvider::new().with_delay(Duration::from_millis(300));
    let app = test_app(ResponseGenerator::new(Some(Arc::new(slow))));
    let id = start(&app.router).await;

    let first = {
        let router = app.router.clone();
        let id = id.clone();
        tokio::spawn(async move { say(&router, &id, "my name is Alex").await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    let (status, body) = say(&app.router, &id, "I'm 15").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "TURN_IN_PROGRESS");

    let (status, body) = first.await.unwrap();
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["text"], "Mock response");
}

// =============================================================================
// Capacity
// =============================================================================

#[tokio::test]
async fn abandoned_session_frees_capacity_for_new_start() {
    let app = test_app_with_store(
        ResponseGenerator::local(),
        InMemorySessionStore::with_capacity(1),
    );
    let walked_away = start(&app.router).await;

    let (status, _) = send(&app.router, "POST", "/onboarding/sessions", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

    // Time limit plus the default two minutes of grace.
    app.clock.advance(Duration::from_secs(300 + 120));
    let fresh = start(&app.router).await;
    assert_ne!(fresh, walked_away);

    let (status, _) = send(
        &app.router,
        "GET",
        &format!("/onboarding/sessions/{}", walked_away),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
