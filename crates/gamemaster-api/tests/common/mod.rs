//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use gamemaster_core::gateway::ModelGateway;
use gamemaster_store::JsonFileRepository;
use gamemaster_test_support::FixedClock;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

use gamemaster_api::routes;
use gamemaster_api::state::AppState;

/// Build the full app router over a real `JsonFileRepository` rooted in
/// `saves` and the given gateway, with a fixed clock.
pub fn build_test_app(saves: &TempDir, gateway: Arc<dyn ModelGateway>) -> Router {
    let repository = Arc::new(JsonFileRepository::new(saves.path()));
    let app_state = AppState::new(Arc::new(FixedClock::standard()), gateway, repository);

    routes::router().with_state(app_state)
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send one player message carrying `state`, and return the response body.
pub async fn say(
    app: Router,
    message: &str,
    state: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    post_json(
        app,
        "/api/v1/sessions/message",
        &serde_json::json!({ "message": message, "state": state }),
    )
    .await
}
