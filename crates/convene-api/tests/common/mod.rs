//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{TimeZone, Utc};
use convene_core::identity::Identity;
use convene_test_support::{FixedClock, InMemoryEventStore};
use http_body_util::BodyExt;
use tower::ServiceExt;

use convene_api::routes;
use convene_api::state::AppState;

/// Build the full app router over an in-memory store and a fixed clock.
/// Uses the same route structure as `main.rs`.
pub fn build_test_app(store: Arc<InMemoryEventStore>) -> Router {
    let clock = Arc::new(FixedClock(
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap(),
    ));
    let app_state = AppState::new(store, clock);

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/events", routes::events::router())
        .with_state(app_state)
}

/// Send a request, optionally authenticated via the `x-user-id` header, and
/// return the status plus the parsed JSON body (`Null` when the body is
/// empty, e.g. for 204 responses).
pub async fn send(
    app: Router,
    method: &str,
    uri: &str,
    identity: Option<Identity>,
    body: Option<&serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(identity) = identity {
        builder = builder.header("x-user-id", identity.to_string());
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// Send an unauthenticated GET request.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, "GET", uri, None, None).await
}
