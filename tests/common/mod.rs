// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{
    body::Body,
    http::{header, Request, Response},
};
use eco_tracker::config::Config;
use eco_tracker::db::MemoryDb;
use eco_tracker::middleware::auth::create_jwt;
use eco_tracker::routes::create_router;
use eco_tracker::AppState;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// Create a test app with an empty in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::default())
}

/// Create a test app with a custom config.
#[allow(dead_code)]
pub fn create_test_app_with(config: Config) -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config,
        db: MemoryDb::new(),
    });

    (create_router(state.clone()), state)
}

/// Create a valid access token for the test config.
#[allow(dead_code)]
pub fn create_test_jwt(auth_id: &str, state: &AppState) -> String {
    let email = format!("{}@campus.edu", auth_id);
    create_jwt(
        auth_id,
        Some(email.as_str()),
        &state.config.jwt_audience,
        &state.config.jwt_signing_key,
    )
    .unwrap()
}

/// Send an authenticated request with an optional JSON body.
#[allow(dead_code)]
pub async fn send(
    app: &axum::Router,
    method: &str,
    uri: &str,
    token: &str,
    body: Option<Value>,
) -> Response<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    app.clone().oneshot(request).await.unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
