// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{http::StatusCode, response::IntoResponse};
use eco_tracker::error::AppError;

mod common;

#[tokio::test]
async fn test_error_status_codes() {
    let cases = [
        (AppError::Unauthorized, StatusCode::UNAUTHORIZED, "unauthorized"),
        (AppError::InvalidToken, StatusCode::UNAUTHORIZED, "invalid_token"),
        (
            AppError::NotFound("x".to_string()),
            StatusCode::NOT_FOUND,
            "not_found",
        ),
        (
            AppError::BadRequest("x".to_string()),
            StatusCode::BAD_REQUEST,
            "bad_request",
        ),
        (
            AppError::Storage("disk full".to_string()),
            StatusCode::INTERNAL_SERVER_ERROR,
            "storage_error",
        ),
        (
            AppError::Internal(anyhow::anyhow!("boom")),
            StatusCode::INTERNAL_SERVER_ERROR,
            "internal_error",
        ),
    ];

    for (err, status, code) in cases {
        let response = err.into_response();
        assert_eq!(response.status(), status);
        let body = common::body_json(response).await;
        assert_eq!(body["error"], code);
    }
}

#[tokio::test]
async fn test_internal_errors_hide_details() {
    let response = AppError::Storage("secret path /var/data".to_string()).into_response();
    let body = common::body_json(response).await;
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_validation_error_has_details() {
    let mut errors = validator::ValidationErrors::new();
    errors.add("name", validator::ValidationError::new("length"));

    let response = AppError::from(errors).into_response();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = common::body_json(response).await;
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"].as_str().unwrap().contains("name"));
}
