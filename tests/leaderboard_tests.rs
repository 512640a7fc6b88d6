// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard tests.

use axum::http::StatusCode;
use eco_tracker::config::Config;
use serde_json::{json, Value};

mod common;

/// Onboard a user at `campus` and log `meals` plant-based meals (120 points each).
async fn onboarded_user(
    app: &axum::Router,
    state: &eco_tracker::AppState,
    auth_id: &str,
    campus: &str,
    meals: usize,
) -> String {
    let token = common::create_test_jwt(auth_id, state);
    let response = common::send(
        app,
        "POST",
        "/api/onboarding",
        &token,
        Some(json!({
            "name": auth_id,
            "university": "Test University",
            "campus_code": campus,
            "commute_mode": "walk"
        })),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    for _ in 0..meals {
        common::send(
            app,
            "POST",
            "/api/actions",
            &token,
            Some(json!({ "action_id": "plant-based-meal" })),
        )
        .await;
    }
    token
}

fn names(body: &Value) -> Vec<String> {
    body["entries"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_leaderboard_ranks_users_without_demo_entries() {
    let config = Config {
        seed_demo_leaderboard: false,
        ..Config::default()
    };
    let (app, state) = common::create_test_app_with(config);

    let token = onboarded_user(&app, &state, "alex", "UCB", 1).await;
    onboarded_user(&app, &state, "blair", "UCLA", 3).await;
    onboarded_user(&app, &state, "casey", "UCB", 2).await;

    let response = common::send(&app, "GET", "/api/leaderboard", &token, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(names(&body), vec!["blair", "casey", "alex"]);
    assert_eq!(body["entries"][0]["rank"], 1);
    assert_eq!(body["entries"][0]["points"], 360);
    assert_eq!(body["me"]["name"], "alex");
    assert_eq!(body["me"]["rank"], 3);
    assert_eq!(body["total_participants"], 3);
}

#[tokio::test]
async fn test_leaderboard_campus_filter_and_limit() {
    let config = Config {
        seed_demo_leaderboard: false,
        ..Config::default()
    };
    let (app, state) = common::create_test_app_with(config);

    let token = onboarded_user(&app, &state, "alex", "UCB", 1).await;
    onboarded_user(&app, &state, "blair", "UCLA", 3).await;
    onboarded_user(&app, &state, "casey", "UCB", 2).await;

    let body = common::body_json(
        common::send(&app, "GET", "/api/leaderboard?campus=ucb&limit=1", &token, None).await,
    )
    .await;

    assert_eq!(names(&body), vec!["casey"]);
    assert_eq!(body["total_participants"], 2);
    // Caller is reported even when cut off by the limit
    assert_eq!(body["me"]["rank"], 2);
}

#[tokio::test]
async fn test_leaderboard_includes_demo_entries() {
    let (app, state) = common::create_test_app();
    let token = common::create_test_jwt("not-onboarded", &state);

    let body =
        common::body_json(common::send(&app, "GET", "/api/leaderboard", &token, None).await).await;

    let entries = body["entries"].as_array().unwrap();
    assert!(!entries.is_empty());
    assert!(body["me"].is_null());

    let points: Vec<u64> = entries
        .iter()
        .map(|e| e["points"].as_u64().unwrap())
        .collect();
    assert!(points.windows(2).all(|w| w[0] >= w[1]));
}

#[tokio::test]
async fn test_campus_leaderboard() {
    let config = Config {
        seed_demo_leaderboard: false,
        ..Config::default()
    };
    let (app, state) = common::create_test_app_with(config);

    let token = onboarded_user(&app, &state, "alex", "UCB", 1).await;
    onboarded_user(&app, &state, "blair", "UCLA", 2).await;
    onboarded_user(&app, &state, "casey", "UCB", 2).await;

    let body = common::body_json(
        common::send(&app, "GET", "/api/leaderboard/campuses", &token, None).await,
    )
    .await;

    let campuses = body["campuses"].as_array().unwrap();
    assert_eq!(campuses.len(), 2);
    assert_eq!(campuses[0]["campus_code"], "UCB");
    assert_eq!(campuses[0]["members"], 2);
    assert_eq!(campuses[0]["points"], 360);
    assert_eq!(campuses[1]["campus_code"], "UCLA");
}

#[tokio::test]
async fn test_tied_users_keep_registration_order() {
    let config = Config {
        seed_demo_leaderboard: false,
        ..Config::default()
    };
    let (app, state) = common::create_test_app_with(config);

    // Registered back to back, so both land in the same second.
    let token = onboarded_user(&app, &state, "zed", "UCB", 0).await;
    onboarded_user(&app, &state, "amy", "UCB", 0).await;
    onboarded_user(&app, &state, "mia", "UCB", 0).await;

    let response = common::send(&app, "GET", "/api/leaderboard", &token, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = common::body_json(response).await;
    assert_eq!(names(&body), vec!["zed", "amy", "mia"]);
    assert_eq!(body["entries"][0]["rank"], 1);
    assert_eq!(body["entries"][1]["rank"], 2);
    assert_eq!(body["me"]["rank"], 1);
}
