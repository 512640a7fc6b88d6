// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::{CampusStanding, LeaderboardEntry, RankedEntry};
use crate::services::leaderboard::{demo_entries, rank_campuses, rank_entries};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

const MAX_LIMIT: usize = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/leaderboard", get(get_leaderboard))
        .route("/api/leaderboard/campuses", get(get_campus_leaderboard))
}

/// Real users followed by demo entries (when enabled).
async fn all_entries(state: &AppState) -> Result<Vec<LeaderboardEntry>> {
    let mut entries = state.db.leaderboard_entries().await?;
    if state.config.seed_demo_leaderboard {
        entries.extend(demo_entries());
    }
    Ok(entries)
}

#[derive(Deserialize)]
struct LeaderboardQuery {
    /// Only rank users from this campus
    campus: Option<String>,
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    10
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LeaderboardResponse {
    pub entries: Vec<RankedEntry>,
    /// The caller's own standing, even when outside `entries`
    pub me: Option<RankedEntry>,
    pub total_participants: u32,
}

/// Ranked users, optionally restricted to one campus.
async fn get_leaderboard(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<LeaderboardQuery>,
) -> Result<Json<LeaderboardResponse>> {
    let limit = params.limit.min(MAX_LIMIT);
    let campus = params
        .campus
        .as_deref()
        .map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty());

    tracing::debug!(user_id = %user.user_id, campus = ?campus, limit, "Fetching leaderboard");

    let mut entries = all_entries(&state).await?;
    if let Some(campus) = &campus {
        entries.retain(|e| &e.campus_code == campus);
    }

    let mut ranked = rank_entries(entries);
    let total_participants = ranked.len() as u32;
    let my_id = user.user_id.to_string();
    let me = ranked.iter().find(|e| e.user_id == my_id).cloned();
    ranked.truncate(limit);

    Ok(Json(LeaderboardResponse {
        entries: ranked,
        me,
        total_participants,
    }))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CampusLeaderboardResponse {
    pub campuses: Vec<CampusStanding>,
}

/// Campuses ranked by the summed points of their members.
async fn get_campus_leaderboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<CampusLeaderboardResponse>> {
    let entries = all_entries(&state).await?;
    Ok(Json(CampusLeaderboardResponse {
        campuses: rank_campuses(&entries),
    }))
}
