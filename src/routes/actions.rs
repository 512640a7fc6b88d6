// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Completed action routes: list, log, remove.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::action::find_catalog_action;
use crate::models::{ActionCategory, CompletedAction};
use crate::routes::api::TotalsSummary;
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

const MAX_LIMIT: usize = 100;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/api/actions",
        get(list_actions).post(log_action).delete(remove_action),
    )
}

// ─── List ────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ListQuery {
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    50
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActionsResponse {
    /// Newest first
    pub actions: Vec<CompletedAction>,
    /// Total number of logged actions
    pub total: u32,
}

/// List the current user's completed actions, newest first.
async fn list_actions(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<ListQuery>,
) -> Result<Json<ActionsResponse>> {
    let limit = params.limit.min(MAX_LIMIT);
    let progress = state.db.get_progress(user.user_id).await?;

    Ok(Json(ActionsResponse {
        total: progress.totals.actions,
        actions: progress.recent(limit).cloned().collect(),
    }))
}

// ─── Log ─────────────────────────────────────────────────────

/// Log request. Either reference a catalog action by `action_id`, or give a
/// custom `title` with `co2_saved` (kg).
#[derive(Debug, Deserialize, Validate)]
pub struct LogActionRequest {
    pub action_id: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub title: Option<String>,
    pub category: Option<ActionCategory>,
    #[validate(range(min = 0.0, max = 1000.0))]
    pub co2_saved: Option<f64>,
}

impl LogActionRequest {
    /// Resolve to (title, category, kg CO₂).
    fn resolve(self) -> Result<(String, ActionCategory, f64)> {
        match (self.action_id, self.co2_saved) {
            (Some(id), None) => {
                let catalog = find_catalog_action(&id).ok_or_else(|| {
                    AppError::BadRequest(format!("Unknown action_id '{}'", id))
                })?;
                let title = self
                    .title
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| catalog.title.to_string());
                Ok((title, self.category.unwrap_or(catalog.category), catalog.co2_saved))
            }
            (None, Some(co2_saved)) => {
                let title = self
                    .title
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .ok_or_else(|| {
                        AppError::BadRequest("'title' is required for custom actions".to_string())
                    })?;
                Ok((
                    title,
                    self.category.unwrap_or(ActionCategory::Other),
                    co2_saved,
                ))
            }
            _ => Err(AppError::BadRequest(
                "Provide exactly one of 'action_id' or 'co2_saved'".to_string(),
            )),
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LogActionResponse {
    pub action: CompletedAction,
    pub totals: TotalsSummary,
}

/// Log a completed action for the current user.
async fn log_action(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<LogActionRequest>,
) -> Result<(StatusCode, Json<LogActionResponse>)> {
    req.validate()?;
    let (title, category, co2_saved) = req.resolve()?;

    let action = CompletedAction::new(&title, category, co2_saved, chrono::Utc::now());
    let totals = state.db.record_action(user.user_id, action.clone()).await?;

    tracing::info!(
        user_id = %user.user_id,
        title = %action.title,
        points = action.points,
        total_points = totals.points,
        "Action logged"
    );

    Ok((
        StatusCode::CREATED,
        Json(LogActionResponse {
            action,
            totals: totals.into(),
        }),
    ))
}

// ─── Remove ──────────────────────────────────────────────────

#[derive(Deserialize)]
struct RemoveQuery {
    title: String,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RemoveActionResponse {
    pub removed: CompletedAction,
    pub totals: TotalsSummary,
}

/// Remove the earliest logged action with the given title.
async fn remove_action(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<RemoveQuery>,
) -> Result<Json<RemoveActionResponse>> {
    // Logged titles are trimmed, so match against the trimmed form.
    let title = params.title.trim();
    if title.is_empty() {
        return Err(AppError::BadRequest("'title' must not be empty".to_string()));
    }

    let (removed, totals) = state
        .db
        .remove_action_by_title(user.user_id, title)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No action titled '{}'", title)))?;

    tracing::info!(
        user_id = %user.user_id,
        title = %removed.title,
        points = removed.points,
        "Action removed"
    );

    Ok(Json(RemoveActionResponse {
        removed,
        totals: totals.into(),
    }))
}
