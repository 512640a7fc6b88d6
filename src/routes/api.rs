// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for authenticated users: profile, onboarding, progress.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::progress::Totals;
use crate::models::{ActionCategory, CommuteMode, CompletedAction, UserProfile};
use crate::services::impact::{level_progress, LevelProgress};
use crate::time_utils::{iso_week_key, recent_week_keys};
use crate::AppState;
use axum::{
    extract::State,
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::{Validate, ValidationError};

/// Weeks of history returned by the progress endpoint.
const PROGRESS_WEEKS: usize = 8;
/// Recent actions returned by the progress endpoint.
const PROGRESS_RECENT_ACTIONS: usize = 5;

/// API routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/me", get(get_me).put(update_me))
        .route("/api/onboarding", post(complete_onboarding))
        .route("/api/progress", get(get_progress))
}

// ─── User Profile ────────────────────────────────────────────

/// Current user response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    pub onboarding_completed: bool,
    pub university: Option<String>,
    pub campus_code: Option<String>,
    pub commute_mode: Option<CommuteMode>,
    pub created_at: String,
}

impl From<UserProfile> for UserResponse {
    fn from(user: UserProfile) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            name: user.name,
            avatar_url: user.avatar_url,
            onboarding_completed: user.onboarding_completed,
            university: user.university,
            campus_code: user.campus_code,
            commute_mode: user.commute_mode,
            created_at: user.created_at,
        }
    }
}

/// Get current user profile (created by the auth middleware if new).
async fn get_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<UserResponse>> {
    let profile = state
        .db
        .get_user(&user.auth_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", user.user_id)))?;

    Ok(Json(profile.into()))
}

/// Profile edit request. Omitted fields are left unchanged.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 80), custom(function = "validate_not_blank"))]
    pub name: Option<String>,
    #[validate(url)]
    pub avatar_url: Option<String>,
}

/// Edit display name and/or avatar.
async fn update_me(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserResponse>> {
    req.validate()?;

    let profile = state
        .db
        .update_user(&user.auth_id, |profile| {
            if let Some(name) = req.name {
                profile.name = Some(name.trim().to_string());
            }
            if let Some(avatar_url) = req.avatar_url {
                profile.avatar_url = Some(avatar_url);
            }
        })
        .await?;

    tracing::info!(user_id = %user.user_id, "Profile updated");
    Ok(Json(profile.into()))
}

// ─── Onboarding ──────────────────────────────────────────────

/// Data collected by the onboarding flow.
#[derive(Debug, Deserialize, Validate)]
pub struct OnboardingRequest {
    #[validate(length(min = 1, max = 80), custom(function = "validate_not_blank"))]
    pub name: String,
    #[validate(length(min = 1, max = 120), custom(function = "validate_not_blank"))]
    pub university: String,
    #[validate(custom(function = "validate_campus_code"))]
    pub campus_code: String,
    pub commute_mode: CommuteMode,
}

/// Text fields are stored trimmed, so whitespace alone counts as empty.
fn validate_not_blank(value: &str) -> std::result::Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank"))
    } else {
        Ok(())
    }
}

/// Campus codes are 2-16 ASCII letters or digits.
fn validate_campus_code(code: &str) -> std::result::Result<(), ValidationError> {
    let code = code.trim();
    if (2..=16).contains(&code.len()) && code.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("campus_code"))
    }
}

/// Save onboarding data and mark onboarding as completed.
///
/// Resubmitting overwrites the previous answers.
async fn complete_onboarding(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(req): Json<OnboardingRequest>,
) -> Result<Json<UserResponse>> {
    req.validate()?;

    let campus_code = req.campus_code.trim().to_ascii_uppercase();
    let profile = state
        .db
        .update_user(&user.auth_id, |profile| {
            profile.name = Some(req.name.trim().to_string());
            profile.university = Some(req.university.trim().to_string());
            profile.campus_code = Some(campus_code.clone());
            profile.commute_mode = Some(req.commute_mode);
            profile.onboarding_completed = true;
        })
        .await?;

    tracing::info!(
        user_id = %user.user_id,
        campus = %campus_code,
        commute = ?req.commute_mode,
        "Onboarding completed"
    );
    Ok(Json(profile.into()))
}

// ─── Progress ────────────────────────────────────────────────

/// Totals for a period or category, in API units.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TotalsSummary {
    pub points: u64,
    pub co2_saved_kg: f64,
    pub actions: u32,
}

impl From<Totals> for TotalsSummary {
    fn from(totals: Totals) -> Self {
        Self {
            points: totals.points,
            co2_saved_kg: crate::services::impact::round_one_decimal(totals.co2_kg()),
            actions: totals.actions,
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct WeekSummary {
    /// ISO week key ("YYYY-Www")
    pub week: String,
    #[serde(flatten)]
    pub totals: TotalsSummary,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CategorySummary {
    pub category: ActionCategory,
    #[serde(flatten)]
    pub totals: TotalsSummary,
}

/// Progress dashboard response.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ProgressResponse {
    pub totals: TotalsSummary,
    pub level: LevelProgress,
    pub this_week: WeekSummary,
    /// Last weeks, oldest first, including empty weeks
    pub weekly: Vec<WeekSummary>,
    pub by_category: Vec<CategorySummary>,
    pub recent_actions: Vec<CompletedAction>,
}

/// Get progress for the current user.
///
/// Served from the aggregates maintained on every log/remove.
async fn get_progress(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProgressResponse>> {
    let progress = state.db.get_progress(user.user_id).await?;
    let now = chrono::Utc::now();

    tracing::debug!(
        user_id = %user.user_id,
        actions = progress.totals.actions,
        "Fetching progress"
    );

    let this_week_key = iso_week_key(now);
    let this_week = WeekSummary {
        totals: progress.week(&this_week_key).into(),
        week: this_week_key,
    };

    let weekly = recent_week_keys(now, PROGRESS_WEEKS)
        .into_iter()
        .map(|week| WeekSummary {
            totals: progress.week(&week).into(),
            week,
        })
        .collect();

    let by_category = progress
        .by_category
        .iter()
        .map(|(&category, &totals)| CategorySummary {
            category,
            totals: totals.into(),
        })
        .collect();

    Ok(Json(ProgressResponse {
        totals: progress.totals.into(),
        level: level_progress(u32::try_from(progress.totals.points).unwrap_or(u32::MAX)),
        this_week,
        weekly,
        by_category,
        recent_actions: progress
            .recent(PROGRESS_RECENT_ACTIONS)
            .cloned()
            .collect(),
    }))
}
