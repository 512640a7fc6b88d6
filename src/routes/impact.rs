// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Public reference routes: the action catalog and eco level lookup.

use crate::models::action::{CatalogAction, ACTION_CATALOG};
use crate::services::impact::{co2_to_points, level_progress, LevelProgress, ECO_LEVELS};
use crate::services::EcoLevel;
use crate::AppState;
use axum::{extract::Query, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/actions/catalog", get(get_catalog))
        .route("/api/impact/levels", get(get_levels))
        .route("/api/impact/level", get(get_level))
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub action: CatalogAction,
    pub points: u32,
}

/// Suggested actions with their point value.
async fn get_catalog() -> Json<Vec<CatalogEntry>> {
    Json(
        ACTION_CATALOG
            .iter()
            .map(|&action| CatalogEntry {
                points: co2_to_points(action.co2_saved),
                action,
            })
            .collect(),
    )
}

/// The level table.
async fn get_levels() -> Json<Vec<EcoLevel>> {
    Json(ECO_LEVELS.to_vec())
}

#[derive(Deserialize)]
struct LevelQuery {
    points: u32,
}

/// Level progress for an arbitrary point total.
async fn get_level(Query(params): Query<LevelQuery>) -> Json<LevelProgress> {
    Json(level_progress(params.points))
}
