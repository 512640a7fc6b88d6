// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Eco action model for storage and API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::services::impact::co2_to_points;

/// Broad grouping for actions (used for per-category totals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum ActionCategory {
    Transport,
    Energy,
    Water,
    Waste,
    Food,
    Other,
}

/// A logged eco action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CompletedAction {
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub id: Uuid,
    pub title: String,
    /// Always `co2_to_points(co2_saved)`
    pub points: u32,
    /// Kilograms of CO₂ saved
    pub co2_saved: f64,
    /// When the action was logged (RFC 3339, UTC)
    #[cfg_attr(feature = "binding-generation", ts(type = "string"))]
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub category: ActionCategory,
}

impl CompletedAction {
    pub fn new(
        title: &str,
        category: ActionCategory,
        co2_saved: f64,
        timestamp: chrono::DateTime<chrono::Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.to_string(),
            points: co2_to_points(co2_saved),
            co2_saved,
            timestamp,
            category,
        }
    }

    /// CO₂ saved in whole grams (aggregates are kept in grams).
    pub fn co2_grams(&self) -> u64 {
        if self.co2_saved.is_finite() && self.co2_saved > 0.0 {
            (self.co2_saved * 1000.0).round() as u64
        } else {
            0
        }
    }
}

/// A suggested action users can log with one tap.
#[derive(Debug, Clone, Copy, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CatalogAction {
    pub id: &'static str,
    pub title: &'static str,
    pub category: ActionCategory,
    /// Typical kilograms of CO₂ saved per occurrence
    pub co2_saved: f64,
}

pub const ACTION_CATALOG: &[CatalogAction] = &[
    CatalogAction {
        id: "bike-to-campus",
        title: "Biked to campus",
        category: ActionCategory::Transport,
        co2_saved: 2.4,
    },
    CatalogAction {
        id: "walk-to-campus",
        title: "Walked to campus",
        category: ActionCategory::Transport,
        co2_saved: 1.8,
    },
    CatalogAction {
        id: "public-transit",
        title: "Took public transit",
        category: ActionCategory::Transport,
        co2_saved: 1.5,
    },
    CatalogAction {
        id: "short-shower",
        title: "Took a 5-minute shower",
        category: ActionCategory::Water,
        co2_saved: 0.4,
    },
    CatalogAction {
        id: "recycle",
        title: "Recycled",
        category: ActionCategory::Waste,
        co2_saved: 0.3,
    },
    CatalogAction {
        id: "reusable-bottle",
        title: "Used a reusable bottle",
        category: ActionCategory::Waste,
        co2_saved: 0.1,
    },
    CatalogAction {
        id: "plant-based-meal",
        title: "Ate a plant-based meal",
        category: ActionCategory::Food,
        co2_saved: 1.2,
    },
    CatalogAction {
        id: "lights-off",
        title: "Turned off unused lights",
        category: ActionCategory::Energy,
        co2_saved: 0.2,
    },
    CatalogAction {
        id: "air-dry-laundry",
        title: "Air-dried laundry",
        category: ActionCategory::Energy,
        co2_saved: 0.9,
    },
];

/// Look up a catalog action by ID.
pub fn find_catalog_action(id: &str) -> Option<&'static CatalogAction> {
    ACTION_CATALOG.iter().find(|a| a.id == id)
}
