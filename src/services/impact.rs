// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! CO₂/points conversion and eco level lookup.
//!
//! One point is 10 grams of CO₂ saved (`points = kg * 100`). Levels are a
//! small static table sorted by threshold, so lookup is a binary search.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Points awarded per kilogram of CO₂ saved.
pub const POINTS_PER_KG: f64 = 100.0;

/// A named gamification tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct EcoLevel {
    /// 1-based position in the table
    pub rank: u8,
    pub name: &'static str,
    /// Minimum point total for this level (inclusive)
    pub min_points: u32,
}

/// Level table, ascending by `min_points`. The first entry must start at 0.
pub static ECO_LEVELS: [EcoLevel; 5] = [
    EcoLevel {
        rank: 1,
        name: "Beginner",
        min_points: 0,
    },
    EcoLevel {
        rank: 2,
        name: "Contributor",
        min_points: 500,
    },
    EcoLevel {
        rank: 3,
        name: "Champion",
        min_points: 1_500,
    },
    EcoLevel {
        rank: 4,
        name: "Hero",
        min_points: 3_000,
    },
    EcoLevel {
        rank: 5,
        name: "Legend",
        min_points: 5_000,
    },
];

/// Convert kilograms of CO₂ saved to points, rounding to the nearest point.
///
/// Negative and non-finite inputs earn nothing.
pub fn co2_to_points(kg: f64) -> u32 {
    if !kg.is_finite() || kg <= 0.0 {
        return 0;
    }
    // `as` saturates at u32::MAX for out-of-range floats.
    (kg * POINTS_PER_KG).round() as u32
}

/// Convert points back to kilograms of CO₂, rounded to one decimal.
pub fn points_to_co2(points: u32) -> f64 {
    round_one_decimal(points as f64 / POINTS_PER_KG)
}

/// Convert an aggregate point total back to kilograms of CO₂, rounded to
/// one decimal.
pub fn points_total_to_co2(points: u64) -> f64 {
    round_one_decimal(points as f64 / POINTS_PER_KG)
}

/// Round to one decimal place.
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn level_index(points: u32) -> usize {
    // Number of levels whose threshold is <= points; always >= 1.
    ECO_LEVELS
        .partition_point(|level| level.min_points <= points)
        .saturating_sub(1)
}

/// The level for a point total.
pub fn level_for_points(points: u32) -> &'static EcoLevel {
    &ECO_LEVELS[level_index(points)]
}

/// The level after the one `points` currently sits in, if any.
pub fn next_level(points: u32) -> Option<&'static EcoLevel> {
    ECO_LEVELS.get(level_index(points) + 1)
}

/// Where a point total sits between its level and the next.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct LevelProgress {
    pub points: u32,
    pub co2_saved_kg: f64,
    pub level: EcoLevel,
    pub next_level: Option<EcoLevel>,
    /// Points still needed for the next level (0 at the top level)
    pub points_to_next: u32,
    /// Fraction of the way to the next level, 0.0..=1.0
    pub progress: f64,
}

/// Compute level progress for a point total.
pub fn level_progress(points: u32) -> LevelProgress {
    let level = *level_for_points(points);
    let next = next_level(points).copied();

    let (points_to_next, progress) = match next {
        Some(next) => {
            let span = (next.min_points - level.min_points) as f64;
            let done = (points - level.min_points) as f64;
            (next.min_points - points, (done / span).clamp(0.0, 1.0))
        }
        None => (0, 1.0),
    };

    LevelProgress {
        points,
        co2_saved_kg: points_to_co2(points),
        level,
        next_level: next,
        points_to_next,
        progress,
    }
}
