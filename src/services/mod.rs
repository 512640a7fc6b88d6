// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod impact;
pub mod leaderboard;

pub use impact::{co2_to_points, level_for_points, level_progress, points_to_co2, EcoLevel};
