// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod action;
pub mod leaderboard;
pub mod progress;
pub mod user;

pub use action::{ActionCategory, CatalogAction, CompletedAction};
pub use leaderboard::{CampusStanding, LeaderboardEntry, RankedEntry};
pub use progress::{Totals, UserProgress};
pub use user::{CommuteMode, UserProfile};
