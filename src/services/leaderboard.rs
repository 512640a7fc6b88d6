// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Leaderboard ranking.
//!
//! Rankings are recomputed from scratch on every query. Sorting is stable,
//! so participants with equal points keep their input (registration) order
//! and receive consecutive ranks.

use std::collections::HashMap;

use crate::models::leaderboard::{CampusStanding, LeaderboardEntry, RankedEntry};
use crate::services::impact::points_total_to_co2;

/// Static demo participants shown alongside real users.
const DEMO_ENTRIES: &[(&str, &str, &str, u64)] = &[
    ("demo-1", "Maya Chen", "UCB", 4_820),
    ("demo-2", "Jordan Lee", "UCLA", 4_310),
    ("demo-3", "Priya Patel", "UCB", 3_975),
    ("demo-4", "Diego Ramirez", "UCSD", 3_420),
    ("demo-5", "Aisha Bello", "UCLA", 2_860),
    ("demo-6", "Noah Kim", "UCSD", 2_190),
    ("demo-7", "Emma Johansson", "UCB", 1_540),
    ("demo-8", "Liam O'Brien", "UCLA", 980),
];

/// Demo participants as leaderboard entries.
pub fn demo_entries() -> Vec<LeaderboardEntry> {
    DEMO_ENTRIES
        .iter()
        .map(|&(id, name, campus, points)| LeaderboardEntry {
            user_id: id.to_string(),
            name: name.to_string(),
            campus_code: campus.to_string(),
            points,
        })
        .collect()
}

/// Rank participants by points, highest first.
pub fn rank_entries(mut entries: Vec<LeaderboardEntry>) -> Vec<RankedEntry> {
    // `sort_by` is stable: ties keep input order.
    entries.sort_by(|a, b| b.points.cmp(&a.points));

    entries
        .into_iter()
        .enumerate()
        .map(|(i, e)| RankedEntry {
            rank: i as u32 + 1,
            co2_saved_kg: points_total_to_co2(e.points),
            user_id: e.user_id,
            name: e.name,
            campus_code: e.campus_code,
            points: e.points,
        })
        .collect()
}

/// Sum points per campus and rank campuses, highest first.
///
/// Ties are broken by campus code so the order does not depend on map
/// iteration order.
pub fn rank_campuses(entries: &[LeaderboardEntry]) -> Vec<CampusStanding> {
    let mut by_campus: HashMap<&str, (u32, u64)> = HashMap::new();
    for entry in entries {
        let slot = by_campus.entry(entry.campus_code.as_str()).or_default();
        slot.0 += 1;
        slot.1 += entry.points;
    }

    let mut campuses: Vec<(&str, u32, u64)> = by_campus
        .into_iter()
        .map(|(code, (members, points))| (code, members, points))
        .collect();
    campuses.sort_by(|a, b| b.2.cmp(&a.2).then_with(|| a.0.cmp(b.0)));

    campuses
        .into_iter()
        .enumerate()
        .map(|(i, (code, members, points))| CampusStanding {
            rank: i as u32 + 1,
            campus_code: code.to_string(),
            members,
            points,
            co2_saved_kg: points_total_to_co2(points),
        })
        .collect()
}
