//! Leaderboard entries and ranked views.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One participant's standing before ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub name: String,
    pub campus_code: String,
    pub points: u64,
}

/// A ranked participant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct RankedEntry {
    /// 1-based position
    pub rank: u32,
    pub user_id: String,
    pub name: String,
    pub campus_code: String,
    pub points: u64,
    pub co2_saved_kg: f64,
}

/// A ranked campus with summed member points.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CampusStanding {
    pub rank: u32,
    pub campus_code: String,
    pub members: u32,
    pub points: u64,
    pub co2_saved_kg: f64,
}
