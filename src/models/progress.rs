//! Per-user action log with incrementally maintained aggregates.
//!
//! Aggregates are updated on every record/remove so that progress queries
//! are O(weeks) rather than O(actions). They must always equal what
//! [`UserProgress::recompute`] would derive from the log.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::action::{ActionCategory, CompletedAction};
use crate::time_utils::iso_week_key;

/// Summed contribution of a set of actions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Totals {
    pub points: u64,
    pub co2_grams: u64,
    pub actions: u32,
}

impl Totals {
    fn add(&mut self, action: &CompletedAction) {
        self.points += u64::from(action.points);
        self.co2_grams = self.co2_grams.saturating_add(action.co2_grams());
        self.actions = self.actions.saturating_add(1);
    }

    fn subtract(&mut self, action: &CompletedAction) {
        self.points = self.points.saturating_sub(u64::from(action.points));
        self.co2_grams = self.co2_grams.saturating_sub(action.co2_grams());
        self.actions = self.actions.saturating_sub(1);
    }

    /// CO₂ saved in kilograms.
    pub fn co2_kg(&self) -> f64 {
        self.co2_grams as f64 / 1000.0
    }
}

/// A user's completed actions plus aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    // ─── Log ─────────────────────────────────────────────────────
    /// Completed actions in insertion order
    #[serde(default)]
    pub actions: Vec<CompletedAction>,

    // ─── Aggregates ──────────────────────────────────────────────
    #[serde(default)]
    pub totals: Totals,
    /// Totals per ISO week ("YYYY-Www")
    #[serde(default)]
    pub by_week: BTreeMap<String, Totals>,
    #[serde(default)]
    pub by_category: BTreeMap<ActionCategory, Totals>,
}

impl UserProgress {
    /// Append an action and add its contribution to every aggregate.
    pub fn record(&mut self, action: CompletedAction) {
        self.totals.add(&action);
        self.by_week
            .entry(iso_week_key(action.timestamp))
            .or_default()
            .add(&action);
        self.by_category
            .entry(action.category)
            .or_default()
            .add(&action);
        self.actions.push(action);
    }

    /// Remove the earliest action with exactly this title.
    ///
    /// Only that entry's contribution is subtracted; later duplicates stay
    /// logged and counted.
    pub fn remove_by_title(&mut self, title: &str) -> Option<CompletedAction> {
        let index = self.actions.iter().position(|a| a.title == title)?;
        let action = self.actions.remove(index);

        self.totals.subtract(&action);

        let week = iso_week_key(action.timestamp);
        if let Some(totals) = self.by_week.get_mut(&week) {
            totals.subtract(&action);
            if totals.actions == 0 {
                self.by_week.remove(&week);
            }
        }
        if let Some(totals) = self.by_category.get_mut(&action.category) {
            totals.subtract(&action);
            if totals.actions == 0 {
                self.by_category.remove(&action.category);
            }
        }

        Some(action)
    }

    /// Rebuild every aggregate from the log in a single pass.
    pub fn recompute(&mut self) {
        let actions = std::mem::take(&mut self.actions);
        *self = Self::default();
        for action in actions {
            self.record(action);
        }
    }

    /// Totals for one week key, zero if nothing was logged.
    pub fn week(&self, key: &str) -> Totals {
        self.by_week.get(key).copied().unwrap_or_default()
    }

    /// Most recent actions first.
    pub fn recent(&self, limit: usize) -> impl Iterator<Item = &CompletedAction> {
        self.actions.iter().rev().take(limit)
    }
}
