// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-process store with typed operations.
//!
//! Provides high-level operations for:
//! - Users (profiles keyed by identity-provider subject)
//! - Progress (completed action log and aggregates, keyed by profile ID)
//! - Leaderboard (one entry per onboarded user)
//!
//! Contents can be written to and restored from a JSON snapshot file.

use crate::error::AppError;
use crate::models::leaderboard::LeaderboardEntry;
use crate::models::progress::{Totals, UserProgress};
use crate::models::{CompletedAction, UserProfile};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use uuid::Uuid;

/// Serialized form of the whole store.
#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    #[serde(default)]
    users: Vec<UserProfile>,
    #[serde(default)]
    progress: HashMap<Uuid, UserProgress>,
}

/// Shared store handle. Clones share the same underlying maps.
#[derive(Clone, Default)]
pub struct MemoryDb {
    users: Arc<DashMap<String, UserProfile>>,
    progress: Arc<DashMap<Uuid, UserProgress>>,
    /// Next registration sequence number
    next_seq: Arc<AtomicU64>,
}

impl MemoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Snapshot ────────────────────────────────────────────────

    /// Load a store from a snapshot file. A missing file yields an empty store.
    pub async fn load_snapshot(path: &Path) -> Result<Self, AppError> {
        let raw = match tokio::fs::read(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No snapshot found, starting empty");
                return Ok(Self::new());
            }
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to read snapshot {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        let snapshot: Snapshot = serde_json::from_slice(&raw)
            .map_err(|e| AppError::Storage(format!("Corrupt snapshot: {}", e)))?;

        let db = Self::new();
        let next_seq = snapshot
            .users
            .iter()
            .map(|u| u.registered_seq + 1)
            .max()
            .unwrap_or(0);
        db.next_seq.store(next_seq, Ordering::SeqCst);
        for user in snapshot.users {
            db.users.insert(user.auth_id.clone(), user);
        }
        for (user_id, progress) in snapshot.progress {
            db.progress.insert(user_id, progress);
        }

        tracing::info!(
            path = %path.display(),
            users = db.users.len(),
            "Snapshot loaded"
        );
        Ok(db)
    }

    /// Write the store to a snapshot file (via a temp file and rename).
    pub async fn save_snapshot(&self, path: &Path) -> Result<(), AppError> {
        let snapshot = Snapshot {
            users: self.users.iter().map(|u| u.value().clone()).collect(),
            progress: self
                .progress
                .iter()
                .map(|p| (*p.key(), p.value().clone()))
                .collect(),
        };

        let json = serde_json::to_vec_pretty(&snapshot)
            .map_err(|e| AppError::Storage(format!("Failed to serialize snapshot: {}", e)))?;

        let tmp = path.with_extension("tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to write snapshot: {}", e)))?;
        tokio::fs::rename(&tmp, path)
            .await
            .map_err(|e| AppError::Storage(format!("Failed to replace snapshot: {}", e)))?;

        tracing::info!(
            path = %path.display(),
            users = snapshot.users.len(),
            "Snapshot saved"
        );
        Ok(())
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Get a user by identity-provider subject.
    pub async fn get_user(&self, auth_id: &str) -> Result<Option<UserProfile>, AppError> {
        Ok(self.users.get(auth_id).map(|u| u.value().clone()))
    }

    /// Create or replace a user.
    pub async fn upsert_user(&self, user: &UserProfile) -> Result<(), AppError> {
        self.users.insert(user.auth_id.clone(), user.clone());
        Ok(())
    }

    /// Fetch the user for `auth_id`, creating a fresh profile if absent.
    ///
    /// Returns the profile and whether it was just created. An email from
    /// the token fills in a profile that has none.
    pub async fn get_or_create_user(
        &self,
        auth_id: &str,
        email: Option<&str>,
    ) -> Result<(UserProfile, bool), AppError> {
        match self.users.entry(auth_id.to_string()) {
            Entry::Occupied(mut entry) => {
                let user = entry.get_mut();
                if user.email.is_none() {
                    user.email = email.map(str::to_string);
                }
                Ok((user.clone(), false))
            }
            Entry::Vacant(entry) => {
                let now = crate::time_utils::format_utc_rfc3339(chrono::Utc::now());
                let mut user = UserProfile::new(auth_id, email.map(str::to_string), &now);
                user.registered_seq = self.next_seq.fetch_add(1, Ordering::SeqCst);
                entry.insert(user.clone());
                Ok((user, true))
            }
        }
    }

    /// Apply `update` to an existing user and bump `updated_at`.
    pub async fn update_user<F>(&self, auth_id: &str, update: F) -> Result<UserProfile, AppError>
    where
        F: FnOnce(&mut UserProfile),
    {
        let mut user = self
            .users
            .get_mut(auth_id)
            .ok_or_else(|| AppError::NotFound(format!("User {} not found", auth_id)))?;

        update(&mut user);
        user.updated_at = crate::time_utils::format_utc_rfc3339(chrono::Utc::now());
        Ok(user.clone())
    }

    // ─── Progress Operations ─────────────────────────────────────

    /// Get a user's progress (empty if nothing was logged yet).
    pub async fn get_progress(&self, user_id: Uuid) -> Result<UserProgress, AppError> {
        Ok(self
            .progress
            .get(&user_id)
            .map(|p| p.value().clone())
            .unwrap_or_default())
    }

    /// Append an action to a user's log. Returns the updated totals.
    pub async fn record_action(
        &self,
        user_id: Uuid,
        action: CompletedAction,
    ) -> Result<Totals, AppError> {
        let mut progress = self.progress.entry(user_id).or_default();
        progress.record(action);
        Ok(progress.totals)
    }

    /// Remove the earliest action with this title from a user's log.
    pub async fn remove_action_by_title(
        &self,
        user_id: Uuid,
        title: &str,
    ) -> Result<Option<(CompletedAction, Totals)>, AppError> {
        let Some(mut progress) = self.progress.get_mut(&user_id) else {
            return Ok(None);
        };
        Ok(progress
            .remove_by_title(title)
            .map(|removed| (removed, progress.totals)))
    }

    // ─── Leaderboard ─────────────────────────────────────────────

    /// One entry per onboarded user with a campus, in registration order.
    pub async fn leaderboard_entries(&self) -> Result<Vec<LeaderboardEntry>, AppError> {
        let mut users: Vec<UserProfile> = self
            .users
            .iter()
            .filter(|u| u.onboarding_completed && u.campus_code.is_some())
            .map(|u| u.value().clone())
            .collect();
        // Snapshots written before sequence numbers existed load with 0.
        users.sort_by(|a, b| {
            a.registered_seq
                .cmp(&b.registered_seq)
                .then_with(|| a.created_at.cmp(&b.created_at))
                .then_with(|| a.auth_id.cmp(&b.auth_id))
        });

        // Users are collected first so no user shard lock is held while
        // reading progress.
        Ok(users
            .into_iter()
            .map(|u| {
                let points = self
                    .progress
                    .get(&u.id)
                    .map(|p| p.totals.points)
                    .unwrap_or(0);
                LeaderboardEntry {
                    user_id: u.id.to_string(),
                    name: u.display_name(),
                    campus_code: u.campus_code.clone().unwrap_or_default(),
                    points,
                }
            })
            .collect())
    }
}
