//! User profile model for storage and API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// How a student usually gets to campus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum CommuteMode {
    Walk,
    Bike,
    Scooter,
    Transit,
    Carpool,
    Car,
    Remote,
}

/// User profile stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    /// Profile ID (also keys the user's progress)
    pub id: Uuid,
    /// Identity provider subject (unique per account)
    pub auth_id: String,
    /// Email address from the access token, if present
    pub email: Option<String>,
    /// Display name
    pub name: Option<String>,
    /// Profile picture URL
    pub avatar_url: Option<String>,
    /// Whether the one-time onboarding flow was completed
    pub onboarding_completed: bool,
    /// University name collected during onboarding
    #[serde(default)]
    pub university: Option<String>,
    /// Short campus code used for university leaderboards
    #[serde(default)]
    pub campus_code: Option<String>,
    /// Usual commute, collected during onboarding
    #[serde(default)]
    pub commute_mode: Option<CommuteMode>,
    /// Registration order, assigned by the store when the profile is created
    #[serde(default)]
    pub registered_seq: u64,
    /// When the profile was created (RFC 3339)
    pub created_at: String,
    /// Last profile change (RFC 3339)
    pub updated_at: String,
}

impl UserProfile {
    /// A fresh profile for a first-time user.
    pub fn new(auth_id: &str, email: Option<String>, now: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            auth_id: auth_id.to_string(),
            email,
            name: None,
            avatar_url: None,
            onboarding_completed: false,
            university: None,
            campus_code: None,
            commute_mode: None,
            registered_seq: 0,
            created_at: now.to_string(),
            updated_at: now.to_string(),
        }
    }

    /// Name shown on leaderboards: display name, else the email's local part.
    pub fn display_name(&self) -> String {
        if let Some(name) = self.name.as_deref().filter(|n| !n.trim().is_empty()) {
            return name.to_string();
        }
        self.email
            .as_deref()
            .and_then(|e| e.split('@').next())
            .filter(|local| !local.is_empty())
            .unwrap_or("Anonymous")
            .to_string()
    }
}
