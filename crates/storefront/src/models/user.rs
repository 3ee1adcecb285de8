//! User domain types.
//!
//! Users are fabricated by the mock auth flow; nothing here is verified.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kinnk_core::{Email, UserId};

/// A storefront user as stored in the visitor session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    pub first_name: String,
    pub last_name: String,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
    pub preferences: UserPreferences,
}

impl User {
    /// Full display name.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Communication preferences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub newsletter: bool,
    pub marketing: bool,
    pub notifications: bool,
}

impl Default for UserPreferences {
    /// New accounts only opt in to transactional notifications.
    fn default() -> Self {
        Self {
            newsletter: false,
            marketing: false,
            notifications: true,
        }
    }
}
