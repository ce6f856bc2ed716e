//! User profile domain model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Period a reading goal is measured over
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Weekly,
    Monthly,
    #[default]
    Yearly,
}

impl fmt::Display for GoalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        })
    }
}

impl FromStr for GoalType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            other => Err(format!("Unknown goal period '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingGoal {
    pub target_books_per_year: u32,
    pub current_progress: u32,
    pub goal_type: GoalType,
}

impl Default for ReadingGoal {
    fn default() -> Self {
        Self {
            target_books_per_year: 12,
            current_progress: 0,
            goal_type: GoalType::Yearly,
        }
    }
}

impl ReadingGoal {
    /// Progress towards the target as a fraction in `0.0..=1.0`
    pub fn completion(&self) -> f32 {
        if self.target_books_per_year == 0 {
            return 0.0;
        }
        (self.current_progress as f32 / self.target_books_per_year as f32).min(1.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingPreferences {
    pub preferred_genres: Vec<String>,
    pub reading_goal: ReadingGoal,
    pub notifications_enabled: bool,
    pub share_reading_activity: bool,
}

impl Default for ReadingPreferences {
    fn default() -> Self {
        Self {
            preferred_genres: Vec::new(),
            reading_goal: ReadingGoal::default(),
            notifications_enabled: true,
            share_reading_activity: false,
        }
    }
}

/// A registered reader, keyed by email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub bio: String,
    pub profile_picture_url: String,
    pub reading_preferences: ReadingPreferences,
    pub favorite_genres: Vec<String>,
    pub joined_at: DateTime<Utc>,
    pub books_read: u32,
    pub reviews_written: u32,
    pub followers_count: u32,
    pub following_count: u32,
    pub is_public_profile: bool,
    pub location: String,
    pub website: String,
}

impl UserProfile {
    /// New profile for a freshly registered user
    pub fn new(username: impl Into<String>, email: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            user_id: Uuid::new_v4().to_string(),
            display_name: username.clone(),
            username,
            email: normalize_email(&email.into()),
            bio: String::new(),
            profile_picture_url: String::new(),
            reading_preferences: ReadingPreferences::default(),
            favorite_genres: Vec::new(),
            joined_at: Utc::now(),
            books_read: 0,
            reviews_written: 0,
            followers_count: 0,
            following_count: 0,
            is_public_profile: true,
            location: String::new(),
            website: String::new(),
        }
    }
}

/// Canonical form of an email used as the user key
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
