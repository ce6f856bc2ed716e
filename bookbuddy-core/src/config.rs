//! Configuration management
//!
//! Read-only settings.json in the BookBuddy directory:
//! ```json
//! {
//!   "search": { "baseUrl": "...", "connectTimeoutSecs": 10, "requestTimeoutSecs": 10 },
//!   "app": { "sampleData": false }
//! }
//! ```
//! Unknown keys are ignored and a malformed file falls back to defaults.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::adapters::google_books::GOOGLE_BOOKS_DEFAULT_URL;

/// Environment variable that replaces the catalogue endpoint
pub const SEARCH_BASE_URL_ENV: &str = "BOOKBUDDY_SEARCH_BASE_URL";

/// Environment variable that forces sample data on or off
pub const SAMPLE_DATA_ENV: &str = "BOOKBUDDY_SAMPLE_DATA";

/// Raw settings.json structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SettingsFile {
    #[serde(default)]
    search: SearchConfig,
    #[serde(default)]
    app: AppSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AppSettings {
    #[serde(default)]
    sample_data: bool,
}

/// Remote catalogue settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchConfig {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: GOOGLE_BOOKS_DEFAULT_URL.to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 10,
        }
    }
}

impl SearchConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// BookBuddy configuration
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub search: SearchConfig,
    /// Seed the store with the sample reader and books on startup
    pub sample_data: bool,
}

impl Config {
    /// Load config from the BookBuddy directory
    ///
    /// Environment overrides:
    /// - `BOOKBUDDY_SEARCH_BASE_URL` replaces the catalogue endpoint
    /// - `BOOKBUDDY_SAMPLE_DATA` forces sample data on or off
    pub fn load(bookbuddy_dir: &Path) -> Result<Self> {
        let settings_path = bookbuddy_dir.join("settings.json");

        let raw: SettingsFile = if settings_path.exists() {
            let content = std::fs::read_to_string(&settings_path)
                .with_context(|| format!("Failed to read {}", settings_path.display()))?;
            serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed {}: {}", settings_path.display(), e);
                SettingsFile::default()
            })
        } else {
            SettingsFile::default()
        };

        let mut search = raw.search;
        if let Ok(url) = std::env::var(SEARCH_BASE_URL_ENV) {
            if !url.trim().is_empty() {
                search.base_url = url;
            }
        }

        let sample_data = match std::env::var(SAMPLE_DATA_ENV).ok().as_deref() {
            Some("true" | "1" | "yes" | "TRUE" | "YES") => true,
            Some("false" | "0" | "no" | "FALSE" | "NO") => false,
            _ => raw.app.sample_data,
        };

        Ok(Self {
            search,
            sample_data,
        })
    }
}
