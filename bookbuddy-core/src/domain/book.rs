//! Book domain model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a reader is with a book
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    #[default]
    NotStarted,
    Reading,
    Finished,
}

impl ReadingStatus {
    pub const ALL: [ReadingStatus; 3] = [Self::NotStarted, Self::Reading, Self::Finished];

    pub fn label(&self) -> &'static str {
        match self {
            Self::NotStarted => "Not Started",
            Self::Reading => "Reading",
            Self::Finished => "Finished",
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ReadingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_alphanumeric())
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "notstarted" | "unread" | "toread" => Ok(Self::NotStarted),
            "reading" | "inprogress" => Ok(Self::Reading),
            "finished" | "read" | "done" => Ok(Self::Finished),
            _ => Err(format!(
                "Unknown reading status '{}' (expected not-started, reading or finished)",
                s
            )),
        }
    }
}

/// A book in the catalog
///
/// Books are immutable values: edits replace the whole record by id.
/// Collections reference books by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    pub id: String,
    pub title: String,
    pub author: String,
    /// Category names, matched case-insensitively against the taxonomy
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
    /// Rating on a 0-5 scale
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default)]
    pub status: ReadingStatus,
    pub added_at: DateTime<Utc>,
}

impl Book {
    /// Create a book with a fresh id and no optional metadata
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, author)
    }

    pub fn with_id(id: impl Into<String>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            categories: Vec::new(),
            cover_url: None,
            isbn: None,
            description: None,
            published_year: None,
            rating: None,
            page_count: None,
            language: None,
            status: ReadingStatus::NotStarted,
            added_at: Utc::now(),
        }
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    /// True if title, author or any category contains `query`, ignoring case
    ///
    /// `query` must already be lower-cased.
    pub fn matches_lowercase(&self, query: &str) -> bool {
        self.title.to_lowercase().contains(query)
            || self.author.to_lowercase().contains(query)
            || self
                .categories
                .iter()
                .any(|c| c.to_lowercase().contains(query))
    }

    /// Keep the reader's history from the stored copy of this book
    ///
    /// Metadata comes from `self`; reading status and date added from `stored`.
    pub fn keep_history(&mut self, stored: &Book) {
        self.status = stored.status;
        self.added_at = stored.added_at;
    }

    /// True if any category equals `name`, ignoring case
    pub fn has_category(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.categories.iter().any(|c| c.to_lowercase() == name)
    }
}
