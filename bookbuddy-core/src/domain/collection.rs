//! Book collection domain model

use serde::{Deserialize, Serialize};

/// A named, ordered grouping of books
///
/// Entries are book ids; the books themselves live in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCollection {
    pub name: String,
    pub book_ids: Vec<String>,
}

impl BookCollection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            book_ids: Vec::new(),
        }
    }

    pub fn contains(&self, book_id: &str) -> bool {
        self.book_ids.iter().any(|id| id == book_id)
    }

    /// Append a book id; returns false if it was already present
    pub fn insert(&mut self, book_id: &str) -> bool {
        if self.contains(book_id) {
            return false;
        }
        self.book_ids.push(book_id.to_string());
        true
    }

    /// Remove a book id; returns false if it was not present
    pub fn remove(&mut self, book_id: &str) -> bool {
        let before = self.book_ids.len();
        self.book_ids.retain(|id| id != book_id);
        self.book_ids.len() != before
    }

    pub fn len(&self) -> usize {
        self.book_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.book_ids.is_empty()
    }
}
