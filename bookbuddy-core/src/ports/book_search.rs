//! Remote book search provider port
//!
//! Defines the interface for looking books up in an external catalogue
//! (Google Books, a mock server in tests, etc.)

use crate::domain::result::Result;
use crate::domain::Book;

/// Remote catalogue lookup
///
/// Implementations perform a single blocking request per call. Callers that
/// must not block run them on a background thread (see `SearchService`).
pub trait BookSearchProvider: Send + Sync {
    /// Provider name (e.g., "google_books")
    fn name(&self) -> &str;

    /// Look up books matching a free-text query
    fn search(&self, query: &str) -> Result<Vec<Book>>;
}
