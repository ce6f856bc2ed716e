//! Search service - remote catalogue lookups
//!
//! The provider call blocks, so it runs on tokio's blocking pool. Failures
//! never reach the caller: they are logged and turned into an empty result.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::Book;
use crate::ports::BookSearchProvider;

/// Queries shorter than this (after trimming) are not sent
pub const MIN_QUERY_LEN: usize = 3;

pub struct SearchService {
    provider: Arc<dyn BookSearchProvider>,
}

impl SearchService {
    pub fn new(provider: Arc<dyn BookSearchProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Search the remote catalogue
    ///
    /// Returns an empty list for short queries and on any failure.
    pub async fn search(&self, query: &str) -> Vec<Book> {
        let query = query.trim().to_string();
        if query.chars().count() < MIN_QUERY_LEN {
            debug!(%query, "query too short, skipping remote search");
            return Vec::new();
        }

        let provider = Arc::clone(&self.provider);
        let result = tokio::task::spawn_blocking(move || provider.search(&query)).await;

        match result {
            Ok(Ok(books)) => {
                debug!(count = books.len(), provider = self.provider.name(), "remote search done");
                books
            }
            Ok(Err(e)) => {
                warn!(provider = self.provider.name(), "Remote search failed: {}", e);
                Vec::new()
            }
            Err(e) => {
                warn!("Remote search task failed: {}", e);
                Vec::new()
            }
        }
    }
}
