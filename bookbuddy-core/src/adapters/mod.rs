//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - In-memory maps for the CatalogRepository port
//! - Google Books HTTP client for BookSearchProvider
//! - Sample data for demos

pub mod google_books;
pub mod memory;
pub mod sample;

#[cfg(test)]
pub mod google_books_mock;
