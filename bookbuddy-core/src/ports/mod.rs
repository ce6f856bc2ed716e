//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The services
//! depend only on these traits, not on concrete implementations.

mod book_search;
mod repository;

pub use book_search::BookSearchProvider;
pub use repository::CatalogRepository;
