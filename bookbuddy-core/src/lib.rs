//! BookBuddy Core - Business logic for a personal book collection
//!
//! This crate implements the core domain logic following hexagonal architecture:
//!
//! - **domain**: Core entities (Book, BookCategory, UserProfile, BookCollection)
//! - **ports**: Trait definitions for external dependencies (CatalogRepository, BookSearchProvider)
//! - **services**: Business logic orchestration
//! - **adapters**: Concrete implementations (in-memory catalog, Google Books)

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod services;

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use adapters::google_books::GoogleBooksProvider;
use adapters::memory::InMemoryCatalog;
use adapters::sample::{
    generate_sample_books, generate_sample_collections, generate_sample_user, SAMPLE_PASSWORD,
};
use config::Config;
use ports::{BookSearchProvider, CatalogRepository};
use services::*;

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result, ValidationErrors};
pub use domain::{
    Book, BookCategory, BookCollection, ReadingStatus, Taxonomy, UserProfile, CATEGORIES,
};

/// Main context for BookBuddy operations
///
/// Owns the catalog store and every service. The store lives as long as the
/// context; nothing is persisted.
pub struct BookBuddyContext {
    pub config: Config,
    pub repository: Arc<dyn CatalogRepository>,
    pub auth_service: AuthService,
    pub library_service: LibraryService,
    pub collection_service: CollectionService,
    pub category_service: CategoryService,
    pub search_service: SearchService,
    pub status_service: StatusService,
}

impl BookBuddyContext {
    /// Create a context from the settings in `bookbuddy_dir`
    pub fn new(bookbuddy_dir: &Path) -> anyhow::Result<Self> {
        let config = Config::load(bookbuddy_dir)?;
        Self::from_config(config)
    }

    /// Create a context searching Google Books as configured
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let provider = Arc::new(GoogleBooksProvider::new(config.search.clone()));
        Self::with_provider(config, provider)
    }

    /// Create a context with a custom search provider
    pub fn with_provider(
        config: Config,
        provider: Arc<dyn BookSearchProvider>,
    ) -> anyhow::Result<Self> {
        let repository: Arc<dyn CatalogRepository> = Arc::new(InMemoryCatalog::new());

        let context = Self {
            auth_service: AuthService::new(Arc::clone(&repository)),
            library_service: LibraryService::new(Arc::clone(&repository)),
            collection_service: CollectionService::new(Arc::clone(&repository)),
            category_service: CategoryService::new(Arc::clone(&repository)),
            search_service: SearchService::new(provider),
            status_service: StatusService::new(Arc::clone(&repository)),
            repository,
            config,
        };

        if context.config.sample_data {
            context.load_sample_data()?;
        }

        Ok(context)
    }

    /// Context with default settings and no settings file
    pub fn in_memory() -> anyhow::Result<Self> {
        Self::from_config(Config::default())
    }

    /// Seed the store with the sample reader, books and collections
    ///
    /// The sample reader is left logged in.
    pub fn load_sample_data(&self) -> Result<UserProfile> {
        let user = generate_sample_user();
        if self.repository.user_exists(&user.email) {
            return Err(Error::already_exists(format!("user '{}'", user.email)));
        }

        let user = self.auth_service.register_profile(user, SAMPLE_PASSWORD)?;
        for book in generate_sample_books() {
            self.library_service.import(book)?;
        }
        for (name, book_ids) in generate_sample_collections() {
            self.collection_service.create(name)?;
            for id in book_ids {
                self.collection_service.add_book(name, id)?;
            }
        }

        info!("loaded sample data");
        Ok(user)
    }
}
