//! Category service - the static taxonomy applied to the store's books

use std::sync::Arc;

use serde::Serialize;

use crate::domain::{Book, BookCategory, Taxonomy};
use crate::ports::CatalogRepository;

/// A top-level category with the number of books filed under it
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub category: &'static BookCategory,
    pub book_count: usize,
}

pub struct CategoryService {
    repository: Arc<dyn CatalogRepository>,
    taxonomy: Taxonomy,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self {
            repository,
            taxonomy: Taxonomy::builtin(),
        }
    }

    pub fn all(&self) -> &'static [BookCategory] {
        self.taxonomy.all()
    }

    pub fn by_id(&self, id: &str) -> Option<&'static BookCategory> {
        self.taxonomy.by_id(id)
    }

    pub fn subcategories(&self, parent_id: &str) -> &'static [BookCategory] {
        self.taxonomy.subcategories(parent_id)
    }

    pub fn parent_of(&self, id: &str) -> Option<&'static BookCategory> {
        self.taxonomy.parent_of(id)
    }

    pub fn search(&self, query: &str) -> Vec<&'static BookCategory> {
        self.taxonomy.search(query)
    }

    pub fn categorize(&self, book: &Book) -> Vec<&'static BookCategory> {
        self.taxonomy.categorize(book)
    }

    /// Stored books in category `id` or any of its subcategories
    pub fn books_in_category(&self, id: &str) -> Vec<Book> {
        let books = self.repository.all_books();
        self.taxonomy
            .books_in_category(id, &books)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Book count per top-level category, in taxonomy order
    pub fn book_counts(&self) -> Vec<CategoryCount> {
        let books = self.repository.all_books();
        self.taxonomy
            .all()
            .iter()
            .map(|category| CategoryCount {
                category,
                book_count: books.iter().filter(|b| category.contains_book(b)).count(),
            })
            .collect()
    }
}
