//! Collection service - named groupings of the reader's books

use std::sync::Arc;

use tracing::debug;

use crate::domain::result::{Error, Result};
use crate::domain::{Book, BookCollection, Taxonomy};
use crate::ports::CatalogRepository;

pub struct CollectionService {
    repository: Arc<dyn CatalogRepository>,
    taxonomy: Taxonomy,
}

impl CollectionService {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self {
            repository,
            taxonomy: Taxonomy::builtin(),
        }
    }

    fn require_user(&self) -> Result<()> {
        match self.repository.current_user() {
            Some(_) => Ok(()),
            None => Err(Error::NoActiveUser),
        }
    }

    pub fn create(&self, name: &str) -> Result<BookCollection> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::validation("name", "Please enter a collection name"));
        }
        self.require_user()?;
        if !self.repository.create_collection(name) {
            return Err(Error::already_exists(format!("collection '{}'", name)));
        }
        debug!(collection = %name, "created collection");
        self.get(name)
    }

    pub fn delete(&self, name: &str) -> Result<()> {
        self.require_user()?;
        if !self.repository.delete_collection(name) {
            return Err(Error::not_found(format!("collection '{}'", name)));
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<BookCollection> {
        self.repository
            .get_collection(name)
            .ok_or_else(|| Error::not_found(format!("collection '{}'", name)))
    }

    pub fn list(&self) -> Vec<BookCollection> {
        self.repository.user_collections()
    }

    pub fn add_book(&self, name: &str, book_id: &str) -> Result<()> {
        self.require_user()?;
        let collection = self.get(name)?;
        if self.repository.get_book(book_id).is_none() {
            return Err(Error::not_found(format!("book '{}'", book_id)));
        }
        if collection.contains(book_id) {
            return Err(Error::already_exists(format!(
                "book '{}' in collection '{}'",
                book_id, name
            )));
        }
        if !self.repository.add_book_to_collection(name, book_id) {
            return Err(Error::Other(format!("Could not add book to '{}'", name)));
        }
        Ok(())
    }

    pub fn remove_book(&self, name: &str, book_id: &str) -> Result<()> {
        self.require_user()?;
        self.get(name)?;
        if !self.repository.remove_book_from_collection(name, book_id) {
            return Err(Error::not_found(format!(
                "book '{}' in collection '{}'",
                book_id, name
            )));
        }
        Ok(())
    }

    /// Books of a collection in collection order
    pub fn books(&self, name: &str) -> Result<Vec<Book>> {
        let collection = self.get(name)?;
        Ok(collection
            .book_ids
            .iter()
            .filter_map(|id| self.repository.get_book(id))
            .collect())
    }

    /// Books of a collection tagged with `category`, ignoring case
    ///
    /// A top-level category name also matches books tagged with any of its
    /// subcategory names.
    pub fn filter_by_category(&self, name: &str, category: &str) -> Result<Vec<Book>> {
        let books = self.books(name)?;
        let filtered = match self.taxonomy.by_name(category) {
            Some(entry) => books.into_iter().filter(|b| entry.contains_book(b)).collect(),
            None => books.into_iter().filter(|b| b.has_category(category)).collect(),
        };
        Ok(filtered)
    }

    /// Store `book` and file it under the collection called `name`
    ///
    /// The collection is found ignoring case and created when missing. A book
    /// already in the library keeps its reading status and date added.
    pub fn file_book(&self, name: &str, mut book: Book) -> Result<BookCollection> {
        self.require_user()?;
        let wanted = name.trim().to_lowercase();
        let target = self
            .list()
            .into_iter()
            .find(|c| c.name.to_lowercase() == wanted);
        let target = match target {
            Some(collection) => collection,
            None => self.create(name)?,
        };

        if let Some(existing) = self.repository.get_book(&book.id) {
            book.keep_history(&existing);
        }
        let book_id = book.id.clone();
        if !self.repository.add_book(book) {
            return Err(Error::NoActiveUser);
        }
        // Already filed is fine
        self.repository.add_book_to_collection(&target.name, &book_id);
        self.get(&target.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryCatalog;
    use crate::domain::{ReadingStatus, UserProfile};
    use chrono::{Duration, Utc};

    fn service() -> (Arc<InMemoryCatalog>, CollectionService) {
        let catalog = Arc::new(InMemoryCatalog::new());
        catalog.register_user(UserProfile::new("reader", "reader@example.com"), "hash".into());
        (catalog.clone(), CollectionService::new(catalog))
    }

    #[test]
    fn test_create_duplicate_name() {
        let (_, collections) = service();
        collections.create("Favorites").unwrap();
        assert!(matches!(collections.create("Favorites"), Err(Error::AlreadyExists(_))));
        assert!(matches!(collections.create("  "), Err(Error::Validation(_))));
    }

    #[test]
    fn test_add_and_remove_book() {
        let (catalog, collections) = service();
        catalog.add_book(Book::with_id("b1", "Dune", "Frank Herbert"));
        collections.create("Favorites").unwrap();

        collections.add_book("Favorites", "b1").unwrap();
        assert!(matches!(collections.add_book("Favorites", "b1"), Err(Error::AlreadyExists(_))));
        assert!(matches!(collections.add_book("Favorites", "b2"), Err(Error::NotFound(_))));
        assert!(matches!(collections.add_book("Nope", "b1"), Err(Error::NotFound(_))));
        assert_eq!(collections.books("Favorites").unwrap()[0].title, "Dune");

        collections.remove_book("Favorites", "b1").unwrap();
        assert!(matches!(collections.remove_book("Favorites", "b1"), Err(Error::NotFound(_))));
    }

    #[test]
    fn test_filter_by_category_matches_subcategories() {
        let (catalog, collections) = service();
        catalog.add_book(Book::with_id("b1", "The Housemaid", "Freida McFadden").with_categories(["Thriller"]));
        catalog.add_book(Book::with_id("b2", "Sapiens", "Yuval Noah Harari").with_categories(["History"]));
        collections.create("Mixed").unwrap();
        collections.add_book("Mixed", "b1").unwrap();
        collections.add_book("Mixed", "b2").unwrap();

        let fiction = collections.filter_by_category("Mixed", "FICTION").unwrap();
        assert_eq!(fiction.len(), 1);
        assert_eq!(fiction[0].id, "b1");

        let thriller = collections.filter_by_category("Mixed", "thriller").unwrap();
        assert_eq!(thriller[0].id, "b1");

        assert!(collections.filter_by_category("Mixed", "Poetry").unwrap().is_empty());
    }

    #[test]
    fn test_file_book_creates_or_reuses_collection() {
        let (_, collections) = service();
        collections.create("To Read").unwrap();

        let filed = collections
            .file_book("to read", Book::with_id("b1", "Dune", "Frank Herbert"))
            .unwrap();
        assert_eq!(filed.name, "To Read");
        assert_eq!(filed.book_ids, vec!["b1"]);

        let created = collections
            .file_book("Sci-Fi", Book::with_id("b2", "Hyperion", "Dan Simmons"))
            .unwrap();
        assert_eq!(created.name, "Sci-Fi");
        assert_eq!(collections.list().len(), 2);
    }

    #[test]
    fn test_file_book_keeps_reading_history() {
        let (catalog, collections) = service();
        let mut stored = Book::with_id("vol1", "Dune", "Frank Herbert");
        stored.status = ReadingStatus::Finished;
        stored.added_at = Utc::now() - Duration::days(30);
        let added_at = stored.added_at;
        catalog.add_book(stored);

        let fresh = Book::with_id("vol1", "Dune (Deluxe Edition)", "Frank Herbert");
        collections.file_book("Shelf", fresh).unwrap();

        let book = catalog.get_book("vol1").unwrap();
        assert_eq!(book.title, "Dune (Deluxe Edition)");
        assert_eq!(book.status, ReadingStatus::Finished);
        assert_eq!(book.added_at, added_at);
    }

    #[test]
    fn test_mutations_require_login() {
        let (catalog, collections) = service();
        catalog.logout();
        assert!(matches!(collections.create("Favorites"), Err(Error::NoActiveUser)));
        assert!(matches!(collections.delete("Favorites"), Err(Error::NoActiveUser)));
        assert!(collections.list().is_empty());
    }
}
