//! Catalog repository port - the keyed store of users, books and collections

use crate::domain::{Book, BookCollection, UserProfile};

/// Catalog store abstraction
///
/// Every mutating operation requires an active user and reports failure
/// with `false`; mutators return `true` only when state actually changed.
/// Reads report absence with `None` or an empty list. There is no richer
/// error channel at this layer - services translate these signals.
///
/// Emails passed in are normalized by the implementation.
pub trait CatalogRepository: Send + Sync {
    // === Users ===

    /// Register a user and make them active. Fails if the email is taken.
    fn register_user(&self, profile: UserProfile, password_hash: String) -> bool;

    /// Stored password hash for an email
    fn password_hash(&self, email: &str) -> Option<String>;

    /// Make a registered user the active one. An unknown email logs out.
    fn activate_user(&self, email: &str) -> Option<UserProfile>;

    fn user_exists(&self, email: &str) -> bool;

    fn current_user(&self) -> Option<UserProfile>;

    /// Replace the active user's profile, keeping their email as the key
    fn update_user_profile(&self, profile: UserProfile) -> bool;

    fn logout(&self);

    // === Books ===

    /// Insert a book, or replace the one with the same id
    fn add_book(&self, book: Book) -> bool;

    fn get_book(&self, id: &str) -> Option<Book>;

    /// Delete a book and drop it from every collection
    fn delete_book(&self, id: &str) -> bool;

    /// Books visible to the active user (empty when nobody is logged in)
    fn user_books(&self) -> Vec<Book>;

    fn all_books(&self) -> Vec<Book>;

    /// Title, author or any category contains `query`, ignoring case
    fn search_books(&self, query: &str) -> Vec<Book>;

    /// Any category equals `category`, ignoring case
    fn books_by_category(&self, category: &str) -> Vec<Book>;

    // === Collections ===

    /// Create an empty collection. Fails if the name is taken.
    fn create_collection(&self, name: &str) -> bool;

    fn delete_collection(&self, name: &str) -> bool;

    fn get_collection(&self, name: &str) -> Option<BookCollection>;

    /// Collections visible to the active user (empty when nobody is logged in)
    fn user_collections(&self) -> Vec<BookCollection>;

    fn add_book_to_collection(&self, name: &str, book_id: &str) -> bool;

    fn remove_book_from_collection(&self, name: &str, book_id: &str) -> bool;
}
