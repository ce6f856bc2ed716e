//! In-memory catalog implementation
//!
//! Users, books and collections live in process memory only. Books and
//! collections keep insertion order so listings are stable.

use std::collections::HashMap;

use parking_lot::RwLock;
use tracing::debug;

use crate::domain::{normalize_email, Book, BookCollection, UserProfile};
use crate::ports::CatalogRepository;

#[derive(Debug, Clone)]
struct UserRecord {
    profile: UserProfile,
    password_hash: String,
}

#[derive(Debug, Default)]
struct CatalogState {
    users: HashMap<String, UserRecord>,
    books: Vec<Book>,
    collections: Vec<BookCollection>,
    /// Normalized email of the active user
    current_user: Option<String>,
}

impl CatalogState {
    fn has_active_user(&self) -> bool {
        self.current_user.is_some()
    }

    fn book_index(&self, id: &str) -> Option<usize> {
        self.books.iter().position(|b| b.id == id)
    }

    fn collection_mut(&mut self, name: &str) -> Option<&mut BookCollection> {
        self.collections.iter_mut().find(|c| c.name == name)
    }
}

/// In-memory catalog store
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: RwLock<CatalogState>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CatalogRepository for InMemoryCatalog {
    fn register_user(&self, mut profile: UserProfile, password_hash: String) -> bool {
        let mut state = self.state.write();
        let email = normalize_email(&profile.email);
        if state.users.contains_key(&email) {
            debug!("registration rejected: email already registered");
            return false;
        }

        profile.email = email.clone();
        state.users.insert(
            email.clone(),
            UserRecord {
                profile,
                password_hash,
            },
        );
        state.current_user = Some(email);
        true
    }

    fn password_hash(&self, email: &str) -> Option<String> {
        let state = self.state.read();
        state
            .users
            .get(&normalize_email(email))
            .map(|u| u.password_hash.clone())
    }

    fn activate_user(&self, email: &str) -> Option<UserProfile> {
        let mut state = self.state.write();
        let email = normalize_email(email);
        // An unknown email ends the current session
        let profile = state.users.get(&email).map(|u| u.profile.clone());
        state.current_user = profile.as_ref().map(|_| email);
        profile
    }

    fn user_exists(&self, email: &str) -> bool {
        self.state.read().users.contains_key(&normalize_email(email))
    }

    fn current_user(&self) -> Option<UserProfile> {
        let state = self.state.read();
        state
            .current_user
            .as_ref()
            .and_then(|email| state.users.get(email))
            .map(|u| u.profile.clone())
    }

    fn update_user_profile(&self, mut profile: UserProfile) -> bool {
        let mut state = self.state.write();
        let Some(email) = state.current_user.clone() else {
            return false;
        };
        let Some(record) = state.users.get_mut(&email) else {
            return false;
        };

        profile.email = email;
        record.profile = profile;
        true
    }

    fn logout(&self) {
        self.state.write().current_user = None;
    }

    fn add_book(&self, book: Book) -> bool {
        let mut state = self.state.write();
        if !state.has_active_user() {
            return false;
        }

        debug!(book_id = %book.id, "storing book");
        match state.book_index(&book.id) {
            Some(index) => state.books[index] = book,
            None => state.books.push(book),
        }
        true
    }

    fn get_book(&self, id: &str) -> Option<Book> {
        let state = self.state.read();
        state.books.iter().find(|b| b.id == id).cloned()
    }

    fn delete_book(&self, id: &str) -> bool {
        let mut state = self.state.write();
        if !state.has_active_user() {
            return false;
        }
        let Some(index) = state.book_index(id) else {
            return false;
        };

        state.books.remove(index);
        for collection in state.collections.iter_mut() {
            collection.remove(id);
        }
        debug!(book_id = %id, "deleted book");
        true
    }

    fn user_books(&self) -> Vec<Book> {
        let state = self.state.read();
        if !state.has_active_user() {
            return Vec::new();
        }
        // Single-user catalog: every book belongs to whoever is logged in
        state.books.clone()
    }

    fn all_books(&self) -> Vec<Book> {
        self.state.read().books.clone()
    }

    fn search_books(&self, query: &str) -> Vec<Book> {
        let query = query.to_lowercase();
        let state = self.state.read();
        state
            .books
            .iter()
            .filter(|b| b.matches_lowercase(&query))
            .cloned()
            .collect()
    }

    fn books_by_category(&self, category: &str) -> Vec<Book> {
        let state = self.state.read();
        state
            .books
            .iter()
            .filter(|b| b.has_category(category))
            .cloned()
            .collect()
    }

    fn create_collection(&self, name: &str) -> bool {
        let mut state = self.state.write();
        if !state.has_active_user() || state.collections.iter().any(|c| c.name == name) {
            return false;
        }
        state.collections.push(BookCollection::new(name));
        true
    }

    fn delete_collection(&self, name: &str) -> bool {
        let mut state = self.state.write();
        if !state.has_active_user() {
            return false;
        }
        let before = state.collections.len();
        state.collections.retain(|c| c.name != name);
        state.collections.len() != before
    }

    fn get_collection(&self, name: &str) -> Option<BookCollection> {
        let state = self.state.read();
        state.collections.iter().find(|c| c.name == name).cloned()
    }

    fn user_collections(&self) -> Vec<BookCollection> {
        let state = self.state.read();
        if !state.has_active_user() {
            return Vec::new();
        }
        state.collections.clone()
    }

    fn add_book_to_collection(&self, name: &str, book_id: &str) -> bool {
        let mut state = self.state.write();
        if !state.has_active_user() || state.book_index(book_id).is_none() {
            return false;
        }
        match state.collection_mut(name) {
            Some(collection) => collection.insert(book_id),
            None => false,
        }
    }

    fn remove_book_from_collection(&self, name: &str, book_id: &str) -> bool {
        let mut state = self.state.write();
        if !state.has_active_user() {
            return false;
        }
        match state.collection_mut(name) {
            Some(collection) => collection.remove(book_id),
            None => false,
        }
    }
}
