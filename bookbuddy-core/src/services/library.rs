//! Library service - the active reader's books

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::validation::validate_new_book;
use crate::domain::result::{Error, Result};
use crate::domain::{Book, ReadingStatus};
use crate::ports::CatalogRepository;

/// Library ordering
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOption {
    #[default]
    Title,
    Author,
    /// Newest first
    DateAdded,
    /// Highest first, unrated last
    Rating,
}

impl SortOption {
    pub fn sort(&self, books: &mut [Book]) {
        match self {
            Self::Title => books.sort_by_cached_key(|b| b.title.to_lowercase()),
            Self::Author => books.sort_by_cached_key(|b| b.author.to_lowercase()),
            Self::DateAdded => books.sort_by(|a, b| b.added_at.cmp(&a.added_at)),
            Self::Rating => books.sort_by(|a, b| match (a.rating, b.rating) {
                (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::DateAdded => "date-added",
            Self::Rating => "rating",
        })
    }
}

impl FromStr for SortOption {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            "date-added" | "date" | "added" => Ok(Self::DateAdded),
            "rating" => Ok(Self::Rating),
            other => Err(format!(
                "Unknown sort '{}' (expected title, author, date-added or rating)",
                other
            )),
        }
    }
}

/// Add-book form input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub categories: Vec<String>,
    pub description: Option<String>,
    pub isbn: Option<String>,
    pub published_year: Option<i32>,
    pub rating: Option<f32>,
    pub page_count: Option<u32>,
    pub language: Option<String>,
    pub cover_url: Option<String>,
}

impl NewBook {
    fn into_book(self) -> Book {
        let categories: Vec<String> = self
            .categories
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        let mut book = Book::new(self.title.trim(), self.author.trim()).with_categories(categories);
        book.description = self.description.filter(|d| !d.trim().is_empty());
        book.isbn = self.isbn.filter(|i| !i.trim().is_empty());
        book.published_year = self.published_year;
        book.rating = self.rating;
        book.page_count = self.page_count;
        book.language = self.language.filter(|l| !l.trim().is_empty());
        book.cover_url = self.cover_url.filter(|u| !u.trim().is_empty());
        book
    }
}

pub struct LibraryService {
    repository: Arc<dyn CatalogRepository>,
}

impl LibraryService {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    fn store(&self, book: Book) -> Result<Book> {
        if !self.repository.add_book(book.clone()) {
            return Err(Error::NoActiveUser);
        }
        Ok(book)
    }

    /// Validate and add a manually entered book
    pub fn add_book(&self, new_book: NewBook) -> Result<Book> {
        validate_new_book(&new_book).into_result()?;
        let book = self.store(new_book.into_book())?;
        debug!(book_id = %book.id, title = %book.title, "added book");
        Ok(book)
    }

    /// Add a book found by remote search, keeping its volume id
    ///
    /// Importing the same volume twice replaces the earlier copy but keeps
    /// its reading status.
    pub fn import(&self, mut book: Book) -> Result<Book> {
        if let Some(existing) = self.repository.get_book(&book.id) {
            book.keep_history(&existing);
        }
        self.store(book)
    }

    /// Replace a stored book wholesale
    pub fn replace_book(&self, book: Book) -> Result<Book> {
        if self.repository.get_book(&book.id).is_none() {
            return Err(Error::not_found(format!("book '{}'", book.id)));
        }
        self.store(book)
    }

    pub fn set_status(&self, id: &str, status: ReadingStatus) -> Result<Book> {
        let mut book = self.get_book(id)?;
        book.status = status;
        self.store(book)
    }

    pub fn get_book(&self, id: &str) -> Result<Book> {
        self.repository
            .get_book(id)
            .ok_or_else(|| Error::not_found(format!("book '{}'", id)))
    }

    pub fn delete_book(&self, id: &str) -> Result<()> {
        if self.repository.current_user().is_none() {
            return Err(Error::NoActiveUser);
        }
        if !self.repository.delete_book(id) {
            return Err(Error::not_found(format!("book '{}'", id)));
        }
        Ok(())
    }

    /// The active reader's books in the given order
    pub fn books(&self, sort: SortOption) -> Vec<Book> {
        let mut books = self.repository.user_books();
        sort.sort(&mut books);
        books
    }

    /// Books whose title, author or category contains `query`; blank means all
    pub fn search(&self, query: &str, sort: SortOption) -> Vec<Book> {
        let query = query.trim();
        if query.is_empty() {
            return self.books(sort);
        }
        let mut books = self.repository.search_books(query);
        sort.sort(&mut books);
        books
    }

    pub fn by_category(&self, name: &str) -> Vec<Book> {
        self.repository.books_by_category(name)
    }
}
