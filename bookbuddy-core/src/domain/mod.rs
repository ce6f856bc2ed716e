//! Core domain entities
//!
//! All book-collection entities are defined here. These are pure data
//! structures with matching logic - no I/O or external dependencies.

mod book;
pub mod category;
mod collection;
mod user;
pub mod result;

pub use book::{Book, ReadingStatus};
pub use category::{BookCategory, Taxonomy, CATEGORIES};
pub use collection::BookCollection;
pub use user::{normalize_email, GoalType, ReadingGoal, ReadingPreferences, UserProfile};
