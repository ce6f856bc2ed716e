//! Sample data for first runs and demos
//!
//! One reader, three books and three collections, each collection holding
//! one of the books.

use chrono::{Duration, Utc};

use crate::domain::{Book, GoalType, ReadingGoal, ReadingPreferences, UserProfile};

pub const SAMPLE_EMAIL: &str = "user@example.com";

/// Password of the sample account. Satisfies the registration rules.
pub const SAMPLE_PASSWORD: &str = "BookLover1";

/// Generate the sample reader profile
pub fn generate_sample_user() -> UserProfile {
    let mut user = UserProfile::new("booklover", SAMPLE_EMAIL);
    user.display_name = "Book Lover".to_string();
    user.bio = "I love reading books!".to_string();
    user.favorite_genres = vec!["Fiction".into(), "Mystery".into(), "Romance".into()];
    user.reading_preferences = ReadingPreferences {
        preferred_genres: vec!["Fiction".into(), "Mystery".into()],
        reading_goal: ReadingGoal {
            target_books_per_year: 24,
            current_progress: 5,
            goal_type: GoalType::Yearly,
        },
        notifications_enabled: true,
        share_reading_activity: true,
    };
    user
}

/// Generate the sample books, oldest addition first
pub fn generate_sample_books() -> Vec<Book> {
    let now = Utc::now();

    let mut mice = Book::with_id("book1", "Of Mice and Men", "John Steinbeck")
        .with_categories(["Fiction", "Classics"]);
    mice.description = Some("A classic American novel about friendship and dreams.".into());
    mice.published_year = Some(1937);
    mice.rating = Some(4.5);
    mice.page_count = Some(107);
    mice.added_at = now - Duration::days(2);

    let mut housemaid = Book::with_id("book2", "The Housemaid", "Freida McFadden")
        .with_categories(["Thriller", "Mystery"]);
    housemaid.description =
        Some("A psychological thriller about a housemaid's dark secrets.".into());
    housemaid.published_year = Some(2022);
    housemaid.rating = Some(4.2);
    housemaid.page_count = Some(320);
    housemaid.added_at = now - Duration::days(1);

    let mut mockingbird = Book::with_id("book3", "To Kill a Mockingbird", "Harper Lee")
        .with_categories(["Fiction", "Classics"]);
    mockingbird.description =
        Some("A powerful story of racial injustice and childhood innocence.".into());
    mockingbird.published_year = Some(1960);
    mockingbird.rating = Some(4.8);
    mockingbird.page_count = Some(281);
    mockingbird.added_at = now;

    vec![mice, housemaid, mockingbird]
}

/// Sample collections as (name, book ids)
pub fn generate_sample_collections() -> Vec<(&'static str, Vec<&'static str>)> {
    vec![
        ("Favorites", vec!["book1"]),
        ("To Read", vec!["book2"]),
        ("Classics", vec!["book3"]),
    ]
}
