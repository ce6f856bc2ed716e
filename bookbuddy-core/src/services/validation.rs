//! Form validation helpers
//!
//! Each check returns a `ValidationErrors` map of field name to message.
//! Rules for a field run in order and only the first failure is reported.

use std::sync::OnceLock;

use regex::Regex;
use serde::Deserialize;

use super::library::NewBook;
use crate::domain::result::ValidationErrors;

pub const FIELD_USERNAME: &str = "username";
pub const FIELD_EMAIL: &str = "email";
pub const FIELD_PASSWORD: &str = "password";
pub const FIELD_CONFIRM_PASSWORD: &str = "confirm_password";
pub const FIELD_TERMS: &str = "terms";
/// Form-wide messages not tied to a single field
pub const FIELD_FORM: &str = "form";
pub const FIELD_TITLE: &str = "title";
pub const FIELD_AUTHOR: &str = "author";
pub const FIELD_CATEGORIES: &str = "categories";
pub const FIELD_RATING: &str = "rating";

const USERNAME_MIN_LEN: usize = 3;
const USERNAME_MAX_LEN: usize = 20;
const PASSWORD_MIN_LEN: usize = 8;

/// Registration form input
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationData {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub agree_to_terms: bool,
}

fn username_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("username pattern is valid"))
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^[a-zA-Z0-9+._%\-]{1,256}@[a-zA-Z0-9][a-zA-Z0-9\-]{0,64}(\.[a-zA-Z0-9][a-zA-Z0-9\-]{0,25})+$",
        )
        .expect("email pattern is valid")
    })
}

pub fn is_valid_email(email: &str) -> bool {
    email_regex().is_match(email.trim())
}

fn username_error(username: &str) -> Option<&'static str> {
    let len = username.chars().count();
    if username.trim().is_empty() {
        Some("Username is required")
    } else if len < USERNAME_MIN_LEN {
        Some("Username must be at least 3 characters")
    } else if len > USERNAME_MAX_LEN {
        Some("Username must be less than 20 characters")
    } else if !username_regex().is_match(username) {
        Some("Username can only contain letters, numbers, and underscores")
    } else {
        None
    }
}

fn email_error(email: &str) -> Option<&'static str> {
    if email.trim().is_empty() {
        Some("Email is required")
    } else if !is_valid_email(email) {
        Some("Please enter a valid email address")
    } else {
        None
    }
}

fn password_error(password: &str) -> Option<&'static str> {
    if password.trim().is_empty() {
        Some("Password is required")
    } else if password.chars().count() < PASSWORD_MIN_LEN {
        Some("Password must be at least 8 characters")
    } else if !password.chars().any(|c| c.is_uppercase()) {
        Some("Password must contain at least one uppercase letter")
    } else if !password.chars().any(|c| c.is_lowercase()) {
        Some("Password must contain at least one lowercase letter")
    } else if !password.chars().any(|c| c.is_ascii_digit()) {
        Some("Password must contain at least one number")
    } else {
        None
    }
}

fn confirm_error(password: &str, confirm: &str) -> Option<&'static str> {
    if confirm.trim().is_empty() {
        Some("Please confirm your password")
    } else if password != confirm {
        Some("Passwords do not match")
    } else {
        None
    }
}

/// Validate the registration form
pub fn validate_registration(data: &RegistrationData) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if let Some(msg) = username_error(&data.username) {
        errors.add(FIELD_USERNAME, msg);
    }
    if let Some(msg) = email_error(&data.email) {
        errors.add(FIELD_EMAIL, msg);
    }
    if let Some(msg) = password_error(&data.password) {
        errors.add(FIELD_PASSWORD, msg);
    }
    if let Some(msg) = confirm_error(&data.password, &data.confirm_password) {
        errors.add(FIELD_CONFIRM_PASSWORD, msg);
    }
    if !data.agree_to_terms {
        errors.add(FIELD_TERMS, "You must agree to the terms to continue");
    }

    errors
}

/// Validate the login form. Only presence is checked here.
pub fn validate_login(email: &str, password: &str) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if email.trim().is_empty() || password.trim().is_empty() {
        errors.add(FIELD_FORM, "Please enter both email and password");
    }
    errors
}

/// Validate the add-book form
pub fn validate_new_book(book: &NewBook) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if book.title.trim().is_empty() {
        errors.add(FIELD_TITLE, "Please enter a book title");
    }
    if book.author.trim().is_empty() {
        errors.add(FIELD_AUTHOR, "Please enter an author name");
    }
    if book.categories.iter().all(|c| c.trim().is_empty()) {
        errors.add(FIELD_CATEGORIES, "Please select at least one category");
    }
    if let Some(rating) = book.rating {
        if !(0.0..=5.0).contains(&rating) {
            errors.add(FIELD_RATING, "Rating must be between 0 and 5");
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_registration() -> RegistrationData {
        RegistrationData {
            username: "book_lover42".into(),
            email: "reader@example.com".into(),
            password: "Secret123".into(),
            confirm_password: "Secret123".into(),
            agree_to_terms: true,
        }
    }

    #[test]
    fn test_valid_registration() {
        assert!(validate_registration(&valid_registration()).is_empty());
    }

    #[test]
    fn test_empty_form_reports_every_field() {
        let errors = validate_registration(&RegistrationData::default());
        assert_eq!(errors.get(FIELD_USERNAME), Some("Username is required"));
        assert_eq!(errors.get(FIELD_EMAIL), Some("Email is required"));
        assert_eq!(errors.get(FIELD_PASSWORD), Some("Password is required"));
        assert_eq!(errors.get(FIELD_CONFIRM_PASSWORD), Some("Please confirm your password"));
        assert_eq!(errors.get(FIELD_TERMS), Some("You must agree to the terms to continue"));
    }

    #[test]
    fn test_username_rules() {
        assert_eq!(username_error("ab"), Some("Username must be at least 3 characters"));
        assert_eq!(
            username_error("a_very_long_username_x"),
            Some("Username must be less than 20 characters")
        );
        assert_eq!(
            username_error("book lover"),
            Some("Username can only contain letters, numbers, and underscores")
        );
        assert_eq!(username_error("abc"), None);
        assert_eq!(username_error("exactly_twenty_chars"), None);
    }

    #[test]
    fn test_email_rules() {
        assert!(is_valid_email("user@example.com"));
        assert!(is_valid_email("first.last+tag@mail.example.co"));
        assert!(!is_valid_email("user@example"));
        assert!(!is_valid_email("user.example.com"));
        assert!(!is_valid_email("user@@example.com"));
        assert_eq!(email_error("nope"), Some("Please enter a valid email address"));
    }

    #[test]
    fn test_password_rules_first_failure_wins() {
        assert_eq!(password_error("Ab1"), Some("Password must be at least 8 characters"));
        assert_eq!(
            password_error("lowercase1"),
            Some("Password must contain at least one uppercase letter")
        );
        assert_eq!(
            password_error("UPPERCASE1"),
            Some("Password must contain at least one lowercase letter")
        );
        assert_eq!(
            password_error("NoDigitsHere"),
            Some("Password must contain at least one number")
        );
    }

    #[test]
    fn test_password_mismatch() {
        let mut data = valid_registration();
        data.confirm_password = "Secret124".into();
        let errors = validate_registration(&data);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(FIELD_CONFIRM_PASSWORD), Some("Passwords do not match"));
    }

    #[test]
    fn test_login_requires_both_fields() {
        assert!(validate_login("a@b.co", "x").is_empty());
        let errors = validate_login("a@b.co", "  ");
        assert_eq!(errors.get(FIELD_FORM), Some("Please enter both email and password"));
    }

    #[test]
    fn test_new_book_rules() {
        let book = NewBook {
            rating: Some(5.5),
            ..NewBook::default()
        };
        let errors = validate_new_book(&book);
        assert_eq!(errors.get(FIELD_TITLE), Some("Please enter a book title"));
        assert_eq!(errors.get(FIELD_AUTHOR), Some("Please enter an author name"));
        assert_eq!(errors.get(FIELD_CATEGORIES), Some("Please select at least one category"));
        assert_eq!(errors.get(FIELD_RATING), Some("Rating must be between 0 and 5"));

        let book = NewBook {
            title: "Dune".into(),
            author: "Frank Herbert".into(),
            categories: vec!["Science Fiction".into()],
            rating: Some(5.0),
            ..NewBook::default()
        };
        assert!(validate_new_book(&book).is_empty());
    }
}
