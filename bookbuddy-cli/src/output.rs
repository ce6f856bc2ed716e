//! Output formatting utilities

use bookbuddy_core::{Book, Error as CoreError};
use colored::Colorize;
use comfy_table::{presets::UTF8_FULL_CONDENSED, ContentArrangement, Table};

/// Print a success message
pub fn success(msg: &str) {
    println!("{}", msg.green());
}

/// Print an error message
pub fn error(msg: &str) {
    eprintln!("{}", msg.red());
}

/// Print a warning message
pub fn warning(msg: &str) {
    println!("{}", msg.yellow());
}

/// Print an info message
pub fn info(msg: &str) {
    println!("{}", msg.cyan());
}

/// Print an error, one line per field for validation failures
pub fn report_error(err: &anyhow::Error) {
    match err.downcast_ref::<CoreError>() {
        Some(CoreError::Validation(errors)) => {
            for (field, message) in errors.iter() {
                error(&format!("{}: {}", field, message));
            }
        }
        _ => error(&format!("{:#}", err)),
    }
}

/// Create a styled table
pub fn create_table() -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table
}

pub fn format_rating(rating: Option<f32>) -> String {
    rating.map(|r| format!("{:.1}", r)).unwrap_or_else(|| "-".to_string())
}

/// Table of books, one row each
pub fn book_table(books: &[Book]) -> Table {
    let mut table = create_table();
    table.set_header(vec!["ID", "Title", "Author", "Categories", "Year", "Rating", "Status"]);
    for book in books {
        table.add_row(vec![
            book.id.clone(),
            book.title.clone(),
            book.author.clone(),
            book.categories.join(", "),
            book.published_year.map(|y| y.to_string()).unwrap_or_default(),
            format_rating(book.rating),
            book.status.to_string(),
        ]);
    }
    table
}

/// Multi-line detail view of one book
pub fn print_book_details(book: &Book) {
    println!("{}", book.title.bold());
    println!("  by {}", book.author);
    println!();

    let mut table = create_table();
    table.add_row(vec!["ID", book.id.as_str()]);
    table.add_row(vec!["Status", book.status.label()]);
    if !book.categories.is_empty() {
        table.add_row(vec!["Categories".to_string(), book.categories.join(", ")]);
    }
    if let Some(year) = book.published_year {
        table.add_row(vec!["Published".to_string(), year.to_string()]);
    }
    if let Some(pages) = book.page_count {
        table.add_row(vec!["Pages".to_string(), pages.to_string()]);
    }
    table.add_row(vec!["Rating".to_string(), format_rating(book.rating)]);
    if let Some(isbn) = &book.isbn {
        table.add_row(vec!["ISBN", isbn.as_str()]);
    }
    if let Some(language) = &book.language {
        table.add_row(vec!["Language", language.as_str()]);
    }
    if let Some(cover) = &book.cover_url {
        table.add_row(vec!["Cover", cover.as_str()]);
    }
    table.add_row(vec![
        "Added".to_string(),
        book.added_at.format("%Y-%m-%d %H:%M").to_string(),
    ]);
    println!("{}", table);

    if let Some(description) = &book.description {
        println!();
        println!("{}", description);
    }
}
