//! Demo command - load the sample library and print it

use anyhow::Result;
use bookbuddy_core::services::{LibrarySummary, SortOption};
use bookbuddy_core::{BookBuddyContext, Error as CoreError};
use colored::Colorize;
use serde_json::json;

use super::get_context;
use crate::output;

pub fn run(json: bool) -> Result<()> {
    let ctx = get_context()?;

    // The settings file may already have loaded it
    match ctx.load_sample_data() {
        Ok(_) | Err(CoreError::AlreadyExists(_)) => {}
        Err(e) => return Err(e.into()),
    }

    let books = ctx.library_service.books(SortOption::Title);
    let collections = ctx.collection_service.list();
    let summary = ctx.status_service.get_status();
    let user = ctx.auth_service.require_user()?;

    if json {
        let value = json!({
            "user": user,
            "books": books,
            "collections": collections,
            "summary": summary,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    output::success(&format!(
        "Logged in as {} <{}>",
        user.display_name, user.email
    ));
    println!();

    println!("{}", "Library".bold());
    println!("{}", output::book_table(&books));
    println!();

    println!("{}", "Collections".bold());
    print_collections(&ctx)?;
    println!();

    print_summary(&summary);
    Ok(())
}

pub fn print_collections(ctx: &BookBuddyContext) -> Result<()> {
    let collections = ctx.collection_service.list();
    if collections.is_empty() {
        output::info("No collections yet");
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["Name", "Books", "Titles"]);
    for collection in collections {
        let titles = ctx
            .collection_service
            .books(&collection.name)?
            .into_iter()
            .map(|b| b.title)
            .collect::<Vec<_>>()
            .join(", ");
        table.add_row(vec![collection.name.clone(), collection.len().to_string(), titles]);
    }
    println!("{}", table);
    Ok(())
}

pub fn print_summary(summary: &LibrarySummary) {
    println!("{}", "Library Status".bold());
    println!("  Books:        {}", summary.total_books);
    println!("  Collections:  {}", summary.total_collections);
    println!(
        "  Rated:        {} (average {})",
        summary.rated_books,
        output::format_rating(summary.average_rating)
    );
    for entry in &summary.by_status {
        println!("  {:<13} {}", format!("{}:", entry.status), entry.count);
    }
    if let Some(goal) = &summary.reading_goal {
        println!(
            "  Goal:         {}/{} {} ({:.0}%)",
            goal.progress,
            goal.target,
            goal.period,
            goal.completion * 100.0
        );
    }
}
