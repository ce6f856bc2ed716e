//! Categories command - browse the taxonomy

use anyhow::Result;
use bookbuddy_core::services::CategoryService;
use bookbuddy_core::BookCategory;
use clap::Subcommand;
use colored::Colorize;
use serde_json::json;

use super::get_context;
use crate::output;

#[derive(Subcommand)]
pub enum CategoriesCommands {
    /// Show one category and its subcategories
    Show {
        /// Category id (e.g., fiction, scifi)
        id: String,
    },
    /// Search category names and descriptions
    Search {
        query: String,
    },
}

pub fn run(command: Option<CategoriesCommands>, json: bool) -> Result<()> {
    let ctx = get_context()?;
    let categories = &ctx.category_service;

    match command {
        None => list(categories, json),
        Some(CategoriesCommands::Show { id }) => show(categories, &id, json),
        Some(CategoriesCommands::Search { query }) => search(categories, &query, json),
    }
}

fn subcategory_names(category: &BookCategory) -> String {
    category
        .subcategories
        .iter()
        .map(|sub| sub.name)
        .collect::<Vec<_>>()
        .join(", ")
}

fn list(categories: &CategoryService, json: bool) -> Result<()> {
    let counts = categories.book_counts();

    if json {
        println!("{}", serde_json::to_string_pretty(&counts)?);
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Name", "Description", "Subcategories", "Books"]);
    for entry in &counts {
        let category = entry.category;
        table.add_row(vec![
            category.id.to_string(),
            category.name.to_string(),
            category.description.to_string(),
            subcategory_names(category),
            entry.book_count.to_string(),
        ]);
    }
    println!("{}", table);
    Ok(())
}

fn show(categories: &CategoryService, id: &str, json: bool) -> Result<()> {
    let category = categories
        .by_id(id)
        .ok_or_else(|| anyhow::anyhow!("Unknown category '{}'", id))?;
    let parent = categories.parent_of(id);
    let books = categories.books_in_category(id);

    if json {
        let value = json!({
            "category": category,
            "parent": parent.map(|p| p.id),
            "books": books,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{} ({})", category.name.bold(), category.id);
    println!("  {}", category.description);
    if let Some(parent) = parent {
        println!("  Part of {}", parent.name);
    }

    if !category.is_leaf() {
        println!();
        println!("{}", "Subcategories".bold());
        for sub in category.subcategories {
            println!("  • {} ({}) - {}", sub.name, sub.id, sub.description);
        }
    }

    if !books.is_empty() {
        println!();
        println!("{}", output::book_table(&books));
    }
    Ok(())
}

fn search(categories: &CategoryService, query: &str, json: bool) -> Result<()> {
    let found = categories.search(query);

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    if found.is_empty() {
        output::warning(&format!("No categories match '{}'", query));
        return Ok(());
    }

    let mut table = output::create_table();
    table.set_header(vec!["ID", "Name", "Description", "Parent"]);
    for category in found {
        let parent = categories.parent_of(category.id).map(|p| p.name).unwrap_or("");
        table.add_row(vec![category.id, category.name, category.description, parent]);
    }
    println!("{}", table);
    Ok(())
}
