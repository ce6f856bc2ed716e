//! Shell command - interactive session over one in-memory library
//!
//! The catalog lives only as long as the process, so every command that
//! touches it runs inside this loop. Lines are split like a POSIX shell and
//! parsed with clap.

use std::io::{self, BufRead, Write};

use anyhow::{anyhow, Result};
use bookbuddy_core::domain::GoalType;
use bookbuddy_core::services::{NewBook, RegistrationData, SortOption};
use bookbuddy_core::{Book, BookBuddyContext, ReadingStatus};
use clap::{Parser, Subcommand};
use colored::Colorize;

use super::demo::{print_collections, print_summary};
use super::{get_context, runtime, with_spinner};
use crate::output;

const PROMPT: &str = "bookbuddy> ";

#[derive(Parser)]
#[command(no_binary_name = true, name = "bookbuddy", disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    /// Create an account and log in
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        /// Defaults to the password
        #[arg(long)]
        confirm: Option<String>,
        #[arg(long)]
        agree_terms: bool,
    },
    /// Log in with email and password
    Login { email: String, password: String },
    /// Log out
    Logout,
    /// Show the logged-in reader
    Whoami,
    /// Update the logged-in reader's profile
    Profile {
        #[arg(long)]
        display_name: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        website: Option<String>,
        /// Comma-separated favorite genres
        #[arg(long, value_delimiter = ',')]
        genres: Option<Vec<String>>,
        /// Books to read per goal period
        #[arg(long)]
        goal: Option<u32>,
        /// weekly, monthly or yearly
        #[arg(long)]
        goal_period: Option<GoalType>,
        /// Books read towards the goal
        #[arg(long)]
        progress: Option<u32>,
    },
    /// Add a book by hand
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        /// Repeatable
        #[arg(long = "category")]
        categories: Vec<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        isbn: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        rating: Option<f32>,
        #[arg(long)]
        pages: Option<u32>,
        #[arg(long)]
        language: Option<String>,
        #[arg(long)]
        cover: Option<String>,
    },
    /// List books in the library
    Books {
        /// title, author, date-added or rating
        #[arg(long, default_value_t = SortOption::Title)]
        sort: SortOption,
        /// Only books matching this text
        #[arg(long)]
        query: Option<String>,
        /// Only books tagged with this category name
        #[arg(long)]
        category: Option<String>,
    },
    /// Show one book
    Show { id: String },
    /// Set the reading status of a book
    Status {
        id: String,
        /// not-started, reading or finished
        status: ReadingStatus,
    },
    /// Delete a book from the library and every collection
    Delete { id: String },
    /// List collections
    Collections,
    /// Manage one collection
    Collection {
        #[command(subcommand)]
        command: CollectionCommand,
    },
    /// Browse the category taxonomy
    Category {
        #[command(subcommand)]
        command: CategoryCommand,
    },
    /// Search the remote catalogue
    Find { query: Vec<String> },
    /// Add a result of the last `find` to the library
    Import {
        /// Result number as listed by `find`
        number: usize,
        /// Also file the book under this collection
        #[arg(long)]
        collection: Option<String>,
    },
    /// Library summary
    Stats,
    /// Request a password reset email
    ResetPassword { email: String },
}

#[derive(Subcommand)]
enum CollectionCommand {
    Create { name: String },
    Delete { name: String },
    Add { name: String, book_id: String },
    Remove { name: String, book_id: String },
    Show { name: String },
    /// Books of a collection in a category or its subcategories
    Filter { name: String, category: String },
}

#[derive(Subcommand)]
enum CategoryCommand {
    List,
    Show { id: String },
    Search { query: String },
    /// Library books in a category or its subcategories
    Books { id: String },
}

struct Shell {
    ctx: BookBuddyContext,
    rt: tokio::runtime::Runtime,
    last_results: Vec<Book>,
}

pub fn run(sample: bool) -> Result<()> {
    let ctx = get_context()?;
    if sample && ctx.auth_service.current_user().is_none() {
        ctx.load_sample_data()?;
    }

    let mut shell = Shell {
        ctx,
        rt: runtime()?,
        last_results: Vec::new(),
    };

    let interactive = atty::is(atty::Stream::Stdin);
    if interactive {
        output::info("BookBuddy shell. Type 'help' for commands, 'quit' to leave.");
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        if interactive {
            print!("{}", PROMPT);
            io::stdout().flush()?;
        }

        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let words = match shell_words::split(line) {
            Ok(words) => words,
            Err(e) => {
                output::error(&format!("Could not parse line: {}", e));
                continue;
            }
        };
        if matches!(words.first().map(String::as_str), Some("quit" | "exit")) {
            break;
        }

        match ShellLine::try_parse_from(&words) {
            Ok(parsed) => {
                if let Err(e) = shell.execute(parsed.command) {
                    output::report_error(&e);
                }
            }
            Err(e) => {
                let _ = e.print();
            }
        }
    }

    Ok(())
}

impl Shell {
    fn execute(&mut self, command: ShellCommand) -> Result<()> {
        match command {
            ShellCommand::Register {
                username,
                email,
                password,
                confirm,
                agree_terms,
            } => {
                let data = RegistrationData {
                    username,
                    email,
                    confirm_password: confirm.unwrap_or_else(|| password.clone()),
                    password,
                    agree_to_terms: agree_terms,
                };
                let user = self.ctx.auth_service.register(&data)?;
                output::success(&format!("Welcome, {}! You are logged in.", user.username));
            }
            ShellCommand::Login { email, password } => {
                let user = self.ctx.auth_service.login(&email, &password)?;
                output::success(&format!("Logged in as {}", user.display_name));
            }
            ShellCommand::Logout => {
                self.ctx.auth_service.logout();
                output::success("Logged out");
            }
            ShellCommand::Whoami => match self.ctx.auth_service.current_user() {
                Some(user) => print_profile(&user),
                None => output::info("Not logged in"),
            },
            ShellCommand::Profile {
                display_name,
                bio,
                location,
                website,
                genres,
                goal,
                goal_period,
                progress,
            } => {
                let mut user = self.ctx.auth_service.require_user()?;
                if let Some(v) = display_name {
                    user.display_name = v;
                }
                if let Some(v) = bio {
                    user.bio = v;
                }
                if let Some(v) = location {
                    user.location = v;
                }
                if let Some(v) = website {
                    user.website = v;
                }
                if let Some(v) = genres {
                    user.favorite_genres = v.clone();
                    user.reading_preferences.preferred_genres = v;
                }
                let reading_goal = &mut user.reading_preferences.reading_goal;
                if let Some(v) = goal {
                    reading_goal.target_books_per_year = v;
                }
                if let Some(v) = goal_period {
                    reading_goal.goal_type = v;
                }
                if let Some(v) = progress {
                    reading_goal.current_progress = v;
                }
                let user = self.ctx.auth_service.update_profile(user)?;
                output::success("Profile updated");
                print_profile(&user);
            }
            ShellCommand::Add {
                title,
                author,
                categories,
                description,
                isbn,
                year,
                rating,
                pages,
                language,
                cover,
            } => {
                let book = self.ctx.library_service.add_book(NewBook {
                    title,
                    author,
                    categories,
                    description,
                    isbn,
                    published_year: year,
                    rating,
                    page_count: pages,
                    language,
                    cover_url: cover,
                })?;
                output::success(&format!("Added '{}' ({})", book.title, book.id));
            }
            ShellCommand::Books {
                sort,
                query,
                category,
            } => {
                let library = &self.ctx.library_service;
                let mut books = match (&query, &category) {
                    (Some(q), _) => library.search(q, sort),
                    (None, Some(c)) => library.by_category(c),
                    (None, None) => library.books(sort),
                };
                if let (Some(_), Some(c)) = (&query, &category) {
                    books.retain(|b| b.has_category(c));
                }
                sort.sort(&mut books);
                print_books(&books);
            }
            ShellCommand::Show { id } => {
                let book = self.ctx.library_service.get_book(&id)?;
                output::print_book_details(&book);
                let categories = self.ctx.category_service.categorize(&book);
                if !categories.is_empty() {
                    let names: Vec<_> = categories.iter().map(|c| c.name).collect();
                    println!();
                    println!("Filed under: {}", names.join(", "));
                }
            }
            ShellCommand::Status { id, status } => {
                let book = self.ctx.library_service.set_status(&id, status)?;
                output::success(&format!("'{}' is now {}", book.title, book.status));
            }
            ShellCommand::Delete { id } => {
                self.ctx.library_service.delete_book(&id)?;
                output::success(&format!("Deleted {}", id));
            }
            ShellCommand::Collections => {
                self.ctx.auth_service.require_user()?;
                print_collections(&self.ctx)?;
            }
            ShellCommand::Collection { command } => self.collection(command)?,
            ShellCommand::Category { command } => self.category(command)?,
            ShellCommand::Find { query } => {
                let query = query.join(" ");
                let message = format!("Searching {}...", self.ctx.search_service.provider_name());
                self.last_results =
                    with_spinner(&self.rt, &message, self.ctx.search_service.search(&query));
                if self.last_results.is_empty() {
                    output::info(&format!("No results for '{}'", query));
                } else {
                    print_numbered(&self.last_results);
                }
            }
            ShellCommand::Import { number, collection } => {
                let book = number
                    .checked_sub(1)
                    .and_then(|i| self.last_results.get(i))
                    .cloned()
                    .ok_or_else(|| anyhow!("No search result #{}", number))?;
                let title = book.title.clone();
                match collection {
                    Some(name) => {
                        let target = self.ctx.collection_service.file_book(&name, book)?;
                        output::success(&format!("Added '{}' to {}", title, target.name));
                    }
                    None => {
                        self.ctx.library_service.import(book)?;
                        output::success(&format!("Added '{}' to your library", title));
                    }
                }
            }
            ShellCommand::Stats => {
                self.ctx.auth_service.require_user()?;
                print_summary(&self.ctx.status_service.get_status());
            }
            ShellCommand::ResetPassword { email } => {
                if self.ctx.auth_service.reset_password(&email) {
                    output::success(&format!("Password reset email sent to {}", email));
                } else {
                    output::warning(&format!("No account found for {}", email));
                }
            }
        }
        Ok(())
    }

    fn collection(&self, command: CollectionCommand) -> Result<()> {
        let collections = &self.ctx.collection_service;
        match command {
            CollectionCommand::Create { name } => {
                let collection = collections.create(&name)?;
                output::success(&format!("Created collection '{}'", collection.name));
            }
            CollectionCommand::Delete { name } => {
                collections.delete(&name)?;
                output::success(&format!("Deleted collection '{}'", name));
            }
            CollectionCommand::Add { name, book_id } => {
                collections.add_book(&name, &book_id)?;
                output::success(&format!("Added {} to '{}'", book_id, name));
            }
            CollectionCommand::Remove { name, book_id } => {
                collections.remove_book(&name, &book_id)?;
                output::success(&format!("Removed {} from '{}'", book_id, name));
            }
            CollectionCommand::Show { name } => {
                let books = collections.books(&name)?;
                println!("{}", name.bold());
                print_books(&books);
            }
            CollectionCommand::Filter { name, category } => {
                print_books(&collections.filter_by_category(&name, &category)?);
            }
        }
        Ok(())
    }

    fn category(&self, command: CategoryCommand) -> Result<()> {
        let categories = &self.ctx.category_service;
        match command {
            CategoryCommand::List => {
                let mut table = output::create_table();
                table.set_header(vec!["ID", "Name", "Subcategories", "Books"]);
                for entry in categories.book_counts() {
                    let subs: Vec<_> = entry.category.subcategories.iter().map(|s| s.id).collect();
                    table.add_row(vec![
                        entry.category.id.to_string(),
                        entry.category.name.to_string(),
                        subs.join(", "),
                        entry.book_count.to_string(),
                    ]);
                }
                println!("{}", table);
            }
            CategoryCommand::Show { id } => {
                let category = categories
                    .by_id(&id)
                    .ok_or_else(|| anyhow!("Unknown category '{}'", id))?;
                println!("{} {}", category.name.bold(), category.description);
                for sub in categories.subcategories(&id) {
                    println!("  • {} ({})", sub.name, sub.id);
                }
            }
            CategoryCommand::Search { query } => {
                let found = categories.search(&query);
                if found.is_empty() {
                    output::info(&format!("No categories match '{}'", query));
                }
                for category in found {
                    println!("{} ({})", category.name, category.id);
                }
            }
            CategoryCommand::Books { id } => {
                if categories.by_id(&id).is_none() {
                    return Err(anyhow!("Unknown category '{}'", id));
                }
                print_books(&categories.books_in_category(&id));
            }
        }
        Ok(())
    }
}

fn print_books(books: &[Book]) {
    if books.is_empty() {
        output::info("No books");
    } else {
        println!("{}", output::book_table(books));
    }
}

fn print_numbered(books: &[Book]) {
    let mut table = output::create_table();
    table.set_header(vec!["#", "Title", "Author", "Year", "Categories"]);
    for (i, book) in books.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            book.title.clone(),
            book.author.clone(),
            book.published_year.map(|y| y.to_string()).unwrap_or_default(),
            book.categories.join(", "),
        ]);
    }
    println!("{}", table);
}

fn print_profile(user: &bookbuddy_core::UserProfile) {
    println!("{} (@{})", user.display_name.bold(), user.username);
    println!("  {}", user.email);
    if !user.bio.is_empty() {
        println!("  {}", user.bio);
    }
    if !user.favorite_genres.is_empty() {
        println!("  Favorite genres: {}", user.favorite_genres.join(", "));
    }
    let goal = &user.reading_preferences.reading_goal;
    println!(
        "  Reading goal: {}/{} {}",
        goal.current_progress, goal.target_books_per_year, goal.goal_type
    );
}
