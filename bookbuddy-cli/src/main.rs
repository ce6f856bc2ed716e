//! BookBuddy CLI - your book collection in the terminal

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod output;

use commands::{categories, demo, search, shell, validate};

/// BookBuddy - track, categorize and collect the books you read
#[derive(Parser)]
#[command(name = "bookbuddy", version, about, long_about = None)]
struct Cli {
    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the category taxonomy
    Categories {
        #[command(subcommand)]
        command: Option<categories::CategoriesCommands>,
        /// Output as JSON
        #[arg(long, global = true)]
        json: bool,
    },

    /// Search the Google Books catalogue
    Search {
        /// Free-text query (at least 3 characters)
        query: String,
        /// Show at most this many results
        #[arg(long, short)]
        limit: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check a registration form without creating an account
    Validate {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        /// Prompted for when omitted
        #[arg(long)]
        password: Option<String>,
        /// Password confirmation (prompted for when omitted)
        #[arg(long)]
        confirm: Option<String>,
        /// Accept the terms of use
        #[arg(long)]
        agree_terms: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load the sample library and print it
    Demo {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start an interactive session over one in-memory library
    Shell {
        /// Start with the sample library loaded and its reader logged in
        #[arg(long)]
        sample: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "bookbuddy=debug,bookbuddy_core=debug"
    } else {
        "warn"
    };

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = run(cli);

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::report_error(&e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Categories { command, json } => categories::run(command, json),
        Commands::Search { query, limit, json } => search::run(&query, limit, json),
        Commands::Validate {
            username,
            email,
            password,
            confirm,
            agree_terms,
            json,
        } => validate::run(username, email, password, confirm, agree_terms, json),
        Commands::Demo { json } => demo::run(json),
        Commands::Shell { sample } => shell::run(sample),
    }
}
