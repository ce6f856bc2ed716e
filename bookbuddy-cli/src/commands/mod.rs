//! CLI command implementations

pub mod categories;
pub mod demo;
pub mod search;
pub mod shell;
pub mod validate;

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use bookbuddy_core::BookBuddyContext;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

/// Get the BookBuddy directory from environment or default
pub fn get_bookbuddy_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("BOOKBUDDY_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".bookbuddy"))
}

/// Create a context from the settings in the BookBuddy directory
pub fn get_context() -> Result<BookBuddyContext> {
    let bookbuddy_dir = get_bookbuddy_dir()?;
    debug!(dir = %bookbuddy_dir.display(), "loading settings");
    BookBuddyContext::new(&bookbuddy_dir).context("Failed to initialize BookBuddy context")
}

/// Runtime for the async search calls
pub fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start async runtime")
}

/// Run `future` to completion behind a spinner when stdout is a terminal
pub fn with_spinner<F: Future>(rt: &tokio::runtime::Runtime, message: &str, future: F) -> F::Output {
    if atty::isnt(atty::Stream::Stdout) {
        return rt.block_on(future);
    }

    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    let output = rt.block_on(future);
    pb.finish_and_clear();
    output
}
