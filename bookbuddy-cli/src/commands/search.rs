//! Search command - query the remote catalogue

use anyhow::Result;
use bookbuddy_core::services::MIN_QUERY_LEN;

use super::{get_context, runtime, with_spinner};
use crate::output;

pub fn run(query: &str, limit: Option<usize>, json: bool) -> Result<()> {
    if query.trim().chars().count() < MIN_QUERY_LEN {
        output::warning(&format!(
            "Queries need at least {} characters",
            MIN_QUERY_LEN
        ));
        return Ok(());
    }

    let ctx = get_context()?;
    let rt = runtime()?;

    let message = format!("Searching {}...", ctx.search_service.provider_name());
    let mut books = if json {
        rt.block_on(ctx.search_service.search(query))
    } else {
        with_spinner(&rt, &message, ctx.search_service.search(query))
    };

    if let Some(limit) = limit {
        books.truncate(limit);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&books)?);
        return Ok(());
    }

    if books.is_empty() {
        output::info(&format!("No results for '{}'", query.trim()));
        return Ok(());
    }

    println!("{}", output::book_table(&books));
    println!("{} result(s)", books.len());
    Ok(())
}
