use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use popcorn_core::{MovieSearchSession, SearchStatus};
use popcorn_models::MovieSummary;
use serde_json::json;

use super::{load_config, lookup_spinner, open_database};
use crate::output::Output;

pub async fn run_search(query: &str, output: &Output) -> Result<()> {
    tracing::debug!(query, "search command started");

    let config = load_config()?;
    let db = open_database(&config)?;

    let mut session = MovieSearchSession::new(db);
    let spinner = lookup_spinner("Searching...");
    session.set_query(query);
    session.settled().await;
    spinner.finish_and_clear();

    let snap = session.snapshot();
    match snap.status {
        SearchStatus::Idle | SearchStatus::Loading => {
            output.info("Type at least 2 characters to search");
        }
        SearchStatus::Failed => {
            output.error(snap.error.as_deref().unwrap_or("Search failed"));
        }
        SearchStatus::Ready => {
            output.result(&json!({ "query": query, "results": snap.results }));
            if output.is_human() {
                print_results_table(&snap.results);
                println!("{} result(s) for \"{}\"", snap.results.len(), query);
            }
        }
    }
    Ok(())
}

fn print_results_table(results: &[MovieSummary]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["#", "Title", "Year", "IMDb id"]);
    for (index, movie) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&movie.title),
            Cell::new(&movie.year),
            Cell::new(&movie.id),
        ]);
    }
    println!("{table}");
}
