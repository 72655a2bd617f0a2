use color_eyre::Result;
use owo_colors::OwoColorize;
use popcorn_core::{watched_user_rating, DetailStatus, MovieDetailSession};
use popcorn_models::MovieDetails;
use serde_json::json;
use std::sync::Arc;

use super::{load_config, lookup_spinner, open_database, open_watched};
use crate::display::TerminalTitle;
use crate::output::Output;

const APP_TITLE: &str = "popcorn";

pub async fn run_movie(id: &str, output: &Output) -> Result<()> {
    tracing::debug!(id, "movie command started");

    let config = load_config()?;
    let db = open_database(&config)?;

    let mut session =
        MovieDetailSession::new(db, Arc::new(TerminalTitle), APP_TITLE);
    let spinner = lookup_spinner("Loading...");
    session.select(Some(id));
    session.settled().await;
    spinner.finish_and_clear();

    let snap = session.snapshot();
    match (snap.status, snap.details) {
        (DetailStatus::Ready, Some(details)) => {
            output.result(&json!({ "movie": details }));
            if output.is_human() {
                print_details(&details);
                let watched = open_watched()?;
                if let Some(rating) = watched_user_rating(watched.get(), &details.id) {
                    println!("You watched this one and rated it {}/10", rating);
                }
            }
        }
        _ => {
            output.error(format!("Could not load details for {}", id));
        }
    }
    Ok(())
}

pub(crate) fn print_details(details: &MovieDetails) {
    println!();
    println!("{} ({})", details.title.bold(), details.year);
    if !details.genre.is_empty() {
        println!("{}", details.genre.dimmed());
    }
    if let Some(runtime) = details.runtime_minutes {
        println!("Runtime: {} min", runtime);
    }
    if let Some(rating) = details.imdb_rating {
        println!("IMDb rating: {}", rating);
    }
    if !details.released.is_empty() {
        println!("Released: {}", details.released);
    }
    if !details.director.is_empty() {
        println!("Directed by {}", details.director);
    }
    if !details.actors.is_empty() {
        println!("Starring {}", details.actors);
    }
    if !details.plot.is_empty() {
        println!();
        println!("{}", details.plot);
    }
    println!();
}
