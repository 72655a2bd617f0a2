use color_eyre::Result;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use popcorn_core::{
    add_watched, watched_stats, watched_user_rating, DetailStatus, KeyDispatcher,
    MovieDetailSession, MovieSearchSession, SearchStatus,
};
use popcorn_models::WatchedEntry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::{load_config, lookup_spinner, open_database, open_watched};
use crate::commands::movie::print_details;
use crate::display::TerminalTitle;
use crate::output::Output;

const APP_TITLE: &str = "popcorn";

/// Interactive loop: search, pick a result, read the details, rate it onto
/// the watched list. Key presses are routed through the dispatcher, so
/// "escape" quits from anywhere the key prompt is shown and "enter" (or an
/// empty line) starts the next search.
pub async fn run_browse(output: &Output) -> Result<()> {
    tracing::debug!("browse session started");

    let config = load_config()?;
    let db = open_database(&config)?;
    let mut watched = open_watched()?;

    let mut search = MovieSearchSession::new(db.clone());
    let mut detail = MovieDetailSession::new(db, Arc::new(TerminalTitle), APP_TITLE);

    let dispatcher = KeyDispatcher::new();
    let quit = Arc::new(AtomicBool::new(false));
    let _escape_binding = dispatcher.register("escape", {
        let quit = Arc::clone(&quit);
        move || quit.store(true, Ordering::SeqCst)
    });
    // enter continues the loop; registered so the key prompt accepts it
    let _enter_binding = dispatcher.register("enter", || {});

    let theme = ColorfulTheme::default();
    loop {
        let query: String = Input::with_theme(&theme)
            .with_prompt("Search (blank to quit)")
            .allow_empty(true)
            .interact_text()?;
        if query.trim().is_empty() {
            break;
        }

        let spinner = lookup_spinner("Searching...");
        search.set_query(query.trim());
        search.settled().await;
        spinner.finish_and_clear();

        let snap = search.snapshot();
        match snap.status {
            SearchStatus::Failed => {
                output.error(snap.error.as_deref().unwrap_or("Search failed"));
                continue;
            }
            SearchStatus::Ready if !snap.results.is_empty() => {}
            _ => {
                output.info("Nothing to show, try a longer query");
                continue;
            }
        }

        let labels: Vec<String> = snap
            .results
            .iter()
            .map(|movie| format!("{} ({})", movie.title, movie.year))
            .collect();
        let Some(pick) = Select::with_theme(&theme)
            .with_prompt("Pick a movie (Esc to search again)")
            .items(&labels)
            .default(0)
            .interact_opt()?
        else {
            continue;
        };

        let picked_id = snap.results[pick].id.clone();
        let spinner = lookup_spinner("Loading details...");
        detail.select(Some(&picked_id));
        detail.settled().await;
        spinner.finish_and_clear();

        let detail_snap = detail.snapshot();
        let (DetailStatus::Ready, Some(details)) = (detail_snap.status, detail_snap.details)
        else {
            output.error("Could not load details, try again");
            detail.select(None);
            continue;
        };
        print_details(&details);

        if let Some(prior) = watched_user_rating(watched.get(), &details.id) {
            output.info(format!(
                "Already on your watched list, you rated it {}/10",
                prior
            ));
        } else {
            let raw: String = Input::with_theme(&theme)
                .with_prompt("Your rating 1-10 (blank to skip)")
                .allow_empty(true)
                .interact_text()?;
            if let Ok(rating @ 1..=10) = raw.trim().parse::<u8>() {
                let entry = WatchedEntry::from_details(&details, rating);
                let title = details.title.clone();
                let mut added = false;
                watched.update(|list| {
                    added = add_watched(list, entry);
                });
                if added {
                    output.success(format!("Added {} to your watched list", title));
                }
            }
        }
        detail.select(None);

        let key: String = Input::with_theme(&theme)
            .with_prompt("Key [enter: new search, escape: quit]")
            .allow_empty(true)
            .interact_text()?;
        let key = key.trim();
        dispatcher.dispatch(if key.is_empty() { "enter" } else { key });
        if quit.load(Ordering::SeqCst) {
            break;
        }
    }

    let stats = watched_stats(watched.get());
    if stats.count > 0 {
        output.info(format!(
            "{} movie(s) watched · avg your rating {:.1} · avg runtime {:.0} min",
            stats.count, stats.avg_user_rating, stats.avg_runtime_minutes
        ));
    }
    Ok(())
}
