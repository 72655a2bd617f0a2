use color_eyre::Result;
use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use popcorn_core::{remove_watched, watched_stats, WatchedStats};
use popcorn_models::WatchedEntry;
use serde_json::json;

use super::open_watched;
use crate::output::Output;

pub fn run_list(output: &Output) -> Result<()> {
    let watched = open_watched()?;
    let entries = watched.get();
    let stats = watched_stats(entries);

    output.result(&json!({ "watched": entries, "stats": stats_json(&stats) }));
    if output.is_human() {
        if entries.is_empty() {
            output.info("Your watched list is empty");
            return Ok(());
        }
        print_watched_table(entries);
        print_stats_line(&stats);
    }
    Ok(())
}

pub fn run_stats(output: &Output) -> Result<()> {
    let watched = open_watched()?;
    let stats = watched_stats(watched.get());

    output.result(&json!({ "stats": stats_json(&stats) }));
    if output.is_human() {
        print_stats_line(&stats);
    }
    Ok(())
}

pub fn run_remove(id: &str, output: &Output) -> Result<()> {
    let mut watched = open_watched()?;
    let mut removed = false;
    watched.update(|list| {
        removed = remove_watched(list, id);
    });

    if removed {
        output.success(format!("Removed {} from the watched list", id));
    } else {
        output.error(format!("{} is not on the watched list", id));
    }
    Ok(())
}

fn stats_json(stats: &WatchedStats) -> serde_json::Value {
    json!({
        "count": stats.count,
        "avg_imdb_rating": stats.avg_imdb_rating,
        "avg_user_rating": stats.avg_user_rating,
        "avg_runtime_minutes": stats.avg_runtime_minutes,
    })
}

fn print_watched_table(entries: &[WatchedEntry]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Title", "Year", "IMDb", "Yours", "Runtime", "IMDb id"]);
    for entry in entries {
        table.add_row(vec![
            Cell::new(&entry.title),
            Cell::new(&entry.year),
            Cell::new(format!("{:.1}", entry.imdb_rating)),
            Cell::new(format!("{}/10", entry.user_rating)),
            Cell::new(format!("{} min", entry.runtime_minutes)),
            Cell::new(&entry.id),
        ]);
    }
    println!("{table}");
}

fn print_stats_line(stats: &WatchedStats) {
    println!(
        "{} movie(s) watched · avg IMDb {:.1} · avg your rating {:.1} · avg runtime {:.0} min",
        stats.count, stats.avg_imdb_rating, stats.avg_user_rating, stats.avg_runtime_minutes
    );
}
