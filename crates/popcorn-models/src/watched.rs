use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::movie::MovieDetails;

/// A snapshot of a movie at the moment the user confirmed a rating for it.
///
/// Copies its fields out of `MovieDetails` at confirmation time; it is a
/// snapshot, not a live reference.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WatchedEntry {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub imdb_rating: f64,
    pub runtime_minutes: u32,
    pub user_rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_at: Option<DateTime<Utc>>,
}

impl WatchedEntry {
    /// Build an entry from fetched details plus the user's rating.
    ///
    /// Missing runtime or IMDb rating ("N/A" upstream) is recorded as zero so
    /// the list stays a flat array of numbers in storage.
    pub fn from_details(details: &MovieDetails, user_rating: u8) -> Self {
        Self {
            id: details.id.clone(),
            title: details.title.clone(),
            year: details.year.clone(),
            poster_url: details.poster_url.clone(),
            imdb_rating: details.imdb_rating.unwrap_or(0.0),
            runtime_minutes: details.runtime_minutes.unwrap_or(0),
            user_rating,
            added_at: Some(Utc::now()),
        }
    }
}
