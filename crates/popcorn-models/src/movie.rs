use serde::{Deserialize, Serialize};

/// One row of a search result, as returned by the movie database.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub year: String, // OMDb years are strings ("2010", "2015–2019")
    pub poster_url: String,
}

/// Full record for a single movie, fetched by id.
///
/// Numeric fields are optional because OMDb reports "N/A" for movies it has
/// no runtime or rating for.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster_url: String,
    pub runtime_minutes: Option<u32>,
    pub imdb_rating: Option<f64>,
    pub plot: String,
    pub released: String,
    pub actors: String,
    pub director: String,
    pub genre: String,
}
