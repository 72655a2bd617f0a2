use async_trait::async_trait;
use popcorn_models::{MovieDetails, MovieSummary};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::LookupError;
use crate::traits::MovieDatabase;

pub const DEFAULT_BASE_URL: &str = "https://www.omdbapi.com/";

#[derive(Debug, Deserialize)]
struct OmdbSearchResponse {
    #[serde(rename = "Search")]
    search: Option<Vec<OmdbSummary>>,
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OmdbSummary {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "imdbID")]
    imdb_id: String,
}

#[derive(Debug, Deserialize)]
struct OmdbDetailsResponse {
    #[serde(rename = "Title", default)]
    title: String,
    #[serde(rename = "Year", default)]
    year: String,
    #[serde(rename = "Poster", default)]
    poster: String,
    #[serde(rename = "Runtime", default)]
    runtime: String,
    #[serde(rename = "imdbRating", default)]
    imdb_rating: String,
    #[serde(rename = "Plot", default)]
    plot: String,
    #[serde(rename = "Released", default)]
    released: String,
    #[serde(rename = "Actors", default)]
    actors: String,
    #[serde(rename = "Director", default)]
    director: String,
    #[serde(rename = "Genre", default)]
    genre: String,
    #[serde(rename = "imdbID", default)]
    imdb_id: String,
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Error")]
    error: Option<String>,
}

/// Parse OMDb's `"148 min"` runtime format. `"N/A"` and anything else
/// without a leading integer comes back as `None`.
fn parse_runtime_minutes(raw: &str) -> Option<u32> {
    raw.split_whitespace().next()?.parse().ok()
}

/// Parse OMDb's rating string (`"8.8"` or `"N/A"`).
fn parse_rating(raw: &str) -> Option<f64> {
    raw.parse().ok()
}

fn is_false(response: &str) -> bool {
    response.eq_ignore_ascii_case("false")
}

/// HTTP client for the OMDb movie database.
#[derive(Clone)]
pub struct OmdbClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OmdbClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    async fn get_json<T>(&self, url: String) -> Result<T, LookupError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Transport(format!("HTTP status {}", status)));
        }

        response
            .json()
            .await
            .map_err(|e| LookupError::Decode(e.to_string()))
    }
}

#[async_trait]
impl MovieDatabase for OmdbClient {
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, LookupError> {
        let url = format!(
            "{}?apikey={}&s={}",
            self.base_url,
            self.api_key,
            urlencoding::encode(query)
        );
        debug!(query, "OMDb search");

        let body: OmdbSearchResponse = self.get_json(url).await?;
        if is_false(&body.response) {
            debug!(query, error = body.error.as_deref(), "OMDb reported no match");
            return Err(LookupError::NotFound);
        }

        let summaries = body
            .search
            .unwrap_or_default()
            .into_iter()
            .map(|raw| MovieSummary {
                id: raw.imdb_id,
                title: raw.title,
                year: raw.year,
                poster_url: raw.poster,
            })
            .collect();
        Ok(summaries)
    }

    async fn details(&self, id: &str) -> Result<MovieDetails, LookupError> {
        let url = format!(
            "{}?apikey={}&i={}",
            self.base_url,
            self.api_key,
            urlencoding::encode(id)
        );
        debug!(id, "OMDb details");

        let body: OmdbDetailsResponse = self.get_json(url).await?;
        if is_false(&body.response) {
            debug!(id, error = body.error.as_deref(), "OMDb reported no match");
            return Err(LookupError::NotFound);
        }

        Ok(MovieDetails {
            // OMDb echoes the id back; fall back to the requested one if not
            id: if body.imdb_id.is_empty() {
                id.to_string()
            } else {
                body.imdb_id
            },
            title: body.title,
            year: body.year,
            poster_url: body.poster,
            runtime_minutes: parse_runtime_minutes(&body.runtime),
            imdb_rating: parse_rating(&body.imdb_rating),
            plot: body.plot,
            released: body.released,
            actors: body.actors,
            director: body.director,
            genre: body.genre,
        })
    }
}
