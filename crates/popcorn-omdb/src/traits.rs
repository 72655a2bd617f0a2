use async_trait::async_trait;
use popcorn_models::{MovieDetails, MovieSummary};

use crate::error::LookupError;

/// The movie database collaborator.
///
/// The sessions in popcorn-core only see this trait, so tests can drive them
/// with a scripted fake instead of a live HTTP endpoint.
#[async_trait]
pub trait MovieDatabase: Send + Sync {
    /// Free-text title search. Returns the matching summaries in the order
    /// the database ranks them.
    async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, LookupError>;

    /// Full record for a single movie id.
    async fn details(&self, id: &str) -> Result<MovieDetails, LookupError>;
}
