use thiserror::Error;

/// What went wrong during a movie database lookup.
///
/// The sessions own the user-facing wording; this type only classifies the
/// failure so they can pick the right message.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The database answered but reported no match for the request.
    #[error("no matching movie in the database")]
    NotFound,

    /// Non-success HTTP status, connect failure, timeout.
    #[error("transport failure: {0}")]
    Transport(String),

    /// The response arrived but could not be decoded.
    #[error("undecodable response: {0}")]
    Decode(String),
}
