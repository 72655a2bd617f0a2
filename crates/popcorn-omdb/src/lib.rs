pub mod client;
pub mod error;
pub mod traits;

pub use client::OmdbClient;
pub use error::LookupError;
pub use traits::MovieDatabase;
