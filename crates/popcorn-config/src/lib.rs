pub mod config;
pub mod paths;
pub mod store;

pub use config::{Config, OmdbConfig};
pub use paths::PathManager;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
