pub mod detail;
pub mod keys;
pub mod persist;
pub mod search;
pub mod watched;

pub use detail::{DetailSnapshot, DetailStatus, HostDisplay, MovieDetailSession};
pub use keys::{KeyBinding, KeyDispatcher};
pub use persist::PersistedState;
pub use search::{MovieSearchSession, SearchSnapshot, SearchStatus};
pub use watched::{
    add_watched, is_watched, remove_watched, watched_stats, watched_user_rating, WatchedStats,
    WATCHED_KEY,
};
