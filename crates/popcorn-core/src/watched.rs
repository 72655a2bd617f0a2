use popcorn_models::WatchedEntry;

/// Storage key for the persisted watched list.
pub const WATCHED_KEY: &str = "watched";

/// Append an entry unless its id is already on the list. Returns whether the
/// entry was added; at most one entry per movie id exists at any time.
pub fn add_watched(list: &mut Vec<WatchedEntry>, entry: WatchedEntry) -> bool {
    if is_watched(list, &entry.id) {
        return false;
    }
    list.push(entry);
    true
}

/// Remove exactly the entry with the given id, keeping the order of the
/// remaining entries. Returns whether anything was removed.
pub fn remove_watched(list: &mut Vec<WatchedEntry>, id: &str) -> bool {
    let before = list.len();
    list.retain(|entry| entry.id != id);
    list.len() != before
}

pub fn is_watched(list: &[WatchedEntry], id: &str) -> bool {
    list.iter().any(|entry| entry.id == id)
}

/// The rating the user gave a movie earlier, if it is on the list.
pub fn watched_user_rating(list: &[WatchedEntry], id: &str) -> Option<u8> {
    list.iter()
        .find(|entry| entry.id == id)
        .map(|entry| entry.user_rating)
}

/// Aggregates over the watched list. Recomputed on every read; never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedStats {
    pub count: usize,
    pub avg_imdb_rating: f64,
    pub avg_user_rating: f64,
    pub avg_runtime_minutes: f64,
}

pub fn watched_stats(list: &[WatchedEntry]) -> WatchedStats {
    WatchedStats {
        count: list.len(),
        avg_imdb_rating: average(list.iter().map(|e| e.imdb_rating)),
        avg_user_rating: average(list.iter().map(|e| f64::from(e.user_rating))),
        avg_runtime_minutes: average(list.iter().map(|e| f64::from(e.runtime_minutes))),
    }
}

fn average(values: impl ExactSizeIterator<Item = f64>) -> f64 {
    let len = values.len();
    if len == 0 {
        return 0.0;
    }
    values.sum::<f64>() / len as f64
}
