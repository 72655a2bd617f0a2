use popcorn_models::MovieSummary;
use popcorn_omdb::{LookupError, MovieDatabase};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::debug;

/// Queries shorter than this never hit the network.
pub const MIN_QUERY_LEN: usize = 2;

pub const MSG_NOT_FOUND: &str = "Movie not found";
pub const MSG_FETCH_FAILED: &str = "Something went wrong with fetching movies";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Loading,
    Ready,
    Failed,
}

#[derive(Debug, Clone)]
pub struct SearchSnapshot {
    pub status: SearchStatus,
    pub results: Vec<MovieSummary>,
    pub error: Option<String>,
}

impl SearchSnapshot {
    fn idle() -> Self {
        Self {
            status: SearchStatus::Idle,
            results: Vec::new(),
            error: None,
        }
    }
}

/// Manages the lifecycle of one title search at a time.
///
/// Every query change cancels the previous in-flight lookup, so for a rapid
/// sequence of queries only the latest outcome ever reaches the snapshot.
/// The abort handles the common case; a generation counter catches a lookup
/// that already got its response but has not committed yet.
pub struct MovieSearchSession {
    db: Arc<dyn MovieDatabase>,
    state: Arc<Mutex<SearchSnapshot>>,
    generation: Arc<AtomicU64>,
    inflight: Option<JoinHandle<()>>,
}

impl MovieSearchSession {
    pub fn new(db: Arc<dyn MovieDatabase>) -> Self {
        Self {
            db,
            state: Arc::new(Mutex::new(SearchSnapshot::idle())),
            generation: Arc::new(AtomicU64::new(0)),
            inflight: None,
        }
    }

    /// Re-evaluate the session for a new query value.
    pub fn set_query(&mut self, query: &str) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }

        if query.chars().count() < MIN_QUERY_LEN {
            *self.state.lock().unwrap() = SearchSnapshot::idle();
            return;
        }

        {
            let mut state = self.state.lock().unwrap();
            state.status = SearchStatus::Loading;
            state.error = None;
        }

        let db = Arc::clone(&self.db);
        let shared = Arc::clone(&self.state);
        let latest = Arc::clone(&self.generation);
        let query = query.to_owned();
        self.inflight = Some(tokio::spawn(async move {
            let outcome = db.search(&query).await;

            let mut state = shared.lock().unwrap();
            if latest.load(Ordering::SeqCst) != generation {
                // A newer query superseded this lookup after its response
                // landed. Discard the outcome entirely.
                debug!(query = %query, "discarding superseded search outcome");
                return;
            }
            match outcome {
                Ok(results) => {
                    state.status = SearchStatus::Ready;
                    state.results = results;
                    state.error = None;
                }
                Err(LookupError::NotFound) => {
                    state.status = SearchStatus::Failed;
                    state.results = Vec::new();
                    state.error = Some(MSG_NOT_FOUND.to_string());
                }
                Err(err) => {
                    debug!(query = %query, error = %err, "search lookup failed");
                    state.status = SearchStatus::Failed;
                    state.results = Vec::new();
                    state.error = Some(MSG_FETCH_FAILED.to_string());
                }
            }
        }));
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.state.lock().unwrap().clone()
    }

    /// Wait for the in-flight lookup, if any, to finish or be cancelled.
    pub async fn settled(&mut self) {
        if let Some(handle) = self.inflight.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for MovieSearchSession {
    fn drop(&mut self) {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use tokio::sync::oneshot;

    /// Scripted stand-in for the movie database. A query with a registered
    /// gate blocks until the gate's sender fires (or is dropped).
    #[derive(Default)]
    struct FakeDb {
        calls: Mutex<Vec<String>>,
        gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
        responses: Mutex<HashMap<String, Result<Vec<MovieSummary>, LookupError>>>,
    }

    impl FakeDb {
        fn respond(&self, query: &str, outcome: Result<Vec<MovieSummary>, LookupError>) {
            self.responses.lock().unwrap().insert(query.to_string(), outcome);
        }

        fn gate(&self, query: &str) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(query.to_string(), rx);
            tx
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MovieDatabase for FakeDb {
        async fn search(&self, query: &str) -> Result<Vec<MovieSummary>, LookupError> {
            self.calls.lock().unwrap().push(query.to_string());
            let gate = self.gates.lock().unwrap().remove(query);
            if let Some(rx) = gate {
                let _ = rx.await;
            }
            self.responses
                .lock()
                .unwrap()
                .remove(query)
                .unwrap_or_else(|| Ok(Vec::new()))
        }

        async fn details(
            &self,
            _id: &str,
        ) -> Result<popcorn_models::MovieDetails, LookupError> {
            unimplemented!("search tests never fetch details")
        }
    }

    fn summary(id: &str, title: &str) -> MovieSummary {
        MovieSummary {
            id: id.to_string(),
            title: title.to_string(),
            year: "2010".to_string(),
            poster_url: String::new(),
        }
    }

    /// Let spawned lookups progress until `cond` holds.
    async fn drive_until(mut cond: impl FnMut() -> bool) {
        for _ in 0..100 {
            if cond() {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("condition not reached");
    }

    #[tokio::test]
    async fn short_query_is_idle_and_never_calls_out() {
        let db = Arc::new(FakeDb::default());
        let mut session = MovieSearchSession::new(db.clone());

        for query in ["", "b", "彼"] {
            session.set_query(query);
            let snap = session.snapshot();
            assert_eq!(snap.status, SearchStatus::Idle);
            assert!(snap.results.is_empty());
            assert!(snap.error.is_none());
        }
        assert!(db.calls().is_empty());
    }

    #[tokio::test]
    async fn successful_lookup_becomes_ready() {
        let db = Arc::new(FakeDb::default());
        db.respond(
            "inception",
            Ok(vec![summary("tt1375666", "Inception")]),
        );
        let mut session = MovieSearchSession::new(db.clone());

        session.set_query("inception");
        assert_eq!(session.snapshot().status, SearchStatus::Loading);

        session.settled().await;
        let snap = session.snapshot();
        assert_eq!(snap.status, SearchStatus::Ready);
        assert_eq!(snap.results.len(), 1);
        assert_eq!(snap.results[0].title, "Inception");
        assert!(snap.error.is_none());
    }

    #[tokio::test]
    async fn not_found_reports_exact_message() {
        let db = Arc::new(FakeDb::default());
        db.respond("zzzzzz", Err(LookupError::NotFound));
        let mut session = MovieSearchSession::new(db);

        session.set_query("zzzzzz");
        session.settled().await;

        let snap = session.snapshot();
        assert_eq!(snap.status, SearchStatus::Failed);
        assert_eq!(snap.error.as_deref(), Some("Movie not found"));
        assert!(snap.results.is_empty());
    }

    #[tokio::test]
    async fn transport_failure_reports_generic_message() {
        let db = Arc::new(FakeDb::default());
        db.respond(
            "inception",
            Err(LookupError::Transport("HTTP status 503".to_string())),
        );
        let mut session = MovieSearchSession::new(db);

        session.set_query("inception");
        session.settled().await;

        let snap = session.snapshot();
        assert_eq!(snap.status, SearchStatus::Failed);
        assert_eq!(
            snap.error.as_deref(),
            Some("Something went wrong with fetching movies")
        );
    }

    #[tokio::test]
    async fn newer_query_supersedes_pending_lookup() {
        let db = Arc::new(FakeDb::default());
        let gate_first = db.gate("inception");
        db.respond("inception", Ok(vec![summary("tt1375666", "Inception")]));
        db.respond(
            "interstellar",
            Ok(vec![summary("tt0816692", "Interstellar")]),
        );
        let mut session = MovieSearchSession::new(db.clone());

        session.set_query("inception");
        let db_wait = db.clone();
        drive_until(move || !db_wait.calls().is_empty()).await;

        // Supersede while the first lookup is parked on its gate
        session.set_query("interstellar");
        let _ = gate_first.send(());
        session.settled().await;

        let snap = session.snapshot();
        assert_eq!(snap.status, SearchStatus::Ready);
        assert_eq!(snap.results.len(), 1);
        assert_eq!(snap.results[0].title, "Interstellar");
    }

    #[tokio::test]
    async fn shrinking_query_discards_pending_lookup() {
        // Two-character query starts a fetch; dropping to one character must
        // reset to idle and the pending outcome must never land.
        let db = Arc::new(FakeDb::default());
        let gate = db.gate("ba");
        db.respond(
            "ba",
            Ok(vec![
                summary("tt0372784", "Batman Begins"),
                summary("tt0096895", "Batman"),
            ]),
        );
        let mut session = MovieSearchSession::new(db.clone());

        session.set_query("ba");
        let db_wait = db.clone();
        drive_until(move || !db_wait.calls().is_empty()).await;
        assert_eq!(session.snapshot().status, SearchStatus::Loading);

        session.set_query("b");
        let _ = gate.send(());
        session.settled().await;

        let snap = session.snapshot();
        assert_eq!(snap.status, SearchStatus::Idle);
        assert!(snap.results.is_empty());
        assert!(snap.error.is_none());
    }

    #[tokio::test]
    async fn two_char_query_fetches_and_lands() {
        let db = Arc::new(FakeDb::default());
        db.respond(
            "ba",
            Ok(vec![
                summary("tt0372784", "Batman Begins"),
                summary("tt0096895", "Batman"),
            ]),
        );
        let mut session = MovieSearchSession::new(db.clone());

        session.set_query("ba");
        session.settled().await;

        let snap = session.snapshot();
        assert_eq!(snap.status, SearchStatus::Ready);
        assert_eq!(snap.results.len(), 2);
        assert_eq!(db.calls(), vec!["ba".to_string()]);
    }

    #[tokio::test]
    async fn drop_cancels_outstanding_lookup() {
        let db = Arc::new(FakeDb::default());
        let gate = db.gate("inception");
        let mut session = MovieSearchSession::new(db.clone());

        session.set_query("inception");
        let db_wait = db.clone();
        drive_until(move || !db_wait.calls().is_empty()).await;

        drop(session);

        // The aborted task drops its receiver, closing the gate
        drive_until(|| gate.is_closed()).await;
    }
}
