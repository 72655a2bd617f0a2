use popcorn_models::MovieDetails;
use popcorn_omdb::MovieDatabase;
use std::sync::{Arc, Mutex};
use tokio::task::JoinHandle;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailStatus {
    Idle,
    Loading,
    Ready,
}

#[derive(Debug, Clone)]
pub struct DetailSnapshot {
    pub status: DetailStatus,
    pub details: Option<MovieDetails>,
}

impl DetailSnapshot {
    fn idle() -> Self {
        Self {
            status: DetailStatus::Idle,
            details: None,
        }
    }
}

/// The host application's display-title collaborator.
pub trait HostDisplay: Send + Sync {
    fn set_title(&self, title: &str);
}

/// Fetches full details for whichever movie id is currently selected.
///
/// Unlike the search session this one does not abort a superseded fetch; it
/// compares the id the fetch was issued for against the current selection
/// before committing, so a stale response can never overwrite state for a
/// newer selection.
pub struct MovieDetailSession {
    db: Arc<dyn MovieDatabase>,
    display: Arc<dyn HostDisplay>,
    base_title: String,
    selected: Arc<Mutex<Option<String>>>,
    state: Arc<Mutex<DetailSnapshot>>,
    inflight: Option<JoinHandle<()>>,
}

impl MovieDetailSession {
    pub fn new(
        db: Arc<dyn MovieDatabase>,
        display: Arc<dyn HostDisplay>,
        base_title: impl Into<String>,
    ) -> Self {
        Self {
            db,
            display,
            base_title: base_title.into(),
            selected: Arc::new(Mutex::new(None)),
            state: Arc::new(Mutex::new(DetailSnapshot::idle())),
            inflight: None,
        }
    }

    /// Change the selection. `None` clears the session.
    pub fn select(&mut self, id: Option<&str>) {
        let had_selection = {
            let mut selected = self.selected.lock().unwrap();
            let had = selected.is_some();
            *selected = id.map(str::to_string);
            had
        };
        if had_selection {
            self.display.set_title(&self.base_title);
        }

        let Some(id) = id else {
            if let Some(handle) = self.inflight.take() {
                handle.abort();
            }
            *self.state.lock().unwrap() = DetailSnapshot::idle();
            return;
        };

        {
            let mut state = self.state.lock().unwrap();
            state.status = DetailStatus::Loading;
            state.details = None;
        }

        let db = Arc::clone(&self.db);
        let display = Arc::clone(&self.display);
        let selected = Arc::clone(&self.selected);
        let shared = Arc::clone(&self.state);
        let id = id.to_string();
        self.inflight = Some(tokio::spawn(async move {
            let outcome = db.details(&id).await;

            let current = selected.lock().unwrap();
            if current.as_deref() != Some(id.as_str()) {
                // Selection moved on while this fetch was out; stale result
                return;
            }
            let mut state = shared.lock().unwrap();
            match outcome {
                Ok(details) => {
                    if !details.title.is_empty() {
                        display.set_title(&format!("Movie | {}", details.title));
                    }
                    state.status = DetailStatus::Ready;
                    state.details = Some(details);
                }
                Err(err) => {
                    warn!(id = %id, error = %err, "detail lookup failed");
                    *state = DetailSnapshot::idle();
                }
            }
        }));
    }

    pub fn snapshot(&self) -> DetailSnapshot {
        self.state.lock().unwrap().clone()
    }

    pub fn selected_id(&self) -> Option<String> {
        self.selected.lock().unwrap().clone()
    }

    /// Wait for the most recent fetch, if any, to finish.
    pub async fn settled(&mut self) {
        if let Some(handle) = self.inflight.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for MovieDetailSession {
    fn drop(&mut self) {
        if let Some(handle) = self.inflight.take() {
            handle.abort();
        }
        if self.selected.lock().unwrap().is_some() {
            self.display.set_title(&self.base_title);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use popcorn_omdb::LookupError;
    use std::collections::HashMap;
    use tokio::sync::oneshot;

    #[derive(Default)]
    struct FakeDb {
        gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
        responses: Mutex<HashMap<String, Result<MovieDetails, LookupError>>>,
    }

    impl FakeDb {
        fn respond(&self, id: &str, outcome: Result<MovieDetails, LookupError>) {
            self.responses.lock().unwrap().insert(id.to_string(), outcome);
        }

        fn gate(&self, id: &str) -> oneshot::Sender<()> {
            let (tx, rx) = oneshot::channel();
            self.gates.lock().unwrap().insert(id.to_string(), rx);
            tx
        }
    }

    #[async_trait]
    impl MovieDatabase for FakeDb {
        async fn search(
            &self,
            _query: &str,
        ) -> Result<Vec<popcorn_models::MovieSummary>, LookupError> {
            unimplemented!("detail tests never search")
        }

        async fn details(&self, id: &str) -> Result<MovieDetails, LookupError> {
            let gate = self.gates.lock().unwrap().remove(id);
            if let Some(rx) = gate {
                let _ = rx.await;
            }
            self.responses
                .lock()
                .unwrap()
                .remove(id)
                .unwrap_or_else(|| Err(LookupError::NotFound))
        }
    }

    #[derive(Default)]
    struct RecordingDisplay {
        titles: Mutex<Vec<String>>,
    }

    impl RecordingDisplay {
        fn last(&self) -> Option<String> {
            self.titles.lock().unwrap().last().cloned()
        }
    }

    impl HostDisplay for RecordingDisplay {
        fn set_title(&self, title: &str) {
            self.titles.lock().unwrap().push(title.to_string());
        }
    }

    fn details(id: &str, title: &str) -> MovieDetails {
        MovieDetails {
            id: id.to_string(),
            title: title.to_string(),
            year: "2010".to_string(),
            ..Default::default()
        }
    }

    async fn drive(mut cond: impl FnMut() -> bool) {
        for _ in 0..100 {
            if cond() {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("condition not reached");
    }

    #[tokio::test]
    async fn select_fetches_and_sets_display_title() {
        let db = Arc::new(FakeDb::default());
        db.respond("tt1375666", Ok(details("tt1375666", "Inception")));
        let display = Arc::new(RecordingDisplay::default());
        let mut session =
            MovieDetailSession::new(db, display.clone(), "popcorn");

        session.select(Some("tt1375666"));
        assert_eq!(session.snapshot().status, DetailStatus::Loading);

        session.settled().await;
        let snap = session.snapshot();
        assert_eq!(snap.status, DetailStatus::Ready);
        assert_eq!(snap.details.unwrap().title, "Inception");
        assert_eq!(display.last().as_deref(), Some("Movie | Inception"));
    }

    #[tokio::test]
    async fn clearing_selection_resets_and_restores_title() {
        let db = Arc::new(FakeDb::default());
        db.respond("tt1375666", Ok(details("tt1375666", "Inception")));
        let display = Arc::new(RecordingDisplay::default());
        let mut session =
            MovieDetailSession::new(db, display.clone(), "popcorn");

        session.select(Some("tt1375666"));
        session.settled().await;
        session.select(None);

        let snap = session.snapshot();
        assert_eq!(snap.status, DetailStatus::Idle);
        assert!(snap.details.is_none());
        assert_eq!(display.last().as_deref(), Some("popcorn"));
    }

    #[tokio::test]
    async fn stale_fetch_cannot_overwrite_newer_selection() {
        let db = Arc::new(FakeDb::default());
        let gate = db.gate("tt1375666");
        db.respond("tt1375666", Ok(details("tt1375666", "Inception")));
        db.respond("tt0816692", Ok(details("tt0816692", "Interstellar")));
        let display = Arc::new(RecordingDisplay::default());
        let mut session =
            MovieDetailSession::new(db, display.clone(), "popcorn");

        session.select(Some("tt1375666"));
        tokio::task::yield_now().await;

        // Move on before the first fetch resolves, then let it resolve late
        session.select(Some("tt0816692"));
        session.settled().await;
        let _ = gate.send(());

        drive(|| display.last().as_deref() == Some("Movie | Interstellar")).await;
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }

        let snap = session.snapshot();
        assert_eq!(snap.status, DetailStatus::Ready);
        assert_eq!(snap.details.unwrap().id, "tt0816692");
        assert_eq!(display.last().as_deref(), Some("Movie | Interstellar"));
    }

    #[tokio::test]
    async fn failed_fetch_resets_to_idle() {
        let db = Arc::new(FakeDb::default());
        db.respond(
            "tt1375666",
            Err(LookupError::Transport("HTTP status 500".to_string())),
        );
        let display = Arc::new(RecordingDisplay::default());
        let mut session = MovieDetailSession::new(db, display, "popcorn");

        session.select(Some("tt1375666"));
        session.settled().await;

        let snap = session.snapshot();
        assert_eq!(snap.status, DetailStatus::Idle);
        assert!(snap.details.is_none());
    }

    #[tokio::test]
    async fn drop_restores_base_title() {
        let db = Arc::new(FakeDb::default());
        db.respond("tt1375666", Ok(details("tt1375666", "Inception")));
        let display = Arc::new(RecordingDisplay::default());
        let mut session =
            MovieDetailSession::new(db, display.clone(), "popcorn");

        session.select(Some("tt1375666"));
        session.settled().await;
        assert_eq!(display.last().as_deref(), Some("Movie | Inception"));

        drop(session);
        assert_eq!(display.last().as_deref(), Some("popcorn"));
    }
}
