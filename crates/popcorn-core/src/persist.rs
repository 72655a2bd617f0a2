use popcorn_config::KeyValueStore;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// A state cell mirrored to the durable key-value store.
///
/// `init` is read-through: a stored snapshot wins over `initial`, but a
/// missing or unparseable one falls back silently. Every mutation is
/// write-through: the full JSON serialization overwrites the stored value.
/// Storage failures are logged, never surfaced.
pub struct PersistedState<T> {
    store: Arc<dyn KeyValueStore>,
    key: String,
    value: T,
}

impl<T> PersistedState<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn init(store: Arc<dyn KeyValueStore>, key: impl Into<String>, initial: T) -> Self {
        let key = key.into();
        let value = match store.get(&key) {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(value) => value,
                Err(e) => {
                    warn!(key = %key, error = %e, "stored snapshot is unparseable, using initial value");
                    initial
                }
            },
            None => {
                debug!(key = %key, "no stored snapshot, using initial value");
                initial
            }
        };
        Self { store, key, value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        self.write_through();
    }

    /// Mutate in place, then mirror to storage.
    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.value);
        self.write_through();
    }

    fn write_through(&self) {
        let raw = match serde_json::to_string(&self.value) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to serialize state for storage");
                return;
            }
        };
        if let Err(e) = self.store.set(&self.key, &raw) {
            warn!(key = %self.key, error = %e, "failed to mirror state to storage");
        }
    }
}
