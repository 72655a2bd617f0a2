use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

type Action = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct DispatchTable {
    next_id: u64,
    bindings: HashMap<String, Vec<(u64, Action)>>,
}

/// Process-wide key-press dispatch, as an injectable service.
///
/// Key names are matched case-insensitively. Registrations are independent:
/// several actions may share a key, and removing one never disturbs the
/// others.
#[derive(Clone, Default)]
pub struct KeyDispatcher {
    table: Arc<Mutex<DispatchTable>>,
}

impl KeyDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "dropping the binding unregisters it"]
    pub fn register(
        &self,
        key: &str,
        action: impl Fn() + Send + Sync + 'static,
    ) -> KeyBinding {
        let key = key.to_lowercase();
        let mut table = self.table.lock().unwrap();
        let id = table.next_id;
        table.next_id += 1;
        table
            .bindings
            .entry(key.clone())
            .or_default()
            .push((id, Arc::new(action)));
        KeyBinding {
            table: Arc::downgrade(&self.table),
            key,
            id,
        }
    }

    /// Feed one key press from the event stream.
    pub fn dispatch(&self, key: &str) {
        // Clone the actions out first: a callback may register or unregister
        let actions: Vec<Action> = {
            let table = self.table.lock().unwrap();
            table
                .bindings
                .get(&key.to_lowercase())
                .map(|entries| entries.iter().map(|(_, a)| Arc::clone(a)).collect())
                .unwrap_or_default()
        };
        for action in actions {
            action();
        }
    }
}

/// Handle for one registration. Unregisters on `unregister()` or drop.
pub struct KeyBinding {
    table: Weak<Mutex<DispatchTable>>,
    key: String,
    id: u64,
}

impl KeyBinding {
    pub fn unregister(self) {
        // Drop does the work
    }

    fn remove(&self) {
        let Some(table) = self.table.upgrade() else {
            return;
        };
        let mut table = table.lock().unwrap();
        if let Some(entries) = table.bindings.get_mut(&self.key) {
            entries.retain(|(id, _)| *id != self.id);
            if entries.is_empty() {
                table.bindings.remove(&self.key);
            }
        }
    }
}

impl Drop for KeyBinding {
    fn drop(&mut self) {
        self.remove();
    }
}
