use tracing::{debug, warn};

use crate::errors::CoreError;
use crate::models::entry::Entry;

use super::traits::KeyValueStore;

/// Loads and saves the entry list as one JSON array under a single key.
pub struct EntryStore {
    store: Box<dyn KeyValueStore>,
    key: String,
}

impl EntryStore {
    pub fn new(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Read every stored entry.
    ///
    /// A missing key and an unreadable payload both yield an empty list; only a
    /// failure of the store itself is returned as an error.
    pub async fn load(&self) -> Result<Vec<Entry>, CoreError> {
        let Some(raw) = self.store.get(&self.key).await? else {
            debug!(store = self.store.name(), key = %self.key, "no stored entries");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Entry>>(&raw) {
            Ok(entries) => {
                debug!(store = self.store.name(), count = entries.len(), "entries loaded");
                Ok(entries)
            }
            Err(e) => {
                warn!(
                    store = self.store.name(),
                    key = %self.key,
                    error = %e,
                    "stored entries are corrupt, starting empty"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Replace the stored list with `entries`.
    pub async fn save(&self, entries: &[Entry]) -> Result<(), CoreError> {
        let json = serde_json::to_string(entries)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize entries: {e}")))?;
        self.store.set(&self.key, &json).await?;
        debug!(store = self.store.name(), count = entries.len(), "entries saved");
        Ok(())
    }
}

impl std::fmt::Debug for EntryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EntryStore")
            .field("store", &self.store.name())
            .field("key", &self.key)
            .finish()
    }
}
