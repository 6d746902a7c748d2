// ═══════════════════════════════════════════════════════════════════
// Storage Tests — MemoryStore, FileStore, EntryStore
// ═══════════════════════════════════════════════════════════════════

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use trade_journal_core::errors::CoreError;
use trade_journal_core::models::entry::{Entry, EventType, TradeData};
use trade_journal_core::storage::file::FileStore;
use trade_journal_core::storage::manager::EntryStore;
use trade_journal_core::storage::memory::MemoryStore;
use trade_journal_core::storage::traits::KeyValueStore;

const KEY: &str = "journal";

fn sample_entries() -> Vec<Entry> {
    let at = |d, h| Utc.with_ymd_and_hms(2025, 11, d, h, 0, 0).unwrap();
    vec![
        Entry::new(EventType::Win, "Nice breakout", at(9, 14)),
        Entry::with_trade_data(
            EventType::Loss,
            "GBPUSD - £-50.00",
            at(10, 9),
            TradeData {
                asset: "GBPUSD".into(),
                pnl: -50.0,
                risk: String::new(),
                outcome: "Loss".into(),
                tags: String::new(),
            },
        ),
    ]
}

/// Store whose every operation fails.
struct BrokenStore;

#[async_trait]
impl KeyValueStore for BrokenStore {
    fn name(&self) -> &str {
        "broken"
    }

    async fn get(&self, _key: &str) -> Result<Option<String>, CoreError> {
        Err(CoreError::Storage("disk unplugged".into()))
    }

    async fn set(&self, _key: &str, _value: &str) -> Result<(), CoreError> {
        Err(CoreError::Storage("disk unplugged".into()))
    }

    async fn remove(&self, _key: &str) -> Result<(), CoreError> {
        Err(CoreError::Storage("disk unplugged".into()))
    }
}

// ═══════════════════════════════════════════════════════════════════
// MemoryStore
// ═══════════════════════════════════════════════════════════════════

mod memory_store {
    use super::*;

    #[tokio::test]
    async fn get_missing_key() {
        let store = MemoryStore::new();
        assert_eq!(store.get(KEY).await.unwrap(), None);
        assert_eq!(store.name(), "memory");
    }

    #[tokio::test]
    async fn set_get_remove() {
        let store = MemoryStore::new();
        store.set(KEY, "[]").await.unwrap();
        assert_eq!(store.get(KEY).await.unwrap().as_deref(), Some("[]"));

        store.set(KEY, "[1]").await.unwrap();
        assert_eq!(store.get(KEY).await.unwrap().as_deref(), Some("[1]"));

        store.remove(KEY).await.unwrap();
        assert_eq!(store.get(KEY).await.unwrap(), None);
        store.remove(KEY).await.unwrap();
    }

    #[tokio::test]
    async fn with_value_prepopulates() {
        let store = MemoryStore::with_value(KEY, "hello");
        assert_eq!(store.get(KEY).await.unwrap().as_deref(), Some("hello"));
    }

    #[tokio::test]
    async fn shared_through_arc() {
        let shared = Arc::new(MemoryStore::new());
        let handle: Box<dyn KeyValueStore> = Box::new(Arc::clone(&shared));
        handle.set(KEY, "x").await.unwrap();
        assert_eq!(handle.name(), "memory");
        assert_eq!(shared.get(KEY).await.unwrap().as_deref(), Some("x"));
    }
}

// ═══════════════════════════════════════════════════════════════════
// FileStore
// ═══════════════════════════════════════════════════════════════════

mod file_store {
    use super::*;

    #[tokio::test]
    async fn missing_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));
        assert_eq!(store.get(KEY).await.unwrap(), None);
        assert_eq!(store.name(), "file");
    }

    #[tokio::test]
    async fn values_persist_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = FileStore::new(&path);
        store.set(KEY, "[]").await.unwrap();
        store.set("other", "42").await.unwrap();
        drop(store);

        let reopened = FileStore::new(&path);
        assert_eq!(reopened.path(), path.as_path());
        assert_eq!(reopened.get(KEY).await.unwrap().as_deref(), Some("[]"));
        assert_eq!(reopened.get("other").await.unwrap().as_deref(), Some("42"));
    }

    #[tokio::test]
    async fn remove_keeps_other_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));
        store.set(KEY, "a").await.unwrap();
        store.set("other", "b").await.unwrap();

        store.remove(KEY).await.unwrap();
        assert_eq!(store.get(KEY).await.unwrap(), None);
        assert_eq!(store.get("other").await.unwrap().as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn no_temporary_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        FileStore::new(&path).set(KEY, "[]").await.unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn empty_file_reads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "").unwrap();
        assert_eq!(FileStore::new(&path).get(KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn non_object_file_is_a_storage_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let err = FileStore::new(&path).get(KEY).await.unwrap_err();
        assert!(matches!(err, CoreError::Storage(msg) if msg.contains("not a JSON object")));
    }
}

// ═══════════════════════════════════════════════════════════════════
// EntryStore
// ═══════════════════════════════════════════════════════════════════

mod entry_store {
    use super::*;

    #[tokio::test]
    async fn missing_key_loads_empty() {
        let store = EntryStore::new(Box::new(MemoryStore::new()), KEY);
        assert!(store.load().await.unwrap().is_empty());
        assert_eq!(store.key(), KEY);
    }

    #[tokio::test]
    async fn save_then_load() {
        let store = EntryStore::new(Box::new(MemoryStore::new()), KEY);
        let entries = sample_entries();
        store.save(&entries).await.unwrap();
        assert_eq!(store.load().await.unwrap(), entries);
    }

    #[tokio::test]
    async fn saved_payload_is_a_json_array() {
        let shared = Arc::new(MemoryStore::new());
        let store = EntryStore::new(Box::new(Arc::clone(&shared)), KEY);
        store.save(&sample_entries()).await.unwrap();

        let raw = shared.get(KEY).await.unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 2);
        assert_eq!(array[0]["type"], "received");
        assert_eq!(array[1]["type"], "paid");
        assert_eq!(array[1]["tradeData"]["pnL"], -50.0);
    }

    #[tokio::test]
    async fn corrupt_payload_loads_empty() {
        for raw in ["{not json", "{\"type\":\"received\"}", "[{\"type\":\"gift\"}]"] {
            let store = EntryStore::new(Box::new(MemoryStore::with_value(KEY, raw)), KEY);
            assert!(store.load().await.unwrap().is_empty(), "{raw} was accepted");
        }
    }

    #[tokio::test]
    async fn failing_store_is_reported() {
        let store = EntryStore::new(Box::new(BrokenStore), KEY);
        assert!(matches!(store.load().await, Err(CoreError::Storage(_))));
        assert!(matches!(
            store.save(&sample_entries()).await,
            Err(CoreError::Storage(_))
        ));
    }

    #[tokio::test]
    async fn file_backed_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("journal.json");
        let entries = sample_entries();

        EntryStore::new(Box::new(FileStore::new(&path)), KEY)
            .save(&entries)
            .await
            .unwrap();

        let reopened = EntryStore::new(Box::new(FileStore::new(&path)), KEY);
        assert_eq!(reopened.load().await.unwrap(), entries);
    }

    #[test]
    fn debug_shows_store_and_key() {
        let store = EntryStore::new(Box::new(MemoryStore::new()), KEY);
        let debug = format!("{store:?}");
        assert!(debug.contains("memory"));
        assert!(debug.contains(KEY));
    }
}
