//! Collection record adapter over a key/value store.

use std::sync::Arc;

use tracing::{debug, warn};

use super::{CollectionStorage, CorruptRecordPolicy, KeyValueStore, StorageError};
use crate::collection::CatalogEntry;

/// Key under which the collection list is stored by default.
pub const DEFAULT_RECORD_KEY: &str = "collections";

/// Stores the full collection list as one JSON array under a single key.
pub struct KeyValueCollectionStorage {
    store: Arc<dyn KeyValueStore>,
    key: String,
    on_corrupt: CorruptRecordPolicy,
}

impl KeyValueCollectionStorage {
    /// Create an adapter using [`DEFAULT_RECORD_KEY`] and the `Fail` corrupt record policy.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            key: DEFAULT_RECORD_KEY.to_string(),
            on_corrupt: CorruptRecordPolicy::default(),
        }
    }

    /// Use a different record key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Set the policy applied when the stored record fails to deserialize.
    pub fn with_corrupt_policy(mut self, policy: CorruptRecordPolicy) -> Self {
        self.on_corrupt = policy;
        self
    }

    /// The record key.
    pub fn key(&self) -> &str {
        &self.key
    }
}

impl CollectionStorage for KeyValueCollectionStorage {
    fn load(&self) -> Result<Option<Vec<CatalogEntry>>, StorageError> {
        let Some(raw) = self.store.get(&self.key)? else {
            debug!(key = %self.key, "No collection record stored");
            return Ok(None);
        };

        match serde_json::from_str::<Vec<CatalogEntry>>(&raw) {
            Ok(entries) => Ok(Some(entries)),
            Err(e) => match self.on_corrupt {
                CorruptRecordPolicy::Fail => Err(StorageError::CorruptRecord {
                    key: self.key.clone(),
                    reason: e.to_string(),
                }),
                CorruptRecordPolicy::Reseed => {
                    warn!(
                        key = %self.key,
                        error = %e,
                        "Collection record is corrupt, treating it as absent"
                    );
                    Ok(None)
                }
            },
        }
    }

    fn save(&self, entries: &[CatalogEntry]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(entries)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set(&self.key, &raw)?;
        debug!(key = %self.key, count = entries.len(), "Saved collection record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::default_entries;
    use crate::storage::MemoryKeyValueStore;

    fn storage_with(raw: Option<&str>) -> (Arc<MemoryKeyValueStore>, KeyValueCollectionStorage) {
        let kv = Arc::new(MemoryKeyValueStore::new());
        if let Some(raw) = raw {
            kv.set(DEFAULT_RECORD_KEY, raw).unwrap();
        }
        let storage = KeyValueCollectionStorage::new(kv.clone());
        (kv, storage)
    }

    #[test]
    fn test_load_absent_record() {
        let (_, storage) = storage_with(None);
        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_load_empty_list_is_not_absent() {
        let (_, storage) = storage_with(Some("[]"));
        assert_eq!(storage.load().unwrap(), Some(Vec::new()));
    }

    #[test]
    fn test_save_then_load_is_identity() {
        let (_, storage) = storage_with(None);
        let entries = default_entries();

        storage.save(&entries).unwrap();
        assert_eq!(storage.load().unwrap(), Some(entries));
    }

    #[test]
    fn test_save_overwrites_whole_record() {
        let (_, storage) = storage_with(None);
        let entries = default_entries();

        storage.save(&entries).unwrap();
        storage.save(&entries[..1]).unwrap();

        assert_eq!(storage.load().unwrap().unwrap().len(), 1);
    }

    #[test]
    fn test_reads_offsetless_seed_timestamps() {
        let raw = r#"[{
            "id": 1,
            "title": "Dasar-dasar Fiqih untuk Pemula",
            "category": "video",
            "presenter": "Ustadz Ahmad Firdaus",
            "summary": "Pengenalan dasar hukum Islam",
            "fileUrl": "video1.mp4",
            "createdAt": "2023-03-15T08:30:00"
        }]"#;
        let (_, storage) = storage_with(Some(raw));

        let entries = storage.load().unwrap().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].file_url, "video1.mp4");
        assert_eq!(
            entries[0].created_at.to_rfc3339(),
            "2023-03-15T08:30:00+00:00"
        );
    }

    #[test]
    fn test_save_keeps_sub_millisecond_precision() {
        let raw = r#"[{"id":1,"title":"Kajian","category":"video","presenter":"p",
            "summary":"s","fileUrl":"a.mp4","createdAt":"2024-01-02T03:04:05.123456Z"}]"#;
        let (kv, storage) = storage_with(Some(raw));

        let loaded = storage.load().unwrap().unwrap();
        storage.save(&loaded).unwrap();

        assert_eq!(storage.load().unwrap(), Some(loaded));
        assert!(kv
            .get(DEFAULT_RECORD_KEY)
            .unwrap()
            .unwrap()
            .contains("\"createdAt\":\"2024-01-02T03:04:05.123456Z\""));
    }

    #[test]
    fn test_reads_date_only_timestamps() {
        let raw = r#"[{"id":1,"title":"Kajian","category":"audio","presenter":"p",
            "summary":"s","fileUrl":"a.mp3","createdAt":"2023-03-15"}]"#;
        let (_, storage) = storage_with(Some(raw));

        let entries = storage.load().unwrap().unwrap();
        assert_eq!(
            entries[0].created_at.to_rfc3339(),
            "2023-03-15T00:00:00+00:00"
        );
    }

    #[test]
    fn test_corrupt_record_fails_by_default() {
        let (kv, storage) = storage_with(Some("{not json"));

        let err = storage.load().unwrap_err();
        assert!(matches!(err, StorageError::CorruptRecord { .. }));
        // Nothing was overwritten
        assert_eq!(kv.get(DEFAULT_RECORD_KEY).unwrap().as_deref(), Some("{not json"));
    }

    #[test]
    fn test_unknown_category_counts_as_corrupt() {
        let raw = r#"[{"id":1,"title":"x","category":"image","presenter":"p",
            "summary":"s","fileUrl":"a.png","createdAt":"2023-03-15T08:30:00Z"}]"#;
        let (_, storage) = storage_with(Some(raw));

        assert!(matches!(
            storage.load(),
            Err(StorageError::CorruptRecord { .. })
        ));
    }

    #[test]
    fn test_corrupt_record_reseed_policy_reports_absent() {
        let (_, storage) = storage_with(Some("garbage"));
        let storage = storage.with_corrupt_policy(CorruptRecordPolicy::Reseed);

        assert!(storage.load().unwrap().is_none());
    }

    #[test]
    fn test_custom_key() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        let storage = KeyValueCollectionStorage::new(kv.clone()).with_key("koleksi-v2");

        storage.save(&default_entries()).unwrap();

        assert_eq!(storage.key(), "koleksi-v2");
        assert!(kv.get("koleksi-v2").unwrap().is_some());
        assert!(kv.get(DEFAULT_RECORD_KEY).unwrap().is_none());
    }
}
