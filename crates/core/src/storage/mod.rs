//! Durable key/value persistence for the collection record.
//!
//! The whole catalog lives under a single key as one serialized value.
//! [`KeyValueStore`] is the raw store; [`CollectionStorage`] is the port the
//! collection store talks to, implemented by [`KeyValueCollectionStorage`].

mod memory;
mod record;
mod sqlite;

pub use memory::MemoryKeyValueStore;
pub use record::{KeyValueCollectionStorage, DEFAULT_RECORD_KEY};
pub use sqlite::SqliteKeyValueStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::sync::Arc;

use tracing::info;

use crate::collection::CatalogEntry;
use crate::config::StorageConfig;

/// Errors for storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Corrupt record under key {key:?}: {reason}")]
    CorruptRecord { key: String, reason: String },
}

/// What to do when the persisted record cannot be deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptRecordPolicy {
    /// Report [`StorageError::CorruptRecord`] and leave the record untouched.
    #[default]
    Fail,
    /// Treat the record as absent so the next seed overwrites it.
    Reseed,
}

/// Trait for durable key/value stores.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// A failed write must leave the previous value in place.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage port used by the collection store.
pub trait CollectionStorage: Send + Sync {
    /// Load the full ordered entry list. `None` if no record exists yet.
    fn load(&self) -> Result<Option<Vec<CatalogEntry>>, StorageError>;

    /// Replace the persisted record with `entries`.
    fn save(&self, entries: &[CatalogEntry]) -> Result<(), StorageError>;
}

/// Open the SQLite key/value file named in `config` and wrap it in the record adapter.
pub fn create_collection_storage(
    config: &StorageConfig,
) -> Result<KeyValueCollectionStorage, StorageError> {
    let store = SqliteKeyValueStore::new(&config.path)?;
    info!(path = ?config.path, key = %config.record_key, "Opened collection storage");

    Ok(KeyValueCollectionStorage::new(Arc::new(store))
        .with_key(config.record_key.clone())
        .with_corrupt_policy(config.on_corrupt))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_collection_storage_from_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig {
            path: temp_dir.path().join("koleksi.db"),
            record_key: "koleksi".to_string(),
            ..StorageConfig::default()
        };

        let storage = create_collection_storage(&config).unwrap();
        assert_eq!(storage.key(), "koleksi");
        assert!(storage.load().unwrap().is_none());
        assert!(config.path.exists());
    }

    #[test]
    fn test_create_collection_storage_bad_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        let config = StorageConfig {
            path: temp_dir.path().join("missing-dir").join("koleksi.db"),
            ..StorageConfig::default()
        };

        assert!(matches!(
            create_collection_storage(&config),
            Err(StorageError::Database(_))
        ));
    }

    #[test]
    fn test_corrupt_policy_serialization() {
        assert_eq!(
            serde_json::to_string(&CorruptRecordPolicy::Fail).unwrap(),
            "\"fail\""
        );
        assert_eq!(
            serde_json::to_string(&CorruptRecordPolicy::Reseed).unwrap(),
            "\"reseed\""
        );
    }

    #[test]
    fn test_corrupt_policy_default_is_fail() {
        assert_eq!(CorruptRecordPolicy::default(), CorruptRecordPolicy::Fail);
    }

    #[test]
    fn test_corrupt_record_error_message() {
        let err = StorageError::CorruptRecord {
            key: "collections".to_string(),
            reason: "expected value".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Corrupt record under key \"collections\": expected value"
        );
    }
}
