//! Mock key/value store for testing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::storage::{KeyValueStore, StorageError};

/// Mock implementation of the KeyValueStore trait.
///
/// Provides controllable behavior for testing:
/// - Count successful writes for assertions
/// - Fail the next write with a chosen error
#[derive(Debug, Default)]
pub struct MockKeyValueStore {
    values: Mutex<HashMap<String, String>>,
    /// If set, the next `set` or `remove` will fail with this error.
    next_error: Mutex<Option<StorageError>>,
    writes: AtomicUsize,
}

impl MockKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the next write to fail with the given error. Reads are unaffected.
    pub fn set_next_error(&self, error: StorageError) {
        if let Ok(mut next) = self.next_error.lock() {
            *next = Some(error);
        }
    }

    /// Number of successful `set` and `remove` calls.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Raw value under `key`, bypassing injected errors.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn take_error(&self) -> Result<(), StorageError> {
        match self.next_error.lock() {
            Ok(mut next) => match next.take() {
                Some(error) => Err(error),
                None => Ok(()),
            },
            Err(_) => Err(StorageError::Database("mock lock poisoned".to_string())),
        }
    }

    fn values(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StorageError> {
        self.values
            .lock()
            .map_err(|_| StorageError::Database("mock lock poisoned".to_string()))
    }
}

impl KeyValueStore for MockKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.take_error()?;
        self.values()?.insert(key.to_string(), value.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.take_error()?;
        self.values()?.remove(key);
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
