//! Testing utilities: mock storage, a fixed clock and fixtures.
//!
//! # Example
//!
//! ```rust,ignore
//! use koleksi_core::testing::{FixedClock, MockKeyValueStore};
//!
//! let kv = Arc::new(MockKeyValueStore::new());
//! let storage = Arc::new(KeyValueCollectionStorage::new(kv.clone()));
//! let store = CollectionStore::new(storage).with_clock(Arc::new(FixedClock::epoch()));
//!
//! kv.set_next_error(StorageError::Database("disk full".into()));
//! assert!(store.add(fixtures::new_entry("A", Category::Video)).is_err());
//! ```

mod mock_kv_store;

pub use mock_kv_store::MockKeyValueStore;

use chrono::{DateTime, Utc};

use crate::collection::Clock;

/// Clock that always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    pub fn new(at: DateTime<Utc>) -> Self {
        Self(at)
    }

    /// Clock fixed at the Unix epoch.
    pub fn epoch() -> Self {
        Self(DateTime::<Utc>::default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Test fixtures and helper functions.
pub mod fixtures {
    use crate::collection::{Category, NewEntry};
    use crate::validation::{FileCandidate, MIB};

    /// A new entry with reasonable defaults and a file name matching the category.
    pub fn new_entry(title: &str, category: Category) -> NewEntry {
        NewEntry {
            title: title.to_string(),
            category,
            presenter: "Ustadz Test".to_string(),
            summary: format!("Ringkasan {}", title),
            file_url: file_candidate(category).name,
        }
    }

    /// A small file accepted by `category`.
    pub fn file_candidate(category: Category) -> FileCandidate {
        match category {
            Category::Video => FileCandidate::new("kajian.mp4", 100 * MIB, "video/mp4"),
            Category::Audio => FileCandidate::new("kajian.mp3", 20 * MIB, "audio/mpeg"),
            Category::Hadist => FileCandidate::new("kitab.png", 2 * MIB, "image/png"),
        }
    }
}
