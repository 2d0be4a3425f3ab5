//! Media collection catalog.
//!
//! [`CollectionStore`] provides create/read/update/delete over catalog
//! entries. Every operation reads the full list from the injected
//! [`CollectionStorage`], changes it, and writes it back whole. The store
//! assumes a single writer: id assignment is read-then-write.

mod seed;
pub(crate) mod timestamp;
mod types;

pub use seed::default_entries;
pub use types::*;

use std::sync::Arc;

use chrono::{DateTime, SubsecRound, Utc};
use tracing::{debug, info};

use crate::storage::CollectionStorage;

/// Source of creation timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// CRUD operations over the persisted catalog.
pub struct CollectionStore {
    storage: Arc<dyn CollectionStorage>,
    clock: Arc<dyn Clock>,
}

impl CollectionStore {
    /// Create a store over `storage`, stamping entries with the system clock.
    pub fn new(storage: Arc<dyn CollectionStorage>) -> Self {
        Self {
            storage,
            clock: Arc::new(SystemClock),
        }
    }

    /// Use a different clock for creation timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Write `defaults` if no record exists yet.
    ///
    /// An existing record is left alone even if it holds no entries.
    /// Returns whether the defaults were written.
    pub fn seed_if_empty(&self, defaults: Vec<CatalogEntry>) -> Result<bool, CollectionError> {
        if self.storage.load()?.is_some() {
            return Ok(false);
        }

        self.storage.save(&defaults)?;
        info!(count = defaults.len(), "Seeded collection record with defaults");
        Ok(true)
    }

    /// All entries, in insertion order.
    pub fn list(&self) -> Result<Vec<CatalogEntry>, CollectionError> {
        Ok(self.storage.load()?.unwrap_or_default())
    }

    /// Entries passing `filter`, in insertion order.
    pub fn search(&self, filter: &CollectionFilter) -> Result<Vec<CatalogEntry>, CollectionError> {
        let mut entries = self.list()?;
        entries.retain(|entry| filter.matches(entry));
        Ok(entries)
    }

    /// Entry counts per category.
    pub fn category_counts(&self) -> Result<CategoryCounts, CollectionError> {
        let mut counts = CategoryCounts::default();
        for entry in self.list()? {
            counts.record(entry.category);
        }
        Ok(counts)
    }

    /// Look up an entry. `Ok(None)` if no entry has this id.
    pub fn get(&self, id: EntryId) -> Result<Option<CatalogEntry>, CollectionError> {
        Ok(self.list()?.into_iter().find(|entry| entry.id == id))
    }

    /// Append a new entry with the next id (`max + 1`, or `1` when empty).
    pub fn add(&self, new_entry: NewEntry) -> Result<CatalogEntry, CollectionError> {
        ensure_title(&new_entry.title)?;

        let mut entries = self.list()?;
        let id = match entries.iter().map(|entry| entry.id).max() {
            Some(max) => max
                .checked_add(1)
                .ok_or_else(|| CollectionError::InvalidEntry("entry id space exhausted".into()))?,
            None => 1,
        };

        let entry = CatalogEntry {
            id,
            title: new_entry.title,
            category: new_entry.category,
            presenter: new_entry.presenter,
            summary: new_entry.summary,
            file_url: new_entry.file_url,
            // Stored with millisecond precision.
            created_at: self.clock.now().trunc_subsecs(3),
        };

        entries.push(entry.clone());
        self.storage.save(&entries)?;

        debug!(id, category = %entry.category, "Added collection entry");
        Ok(entry)
    }

    /// Merge `update` over the entry with `id`.
    ///
    /// Returns `Ok(None)` without writing anything if no entry has this id.
    pub fn update(
        &self,
        id: EntryId,
        update: EntryUpdate,
    ) -> Result<Option<CatalogEntry>, CollectionError> {
        if let Some(title) = &update.title {
            ensure_title(title)?;
        }

        let mut entries = self.list()?;
        let Some(entry) = entries.iter_mut().find(|entry| entry.id == id) else {
            debug!(id, "Update skipped, entry not found");
            return Ok(None);
        };

        if update.is_empty() {
            return Ok(Some(entry.clone()));
        }

        update.apply_to(entry);
        let updated = entry.clone();
        self.storage.save(&entries)?;

        debug!(id, "Updated collection entry");
        Ok(Some(updated))
    }

    /// Delete the entry with `id`. Returns whether an entry was removed;
    /// removing an unknown id writes nothing.
    pub fn remove(&self, id: EntryId) -> Result<bool, CollectionError> {
        let mut entries = self.list()?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);

        if entries.len() == before {
            debug!(id, "Remove skipped, entry not found");
            return Ok(false);
        }

        self.storage.save(&entries)?;
        debug!(id, "Removed collection entry");
        Ok(true)
    }
}

fn ensure_title(title: &str) -> Result<(), CollectionError> {
    if title.trim().is_empty() {
        return Err(CollectionError::InvalidEntry("title must not be empty".into()));
    }
    Ok(())
}
