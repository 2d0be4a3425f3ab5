//! Types for the media collection catalog.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::StorageError;

/// Identifier assigned to a catalog entry by the store.
pub type EntryId = u64;

/// Classification of a catalog entry. Controls which files are accepted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Video,
    Audio,
    /// Textual/reference material (hadith). Uploaded as scanned images.
    Hadist,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 3] = [Category::Video, Category::Audio, Category::Hadist];

    /// Wire name, as stored in the persisted record.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Video => "video",
            Category::Audio => "audio",
            Category::Hadist => "hadist",
        }
    }

    /// Capitalized label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Video => "Video",
            Category::Audio => "Audio",
            Category::Hadist => "Hadist",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown category name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown category: {0} (expected video, audio or hadist)")]
pub struct ParseCategoryError(pub String);

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "video" => Ok(Category::Video),
            "audio" => Ok(Category::Audio),
            "hadist" => Ok(Category::Hadist),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

/// One media/reference record in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    /// Unique id, assigned by the store.
    pub id: EntryId,
    /// Display title (never empty).
    pub title: String,
    pub category: Category,
    /// Author or speaker of the content.
    pub presenter: String,
    /// Free text description.
    pub summary: String,
    /// Name of the uploaded file. The file itself is never retained.
    pub file_url: String,
    /// Set once at creation.
    #[serde(with = "super::timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Fields for a new catalog entry. Id and creation time are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub title: String,
    pub category: Category,
    pub presenter: String,
    pub summary: String,
    pub file_url: String,
}

/// Partial update of a catalog entry.
///
/// Has no `id` or `created_at` field: neither changes after creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presenter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
}

impl EntryUpdate {
    /// Create an empty update (changes nothing).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_presenter(mut self, presenter: impl Into<String>) -> Self {
        self.presenter = Some(presenter.into());
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_file_url(mut self, file_url: impl Into<String>) -> Self {
        self.file_url = Some(file_url.into());
        self
    }

    /// Whether this update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.category.is_none()
            && self.presenter.is_none()
            && self.summary.is_none()
            && self.file_url.is_none()
    }

    /// Merge the present fields over `entry`.
    pub(crate) fn apply_to(self, entry: &mut CatalogEntry) {
        if let Some(title) = self.title {
            entry.title = title;
        }
        if let Some(category) = self.category {
            entry.category = category;
        }
        if let Some(presenter) = self.presenter {
            entry.presenter = presenter;
        }
        if let Some(summary) = self.summary {
            entry.summary = summary;
        }
        if let Some(file_url) = self.file_url {
            entry.file_url = file_url;
        }
    }
}

/// Filter for searching the catalog, as used by the collection list view.
#[derive(Debug, Clone, Default)]
pub struct CollectionFilter {
    /// Case-insensitive text matched against title and presenter.
    /// Surrounding whitespace is ignored; blank text matches everything.
    pub search: Option<String>,
    /// Restrict to one category.
    pub category: Option<Category>,
}

impl CollectionFilter {
    /// Create a filter that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Filter by category.
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Whether `entry` passes this filter.
    pub fn matches(&self, entry: &CatalogEntry) -> bool {
        if let Some(category) = self.category {
            if entry.category != category {
                return false;
            }
        }

        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(needle) => {
                let needle = needle.to_lowercase();
                entry.title.to_lowercase().contains(&needle)
                    || entry.presenter.to_lowercase().contains(&needle)
            }
        }
    }
}

/// Number of entries per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub all: u64,
    pub video: u64,
    pub audio: u64,
    pub hadist: u64,
}

impl CategoryCounts {
    /// Count for a single category.
    pub fn get(&self, category: Category) -> u64 {
        match category {
            Category::Video => self.video,
            Category::Audio => self.audio,
            Category::Hadist => self.hadist,
        }
    }

    pub(crate) fn record(&mut self, category: Category) {
        self.all += 1;
        match category {
            Category::Video => self.video += 1,
            Category::Audio => self.audio += 1,
            Category::Hadist => self.hadist += 1,
        }
    }
}

/// Errors for collection store operations.
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}
