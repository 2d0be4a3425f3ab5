//! Pending add/edit submission.
//!
//! Holds the form fields while a user fills them in. A staged file is always
//! valid for the currently selected category: changing the category
//! re-validates it and drops it if it no longer fits.

use thiserror::Error;
use tracing::debug;

use super::{FileCandidate, ValidationError, ValidationRules};
use crate::collection::{CatalogEntry, Category, EntryUpdate, NewEntry};

/// Errors when turning a draft into a store request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<&'static str>),
}

/// Form state for adding or editing a catalog entry.
#[derive(Debug, Clone, Default)]
pub struct SubmissionDraft {
    pub title: String,
    pub presenter: String,
    pub summary: String,
    category: Category,
    staged_file: Option<FileCandidate>,
    existing_file: Option<String>,
}

impl SubmissionDraft {
    /// Empty draft for a new entry.
    pub fn new(category: Category) -> Self {
        Self {
            category,
            ..Self::default()
        }
    }

    /// Draft pre-filled from an existing entry, for editing.
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            title: entry.title.clone(),
            presenter: entry.presenter.clone(),
            summary: entry.summary.clone(),
            category: entry.category,
            staged_file: None,
            existing_file: Some(entry.file_url.clone()),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn staged_file(&self) -> Option<&FileCandidate> {
        self.staged_file.as_ref()
    }

    /// Name of the file the submission would record: the staged file, else the existing one.
    pub fn file_name(&self) -> Option<&str> {
        self.staged_file
            .as_ref()
            .map(|f| f.name.as_str())
            .or(self.existing_file.as_deref())
    }

    /// Stage `file` after validating it against the current category.
    ///
    /// On rejection the previously staged file (if any) is kept and the
    /// error is returned.
    pub fn stage_file(
        &mut self,
        rules: &ValidationRules,
        file: FileCandidate,
    ) -> Result<(), ValidationError> {
        rules.validate(self.category, &file)?;
        debug!(name = %file.name, category = %self.category, "Staged file");
        self.staged_file = Some(file);
        Ok(())
    }

    /// Drop the staged file.
    pub fn clear_file(&mut self) {
        self.staged_file = None;
    }

    /// Switch category, re-validating any staged file.
    ///
    /// If the staged file is not valid for the new category it is cleared and
    /// the reason returned. The category change itself always applies.
    pub fn set_category(
        &mut self,
        rules: &ValidationRules,
        category: Category,
    ) -> Result<(), ValidationError> {
        self.category = category;

        let Some(file) = &self.staged_file else {
            return Ok(());
        };

        if let Err(e) = rules.validate(category, file) {
            debug!(name = %file.name, category = %category, "Staged file rejected after category change");
            self.staged_file = None;
            return Err(e);
        }

        Ok(())
    }

    fn missing_text_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push("title");
        }
        if self.presenter.trim().is_empty() {
            missing.push("presenter");
        }
        if self.summary.trim().is_empty() {
            missing.push("summary");
        }
        missing
    }

    /// Build the add request. Every text field and a staged file are required.
    pub fn to_new_entry(&self) -> Result<NewEntry, DraftError> {
        let mut missing = self.missing_text_fields();
        if self.staged_file.is_none() {
            missing.push("file");
        }

        match &self.staged_file {
            Some(file) if missing.is_empty() => Ok(NewEntry {
                title: self.title.trim().to_string(),
                category: self.category,
                presenter: self.presenter.trim().to_string(),
                summary: self.summary.trim().to_string(),
                file_url: file.name.clone(),
            }),
            _ => Err(DraftError::MissingFields(missing)),
        }
    }

    /// Build the edit request. The file is optional; the existing one is kept
    /// unless a new file is staged.
    pub fn to_update(&self) -> Result<EntryUpdate, DraftError> {
        let missing = self.missing_text_fields();
        if !missing.is_empty() {
            return Err(DraftError::MissingFields(missing));
        }

        let mut update = EntryUpdate::new()
            .with_title(self.title.trim())
            .with_category(self.category)
            .with_presenter(self.presenter.trim())
            .with_summary(self.summary.trim());
        if let Some(file) = &self.staged_file {
            update = update.with_file_url(file.name.clone());
        }
        Ok(update)
    }
}
