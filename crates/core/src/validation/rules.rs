//! Category to accepted-file table and candidate file validation.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::collection::Category;
use crate::config::ValidationConfig;

pub const MIB: u64 = 1024 * 1024;
pub const GIB: u64 = 1024 * MIB;

/// Default size cap, applied to every category.
const DEFAULT_MAX_SIZE_BYTES: u64 = GIB;

/// A file selected by the user. Only its metadata is ever kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileCandidate {
    /// File name as reported by the picker.
    pub name: String,
    pub size_bytes: u64,
    pub mime_type: String,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, size_bytes: u64, mime_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size_bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Describe a file on disk. The MIME type is guessed from the extension.
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        if !metadata.is_file() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a regular file", path.display()),
            ));
        }

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        Ok(Self {
            name,
            size_bytes: metadata.len(),
            mime_type,
        })
    }
}

/// Accepted files for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRules {
    pub extensions: &'static [&'static str],
    pub mime_types: &'static [&'static str],
    pub max_size_bytes: u64,
}

impl FileRules {
    /// Whether `mime_type` is accepted (ASCII case-insensitive).
    pub fn accepts_mime(&self, mime_type: &str) -> bool {
        let mime_type = mime_type.trim();
        self.mime_types
            .iter()
            .any(|accepted| accepted.eq_ignore_ascii_case(mime_type))
    }

    /// Value for a file input `accept` attribute, e.g. `.jpg,.jpeg,.png`.
    pub fn accept_attribute(&self) -> String {
        self.extensions.join(",")
    }

    /// Short hint for the upload field, e.g. `MP4 (max 1 GB)`.
    pub fn description(&self) -> String {
        let formats: Vec<String> = self
            .extensions
            .iter()
            .map(|ext| ext.trim_start_matches('.').to_ascii_uppercase())
            .collect();
        format!(
            "{} (max {})",
            formats.join(", "),
            format_size_limit(self.max_size_bytes)
        )
    }
}

fn format_size_limit(bytes: u64) -> String {
    if bytes >= GIB && bytes % GIB == 0 {
        format!("{} GB", bytes / GIB)
    } else if bytes >= MIB && bytes % MIB == 0 {
        format!("{} MB", bytes / MIB)
    } else {
        format!("{} bytes", bytes)
    }
}

/// Reason a candidate file was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("File type {mime_type} is not supported for {category}. Accepted: {accepted}")]
    UnsupportedType {
        category: Category,
        mime_type: String,
        accepted: String,
    },

    #[error("File is too large for {category}: {size_bytes} bytes (max {max_bytes} bytes)")]
    TooLarge {
        category: Category,
        size_bytes: u64,
        max_bytes: u64,
    },
}

/// The category to file-rules table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRules {
    video: FileRules,
    audio: FileRules,
    hadist: FileRules,
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            video: FileRules {
                extensions: &[".mp4"],
                mime_types: &["video/mp4"],
                max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            },
            audio: FileRules {
                extensions: &[".mp3"],
                mime_types: &["audio/mpeg"],
                max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            },
            hadist: FileRules {
                extensions: &[".jpg", ".jpeg", ".png"],
                mime_types: &["image/jpeg", "image/png"],
                max_size_bytes: DEFAULT_MAX_SIZE_BYTES,
            },
        }
    }
}

impl From<&ValidationConfig> for ValidationRules {
    fn from(config: &ValidationConfig) -> Self {
        Self::default().with_max_size(config.max_size_bytes)
    }
}

impl ValidationRules {
    /// Apply the same size cap to every category.
    pub fn with_max_size(mut self, max_size_bytes: u64) -> Self {
        self.video.max_size_bytes = max_size_bytes;
        self.audio.max_size_bytes = max_size_bytes;
        self.hadist.max_size_bytes = max_size_bytes;
        self
    }

    /// Rules for `category`.
    pub fn rules_for(&self, category: Category) -> &FileRules {
        match category {
            Category::Video => &self.video,
            Category::Audio => &self.audio,
            Category::Hadist => &self.hadist,
        }
    }

    /// Check `file` against the rules of `category`. Type is checked before size.
    pub fn validate(&self, category: Category, file: &FileCandidate) -> Result<(), ValidationError> {
        let rules = self.rules_for(category);

        if !rules.accepts_mime(&file.mime_type) {
            return Err(ValidationError::UnsupportedType {
                category,
                mime_type: file.mime_type.clone(),
                accepted: rules.mime_types.join(", "),
            });
        }

        if file.size_bytes > rules.max_size_bytes {
            return Err(ValidationError::TooLarge {
                category,
                size_bytes: file.size_bytes,
                max_bytes: rules.max_size_bytes,
            });
        }

        Ok(())
    }
}
