//! Per-category file validation and pending submission state.

mod draft;
mod rules;

pub use draft::{DraftError, SubmissionDraft};
pub use rules::{FileCandidate, FileRules, ValidationError, ValidationRules, GIB, MIB};
