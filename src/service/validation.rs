//! Request validation for write payloads.

use crate::error::AppError;
use crate::model::{NameInput, NoteInput};

pub const MISSING_TITLE: &str = "Missing `title` in request body";
pub const MISSING_NAME: &str = "missing name";

pub struct RequestValidator;

impl RequestValidator {
    /// A required text field must be present and not blank. Returns the trimmed value,
    /// or a validation error carrying `missing` as its client-facing message.
    pub fn require_text<'a>(value: Option<&'a str>, missing: &str) -> Result<&'a str, AppError> {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(AppError::Validation(missing.to_string())),
        }
    }

    pub fn note_title(input: &NoteInput) -> Result<&str, AppError> {
        Self::require_text(input.title.as_deref(), MISSING_TITLE)
    }

    pub fn name(input: &NameInput) -> Result<&str, AppError> {
        Self::require_text(input.name.as_deref(), MISSING_NAME)
    }

    /// Tag ids must be positive; duplicates are dropped, first occurrence kept.
    pub fn tag_ids(input: &mut NoteInput) -> Result<(), AppError> {
        if let Some(tags) = input.tags.as_mut() {
            if let Some(bad) = tags.iter().find(|id| **id <= 0) {
                return Err(AppError::BadRequest(format!("invalid tag id {}", bad)));
            }
            let mut seen = std::collections::HashSet::new();
            tags.retain(|id| seen.insert(*id));
        }
        Ok(())
    }
}
