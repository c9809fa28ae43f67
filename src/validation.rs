use crate::error::TagError;
use crate::tags::TOKEN_DELIMITER;

/// Validation utilities for user-entered tag input
#[derive(Debug, Copy, Clone)]
pub struct InputValidator;

impl InputValidator {
    /// Validate a new tag against the tags already in a draft.
    ///
    /// Returns the trimmed tag on success.
    pub fn validate_tag<S: AsRef<str>>(tag: &str, existing: &[S]) -> Result<String, TagError> {
        let trimmed = tag.trim();
        if trimmed.is_empty() {
            return Err(TagError::Empty);
        }

        // A comma would split the tag into several tokens on the next read
        if trimmed.contains(TOKEN_DELIMITER) {
            return Err(TagError::ContainsDelimiter(trimmed.to_string()));
        }

        if existing.iter().any(|current| current.as_ref() == trimmed) {
            return Err(TagError::Duplicate(trimmed.to_string()));
        }

        Ok(trimmed.to_string())
    }
}
