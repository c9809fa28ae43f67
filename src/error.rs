//! Error types for the email-archive library.
//!
//! This module provides custom error types using `thiserror`. Each layer of the
//! pipeline has its own small enum so callers can match on exactly the outcomes
//! that layer can produce; `ArchiveError` wraps them all for hosts that only
//! want to surface a message.

use crate::models::EmailId;
use thiserror::Error;

/// Errors produced while decoding CSV text into records.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// The file parsed to zero data rows (header only, blank, or unusable)
    #[error("CSV file is empty or has no valid data rows")]
    Empty,

    /// The tokenizer reported a structural problem; carries its message verbatim
    #[error("Malformed CSV: {0}")]
    MalformedCsv(String),
}

/// Errors produced by record store mutations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No record in the current collection has this id
    #[error("Email not found: {0}")]
    NotFound(EmailId),
}

/// Errors produced at the file-read boundary.
#[derive(Error, Debug)]
pub enum FileReadError {
    /// The underlying read failed (missing file, permissions, ...)
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file contents are not valid UTF-8
    #[error("File is not valid UTF-8 text: {0}")]
    Encoding(String),
}

/// Errors produced by an end-to-end load (read, then decode, then replace).
#[derive(Error, Debug)]
pub enum LoadError {
    /// Another load is still reading its source
    #[error("A file is already being loaded")]
    Busy,

    /// Reading the source failed
    #[error(transparent)]
    Read(#[from] FileReadError),

    /// The text was read but could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

/// Errors produced while editing a record's tag list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    /// The tag is blank after trimming
    #[error("Tag cannot be empty")]
    Empty,

    /// The tag is already present in the draft
    #[error("Tag already added: {0}")]
    Duplicate(String),

    /// The tag contains the list delimiter and would split into several tokens
    #[error("Tag cannot contain a comma: {0}")]
    ContainsDelimiter(String),
}

/// Errors that can occur anywhere in the email-archive library.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// CSV decoding failed
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Record store mutation failed
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Loading a file failed
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Tag editing failed
    #[error(transparent)]
    Tag(#[from] TagError),

    /// File I/O errors outside the load boundary (export writes)
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// General error with context
    #[error("{0}")]
    Other(String),
}

impl From<FileReadError> for ArchiveError {
    fn from(err: FileReadError) -> Self {
        Self::Load(LoadError::Read(err))
    }
}

impl From<anyhow::Error> for ArchiveError {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}

/// Convenience type alias for Result with `ArchiveError`
pub type Result<T> = std::result::Result<T, ArchiveError>;
