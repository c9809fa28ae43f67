//! Email Archive - Record Model and View Pipeline
//!
//! The core of a single-user email-archive viewer: it decodes a CSV export of
//! email metadata, keeps the records in memory, filters and searches them, lets
//! the user annotate them with topic tags, and re-exports the annotated set.
//!
//! # Features
//!
//! - Tolerant CSV decoding with header-based column mapping
//! - CSV export that round-trips through the decoder
//! - Role, tag and free-text filtering with an "untagged" bucket
//! - Tag editing with change tracking for export gating
//! - Asynchronous, non-reentrant file loading

/// Configuration management
pub mod config;
/// CSV decoding
pub mod decoder;
/// CSV encoding
pub mod encoder;
/// Error types
pub mod error;
/// Export file output
pub mod file_writer;
/// Filter and search pipeline
pub mod filter;
/// Asynchronous file loading
pub mod loader;
/// Logging setup and utilities
pub mod logging;
/// Metrics collection
pub mod metrics;
/// Data models and structures
pub mod models;
/// Canonical record collection
pub mod store;
/// Tag list editing
pub mod tag_editor;
/// Multi-value field helpers
pub mod tags;
/// Cell normalization
pub mod utils;
/// Input validation
pub mod validation;
/// Per-screen view state
pub mod view;

// Re-export key components for easier access
pub use decoder::decode;
pub use encoder::{encode, encode_with, QuotePolicy};
pub use error::{ArchiveError, DecodeError, FileReadError, LoadError, StoreError, TagError};
pub use filter::{apply as filter, FilterState, UNTAGGED_SENTINEL};
pub use loader::{ArchiveLoader, FsTextSource, TextSource};
pub use models::{Column, Email, EmailId, TokenField};
pub use store::RecordStore;
pub use tags::{distinct_tokens, join_tokens, split_tokens};
pub use view::ViewState;
