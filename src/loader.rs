//! The asynchronous file-read boundary.
//!
//! Reading a user-selected file is the only non-blocking step in the system.
//! While a read is outstanding the loader is busy and refuses new loads.
//! Decoding and replacing the collection then happen synchronously, so the
//! store only ever sees a complete new collection. When loads run back to
//! back, the last one to complete is the one that stays.

use crate::error::{FileReadError, LoadError};
use crate::store::RecordStore;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{info, warn};

/// Something that can produce the full text of a CSV export
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TextSource: Send + Sync {
    /// Read the whole source as UTF-8 text
    async fn read_text(&self) -> Result<String, FileReadError>;

    /// Human-readable name for logs
    fn describe(&self) -> String;
}

/// A CSV file on disk
#[derive(Debug, Clone)]
pub struct FsTextSource {
    path: PathBuf,
}

impl FsTextSource {
    /// Source reading `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this source reads
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TextSource for FsTextSource {
    async fn read_text(&self) -> Result<String, FileReadError> {
        let bytes = tokio::fs::read(&self.path).await?;
        String::from_utf8(bytes).map_err(|e| FileReadError::Encoding(e.to_string()))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Serializes reads so only one load is in flight at a time
#[derive(Debug, Default)]
pub struct ArchiveLoader {
    loading: AtomicBool,
}

/// Clears the loading flag when the read finishes, fails or is dropped
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl ArchiveLoader {
    /// Idle loader
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a read is outstanding
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Read a source, refusing with [`LoadError::Busy`] if another read is
    /// still in flight
    pub async fn read(&self, source: &dyn TextSource) -> Result<String, LoadError> {
        if self
            .loading
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            warn!(source = %source.describe(), "Rejected load while another is in progress");
            return Err(LoadError::Busy);
        }
        let _guard = LoadingGuard(&self.loading);

        info!(source = %source.describe(), "Reading archive");
        let text = source.read_text().await?;
        info!(source = %source.describe(), bytes = text.len(), "Read archive");
        Ok(text)
    }

    /// Read a source and replace the store's collection with its records.
    ///
    /// Returns the number of records loaded. On any failure the store keeps
    /// its previous collection.
    pub async fn load(
        &self,
        source: &dyn TextSource,
        store: &mut RecordStore,
    ) -> Result<usize, LoadError> {
        let text = self.read(source).await?;
        store.load(&text)?;
        Ok(store.len())
    }
}
