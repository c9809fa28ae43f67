//! File writing utilities for the annotated export.
//!
//! The store produces the CSV text; this module only puts it on disk under
//! the configured file name. Clearing the store's dirty flag after a
//! successful write is left to the caller.

use crate::config::ExportConfig;
use crate::error::Result;
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Write an export string to `output_dir/<file_name>`.
///
/// Creates `output_dir` if needed and overwrites an existing export.
///
/// # Returns
///
/// Path of the written file
pub fn write_export(output_dir: &Path, config: &ExportConfig, contents: &str) -> Result<PathBuf> {
    create_dir_all(output_dir)?;

    let file_path = output_dir.join(&config.file_name);
    let file = File::create(&file_path)?;
    let mut writer = BufWriter::new(file);
    writer.write_all(contents.as_bytes())?;
    writer.flush()?;

    info!(path = %file_path.display(), bytes = contents.len(), "Wrote export file");
    Ok(file_path)
}
