//! Durable file writes

use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{CatClipError, CatClipResult};

/// Replace `path` with `data` atomically.
///
/// The data goes to a temporary file in the same directory, is synced, then
/// renamed over the destination, so readers see either the old or the new
/// content.
pub fn write_atomic(path: &Path, data: &[u8]) -> CatClipResult<()> {
    let parent = ensure_parent(path)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        writer.write_all(data)?;
        writer.flush()?;
    }
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| CatClipError::IoError(e.error))?;

    debug!("Atomic write completed: {}", path.display());
    Ok(())
}

/// Append `data` to `path`, creating it if needed, and sync before returning
pub fn append_durable(path: &Path, data: &[u8]) -> CatClipResult<()> {
    ensure_parent(path)?;

    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(data)?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}

fn ensure_parent(path: &Path) -> CatClipResult<&Path> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;
    Ok(parent)
}
