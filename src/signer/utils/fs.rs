//! File system utilities for artifacts.

use std::{io, path::Path};
use tokio::fs;

/// Removes a file if it exists.
///
/// Returns whether a file was removed; a missing file is not an error.
pub async fn remove_file_if_exists(path: &Path) -> io::Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false), // Idempotent
        Err(e) => Err(e),
    }
}

/// Returns true if `path` is an existing regular file.
pub async fn is_file(path: &Path) -> bool {
    fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}
