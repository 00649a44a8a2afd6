//! Directory helpers.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Create `path` and its parents if missing.
///
/// # Errors
///
/// Returns an error if creation fails or `path` exists and is not a directory.
pub fn ensure_dir(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)
            .with_context(|| format!("Failed to create directory: {}", path.display()))?;
    } else if !path.is_dir() {
        return Err(anyhow::anyhow!("Path exists but is not a directory: {}", path.display()));
    }
    Ok(())
}

/// Remove `path` recursively; a missing directory is not an error.
///
/// # Errors
///
/// Returns an error if the directory exists and cannot be removed.
pub fn remove_dir_all(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("Failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}
