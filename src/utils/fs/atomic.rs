//! Atomic file writes using a write-then-rename strategy.
//!
//! Readers of the host document and the project configuration never observe
//! a partially written file: content goes to a sibling `.tmp` file, is synced
//! to disk, and is then renamed over the target.

use super::dirs::ensure_dir;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Write a string to `path` atomically.
///
/// # Errors
///
/// See [`atomic_write`].
pub fn safe_write(path: &Path, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Atomically write bytes to `path`, creating parent directories.
///
/// # Examples
///
/// ```rust,no_run
/// use ctxdocs_cli::utils::fs::atomic_write;
/// use std::path::Path;
///
/// # fn example() -> anyhow::Result<()> {
/// atomic_write(Path::new("CLAUDE.md"), b"# Project\n")?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, written or
/// synced, or if the rename fails.
pub fn atomic_write(path: &Path, content: &[u8]) -> Result<()> {
    use std::io::Write;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        ensure_dir(parent)?;
    }

    let temp_path = path.with_extension("tmp");

    {
        let mut file = fs::File::create(&temp_path)
            .with_context(|| format!("Failed to create temp file: {}", temp_path.display()))?;

        file.write_all(content)
            .with_context(|| format!("Failed to write to temp file: {}", temp_path.display()))?;

        file.sync_all().with_context(|| "Failed to sync file to disk")?;
    }

    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temp file to: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_atomic_write_basic() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("CLAUDE.md");

        atomic_write(&file, b"hello").unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "hello");
        assert!(!temp.path().join("CLAUDE.tmp").exists());
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("ctxdocs.toml");

        atomic_write(&file, b"first").unwrap();
        safe_write(&file, "second").unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "second");
    }

    #[test]
    fn test_atomic_write_creates_parent() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join(".ctxdocs/docs/hono/core/routing.md");

        atomic_write(&file, b"# Routing").unwrap();
        assert!(file.exists());
    }
}
