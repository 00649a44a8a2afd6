//! Path validation for names that become directories under the cache.
//!
//! Framework, category, and file names come from user-editable TOML and are
//! joined onto the docs directory before files are written or deleted, so
//! each must be a single plain path component.

use anyhow::{Result, anyhow};
use std::path::{Component, Path, PathBuf};

/// Whether `name` is exactly one normal path component.
///
/// Rejects empty names, `.` and `..`, separators of either platform,
/// absolute paths and drive prefixes, and control characters.
#[must_use]
pub fn is_path_component(name: &str) -> bool {
    if name.is_empty() || name.contains(['/', '\\']) || name.chars().any(char::is_control) {
        return false;
    }

    let mut components = Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// `parent/name`, refusing any `name` that would leave `parent`.
///
/// # Errors
///
/// Returns an error if `name` is not a single plain path component.
pub fn child_dir(parent: &Path, name: &str) -> Result<PathBuf> {
    if !is_path_component(name) {
        return Err(anyhow!(
            "Refusing to use '{}' as a directory name under {}",
            name,
            parent.display()
        ));
    }
    Ok(parent.join(name))
}
