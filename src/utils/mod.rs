//! Shared utilities: file system helpers, path validation, and terminal
//! progress indicators.

pub mod fs;
pub mod path_validation;
pub mod progress;

pub use fs::{atomic_write, ensure_dir, safe_write};
pub use progress::ProgressBar;
