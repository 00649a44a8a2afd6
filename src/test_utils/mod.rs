//! Test utilities for ctxdocs
//!
//! Helpers shared by unit tests and, behind the `test-utils` feature, by
//! integration tests: logging setup and small project fixtures.
//!
//! # Example
//!
//! ```rust,no_run
//! use ctxdocs_cli::test_utils::{init_test_logging, write_project};
//!
//! init_test_logging(None);
//! let temp = tempfile::TempDir::new().unwrap();
//! write_project(temp.path(), r#"{"dependencies": {"hono": "^4.0.0"}}"#).unwrap();
//! ```

use std::path::Path;
use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::config::ProjectConfig;
use crate::constants::{CONFIG_FILE_NAME, PACKAGE_MANIFEST_NAME};

/// Global flag to ensure logging is only initialized once in tests
static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests.
///
/// Only the first call has an effect. Uses `level` if given, otherwise
/// `RUST_LOG`; with neither, logging stays off.
///
/// ```bash
/// RUST_LOG=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// Write a `package.json` and a default `ctxdocs.toml` into `root`.
///
/// # Errors
///
/// Returns an error if either file cannot be written.
pub fn write_project(root: &Path, package_json: &str) -> anyhow::Result<()> {
    std::fs::write(root.join(PACKAGE_MANIFEST_NAME), package_json)?;
    ProjectConfig::default().save(&root.join(CONFIG_FILE_NAME))
}
