//! Global constants used throughout the ctxdocs codebase.
//!
//! File names, default limits, and network parameters live here so that the
//! magic numbers are discoverable in one place.

use std::time::Duration;

/// Project configuration file name, stored at the project root.
pub const CONFIG_FILE_NAME: &str = "ctxdocs.toml";

/// Dependency manifest read on every invocation.
pub const PACKAGE_MANIFEST_NAME: &str = "package.json";

/// Default host document that receives the generated index block.
pub const DEFAULT_HOST_DOCUMENT: &str = "CLAUDE.md";

/// Default directory for cached framework documentation.
pub const DEFAULT_DOCS_DIR: &str = ".ctxdocs/docs";

/// Default directory for hand-written internal documentation.
pub const DEFAULT_INTERNAL_DIR: &str = ".ctxdocs/internal";

/// Default directory for project-local documentation templates.
pub const DEFAULT_TEMPLATES_DIR: &str = ".ctxdocs/templates";

/// Begin sentinel line of the generated block in the host document.
pub const MARKER_BEGIN: &str = "<!-- ctxdocs:begin -->";

/// End sentinel line of the generated block in the host document.
pub const MARKER_END: &str = "<!-- ctxdocs:end -->";

/// Maximum characters kept per documentation file after budgeting.
pub const DEFAULT_MAX_FILE_CHARS: usize = 40_000;

/// Token budget requested from the documentation source per file.
pub const DEFAULT_TOKENS_PER_FILE: u32 = 5_000;

/// Maximum number of lookups in flight at once.
pub const DEFAULT_MAX_CONCURRENCY: usize = 5;

/// Per-lookup timeout in milliseconds.
pub const DEFAULT_FETCH_TIMEOUT_MS: u64 = 5_000;

/// Per-lookup timeout as a [`Duration`].
pub const fn default_fetch_timeout() -> Duration {
    Duration::from_millis(DEFAULT_FETCH_TIMEOUT_MS)
}

/// Default npm registry endpoint.
pub const DEFAULT_REGISTRY_URL: &str = "https://registry.npmjs.org";

/// Default documentation source endpoint.
pub const DEFAULT_DOCS_URL: &str = "https://context7.com/api/v1";

/// Number of attempts for a single documentation fetch, including the first.
pub const DOCS_FETCH_ATTEMPTS: usize = 3;

/// Starting delay for exponential backoff between fetch attempts (100ms).
pub const STARTING_BACKOFF_DELAY_MS: u64 = 100;

/// Maximum backoff delay between fetch attempts (1s).
pub const MAX_BACKOFF_DELAY_MS: u64 = 1_000;

/// Sentinel returned when a version specifier has no comparable major token.
pub const UNKNOWN_VERSION: &str = "unknown";
