//! ctxdocs - versioned framework documentation for coding agents
//!
//! ctxdocs keeps a local cache of reference documentation for the frameworks
//! a JavaScript/TypeScript project depends on, and keeps a generated index of
//! that cache inside the project's agent guide (`CLAUDE.md` by default).
//!
//! # Architecture Overview
//!
//! Every invocation starts from two inputs:
//! - `package.json`, the declared dependencies (read-only)
//! - `ctxdocs.toml`, the documentation state recorded by the previous sync
//!
//! A sync pass then runs:
//!
//! 1. [`planner`] compares the two and produces add/update/remove actions,
//!    using [`version`] to reduce version specifiers to a comparable major
//!    token
//! 2. [`sync`] applies the actions: files are fetched through [`fetch`],
//!    trimmed by [`budget`], and written under `.ctxdocs/docs/<framework>/`
//! 3. [`index`] lists what is on disk, renders the index, and splices it into
//!    the host document between `<!-- ctxdocs:begin -->` and
//!    `<!-- ctxdocs:end -->`, leaving everything else byte for byte intact
//! 4. the new state is saved to `ctxdocs.toml`
//!
//! # Modules
//!
//! - [`budget`] - fit documentation text into a character budget
//! - [`cli`] - command-line interface
//! - [`config`] - project (`ctxdocs.toml`) and global (`~/.ctxdocs/config.toml`) configuration
//! - [`constants`] - file names, defaults, and limits
//! - [`core`] - error types and user-facing error reporting
//! - [`fetch`] - documentation and registry clients, bounded-concurrency lookups
//! - [`index`] - index building, rendering, and marker-block splicing
//! - [`manifest`] - `package.json` reading
//! - [`planner`] - reconciliation planning
//! - [`sync`] - applying a plan
//! - [`templates`] - built-in and project documentation templates
//! - [`utils`] - atomic file writes and progress indicators
//! - [`version`] - version normalization
//!
//! # Project Configuration (ctxdocs.toml)
//!
//! ```toml
//! version = 1
//! host_document = "CLAUDE.md"
//! docs_dir = ".ctxdocs/docs"
//! last_sync = "2026-10-16T09:12:44Z"
//!
//! [limits]
//! max_file_chars = 40000
//! tokens_per_file = 5000
//!
//! [[frameworks]]
//! name = "hono"
//! version = "4.x"
//! source = "generated"
//! library_id = "/honojs/website"
//! updated_at = "2026-10-16T09:12:44Z"
//! file_count = 6
//! categories = ["core", "guides", "middleware"]
//! ```

pub mod budget;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod fetch;
pub mod index;
pub mod manifest;
pub mod planner;
pub mod sync;
pub mod templates;
pub mod utils;
pub mod version;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
