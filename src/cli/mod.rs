//! Command-line interface for ctxdocs.
//!
//! Each command lives in its own module with its own `clap` argument struct
//! and an `execute` method taking the resolved [`CliConfig`].
//!
//! # Commands
//!
//! - `init` - create `ctxdocs.toml` and the documentation directories, then sync
//! - `sync` - reconcile cached documentation with `package.json`
//! - `status` - show what a sync would do, without network access
//! - `outdated` - compare recorded versions with the latest registry releases
//! - `index` - rebuild the host document block from the files on disk
//! - `templates` - list available documentation templates
//! - `config` - show or edit the global configuration
//!
//! # Global Options
//!
//! - `--verbose` - debug logging
//! - `--quiet` - errors only
//! - `--no-progress` - no progress bars
//! - `--config` - global configuration file to use
//! - `--project-dir` - start the project search here instead of the
//!   current directory
//!
//! ```bash
//! ctxdocs init
//! ctxdocs sync --dry-run
//! ctxdocs outdated --check
//! ```

pub mod common;
mod config;
mod index;
mod init;
mod outdated;
mod status;
mod sync;
mod templates;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Output format shared by the reporting commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// Settings derived from the global flags, resolved once per invocation.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter directive; `None` defers to `RUST_LOG`, then `warn`
    pub log_level: Option<String>,

    /// Disable progress indicators
    pub no_progress: bool,

    /// Global configuration file override
    pub config_path: Option<PathBuf>,

    /// Where the project search starts
    pub project_dir: Option<PathBuf>,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether progress indicators may be drawn.
    #[must_use]
    pub const fn show_progress(&self) -> bool {
        !self.no_progress
    }

    /// Install the global `tracing` subscriber, writing to stderr.
    ///
    /// A second call is a no-op.
    pub fn init_logging(&self) {
        let filter = match &self.log_level {
            Some(level) => EnvFilter::new(level),
            None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

#[derive(Parser)]
#[command(
    name = "ctxdocs",
    about = "Keep framework documentation for your agent in sync with package.json",
    version,
    author,
    long_about = "ctxdocs caches versioned reference documentation for the frameworks your \
                  project depends on and keeps an index of it inside your agent guide (CLAUDE.md)."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to the global configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory to search for ctxdocs.toml (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    project_dir: Option<PathBuf>,

    /// Disable progress bars
    #[arg(long, global = true)]
    no_progress: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize ctxdocs in a project
    Init(init::InitCommand),

    /// Fetch, refresh, and prune cached documentation
    Sync(sync::SyncCommand),

    /// Show documentation status for each dependency
    Status(status::StatusCommand),

    /// Check recorded documentation against the latest published releases
    Outdated(outdated::OutdatedCommand),

    /// Rebuild the documentation index in the host document
    Index(index::IndexCommand),

    /// List available documentation templates
    Templates(templates::TemplatesCommand),

    /// Manage the global configuration
    Config(config::ConfigCommand),
}

impl Cli {
    /// Execute with configuration derived from the flags.
    ///
    /// # Errors
    ///
    /// Returns whatever the selected command returns.
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            Some("error".to_string())
        } else {
            None
        };

        CliConfig {
            log_level,
            no_progress: self.no_progress,
            config_path: self.config.clone(),
            project_dir: self.project_dir.clone(),
        }
    }

    /// Execute with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns whatever the selected command returns.
    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Init(cmd) => cmd.execute(&config).await,
            Commands::Sync(cmd) => cmd.execute(&config).await,
            Commands::Status(cmd) => cmd.execute(&config),
            Commands::Outdated(cmd) => cmd.execute(&config).await,
            Commands::Index(cmd) => cmd.execute(&config),
            Commands::Templates(cmd) => cmd.execute(&config),
            Commands::Config(cmd) => cmd.execute(&config).await,
        }
    }
}
