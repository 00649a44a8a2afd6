//! Project configuration stored in `ctxdocs.toml`.
//!
//! The project configuration records where documentation lives and what has
//! already been generated. It is read once at the start of a command and
//! written once at the end, atomically.
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
//! file_count = 4
//! categories = ["core", "middleware"]
//! ```
//!
//! Frameworks are stored as an ordered array; [`ProjectConfig::upsert_framework`]
//! keeps names unique and preserves the position of an updated entry.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::constants::{
    CONFIG_FILE_NAME, DEFAULT_DOCS_DIR, DEFAULT_HOST_DOCUMENT, DEFAULT_INTERNAL_DIR,
    DEFAULT_MAX_FILE_CHARS, DEFAULT_TEMPLATES_DIR, DEFAULT_TOKENS_PER_FILE,
};
use crate::core::CtxdocsError;
use crate::utils::fs::safe_write;
use crate::utils::path_validation::is_path_component;

const CURRENT_CONFIG_VERSION: u32 = 1;

const fn default_version() -> u32 {
    CURRENT_CONFIG_VERSION
}

fn default_host_document() -> PathBuf {
    PathBuf::from(DEFAULT_HOST_DOCUMENT)
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from(DEFAULT_DOCS_DIR)
}

fn default_internal_dir() -> PathBuf {
    PathBuf::from(DEFAULT_INTERNAL_DIR)
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from(DEFAULT_TEMPLATES_DIR)
}

/// How a framework's documentation was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrameworkSource {
    /// Fetched from the documentation source
    Generated,
    /// Written from inline template content
    Static,
}

impl std::fmt::Display for FrameworkSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Generated => write!(f, "generated"),
            Self::Static => write!(f, "static"),
        }
    }
}

/// Recorded documentation state for one framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkState {
    /// Framework name, unique within the configuration
    pub name: String,
    /// Major token the documentation was generated for (`4.x`, `0.44`, `unknown`)
    pub version: String,
    /// How the documentation was produced
    pub source: FrameworkSource,
    /// Documentation source identifier, for generated frameworks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_id: Option<String>,
    /// When the documentation was last written
    pub updated_at: DateTime<Utc>,
    /// Number of files written
    #[serde(default)]
    pub file_count: usize,
    /// Categories present on disk
    #[serde(default)]
    pub categories: BTreeSet<String>,
}

/// Size limits applied while generating documentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Characters kept per file after budgeting
    #[serde(default = "default_max_file_chars")]
    pub max_file_chars: usize,
    /// Tokens requested per file from the documentation source
    #[serde(default = "default_tokens_per_file")]
    pub tokens_per_file: u32,
}

const fn default_max_file_chars() -> usize {
    DEFAULT_MAX_FILE_CHARS
}

const fn default_tokens_per_file() -> u32 {
    DEFAULT_TOKENS_PER_FILE
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_file_chars: DEFAULT_MAX_FILE_CHARS,
            tokens_per_file: DEFAULT_TOKENS_PER_FILE,
        }
    }
}

/// The contents of `ctxdocs.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Configuration format version
    #[serde(default = "default_version")]
    pub version: u32,

    /// Host document receiving the generated block, relative to the project root
    #[serde(default = "default_host_document")]
    pub host_document: PathBuf,

    /// Cached framework documentation directory
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    /// Hand-written internal documentation directory
    #[serde(default = "default_internal_dir")]
    pub internal_dir: PathBuf,

    /// Project template directory
    #[serde(default = "default_templates_dir")]
    pub templates_dir: PathBuf,

    /// Completion time of the last successful sync
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_sync: Option<DateTime<Utc>>,

    /// Size limits
    #[serde(default)]
    pub limits: Limits,

    /// Recorded framework states, in insertion order
    #[serde(default)]
    pub frameworks: Vec<FrameworkState>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            host_document: default_host_document(),
            docs_dir: default_docs_dir(),
            internal_dir: default_internal_dir(),
            templates_dir: default_templates_dir(),
            last_sync: None,
            limits: Limits::default(),
            frameworks: Vec::new(),
        }
    }
}

impl ProjectConfig {
    /// Load `ctxdocs.toml` from `path`.
    ///
    /// # Errors
    ///
    /// - [`CtxdocsError::ConfigNotFound`] if the file does not exist
    /// - [`CtxdocsError::ConfigParseError`] if the TOML is malformed, two
    ///   frameworks share a name, or a name is not a plain directory name
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CtxdocsError::ConfigNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        Self::parse(&content, path)
    }

    /// Parse configuration text; `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`CtxdocsError::ConfigParseError`] for malformed input.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| CtxdocsError::ConfigParseError {
            file: origin.display().to_string(),
            reason: e.to_string(),
        })?;

        let mut seen = BTreeSet::new();
        for framework in &config.frameworks {
            if !is_path_component(&framework.name) {
                return Err(CtxdocsError::ConfigParseError {
                    file: origin.display().to_string(),
                    reason: format!(
                        "framework name '{}' is not a plain directory name",
                        framework.name
                    ),
                }
                .into());
            }
            if !seen.insert(framework.name.as_str()) {
                return Err(CtxdocsError::ConfigParseError {
                    file: origin.display().to_string(),
                    reason: format!("framework '{}' is recorded more than once", framework.name),
                }
                .into());
            }
        }

        Ok(config)
    }

    /// Write the configuration atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(CtxdocsError::from)?;
        safe_write(path, &content)
            .with_context(|| format!("Failed to write configuration to {}", path.display()))?;
        debug!("Saved configuration with {} frameworks to {}", self.frameworks.len(), path.display());
        Ok(())
    }

    /// Recorded state for `name`.
    #[must_use]
    pub fn framework(&self, name: &str) -> Option<&FrameworkState> {
        self.frameworks.iter().find(|f| f.name == name)
    }

    /// Insert or replace a framework state; a replaced entry keeps its position.
    pub fn upsert_framework(&mut self, state: FrameworkState) {
        match self.frameworks.iter_mut().find(|f| f.name == state.name) {
            Some(existing) => *existing = state,
            None => self.frameworks.push(state),
        }
    }

    /// Remove a framework state, returning it if present.
    pub fn remove_framework(&mut self, name: &str) -> Option<FrameworkState> {
        let index = self.frameworks.iter().position(|f| f.name == name)?;
        Some(self.frameworks.remove(index))
    }

    /// Ordered `(framework, recorded version)` pairs.
    #[must_use]
    pub fn recorded_versions(&self) -> Vec<(String, String)> {
        self.frameworks.iter().map(|f| (f.name.clone(), f.version.clone())).collect()
    }
}

/// Resolved project layout: the configuration plus the root it is relative to.
#[derive(Debug, Clone)]
pub struct Project {
    /// Directory containing `ctxdocs.toml`
    pub root: PathBuf,
    /// Loaded configuration
    pub config: ProjectConfig,
}

impl Project {
    /// Load the project rooted at `root`.
    ///
    /// # Errors
    ///
    /// See [`ProjectConfig::load`].
    pub fn load(root: &Path) -> Result<Self> {
        let config = ProjectConfig::load(&root.join(CONFIG_FILE_NAME))?;
        Ok(Self {
            root: root.to_path_buf(),
            config,
        })
    }

    /// Path of `ctxdocs.toml`.
    #[must_use]
    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE_NAME)
    }

    /// Absolute path of the host document.
    #[must_use]
    pub fn host_document_path(&self) -> PathBuf {
        self.root.join(&self.config.host_document)
    }

    /// Absolute path of the docs directory.
    #[must_use]
    pub fn docs_dir(&self) -> PathBuf {
        self.root.join(&self.config.docs_dir)
    }

    /// Absolute path of the internal docs directory.
    #[must_use]
    pub fn internal_dir(&self) -> PathBuf {
        self.root.join(&self.config.internal_dir)
    }

    /// Absolute path of the project template directory.
    #[must_use]
    pub fn templates_dir(&self) -> PathBuf {
        self.root.join(&self.config.templates_dir)
    }

    /// Persist the configuration.
    ///
    /// # Errors
    ///
    /// See [`ProjectConfig::save`].
    pub fn save(&self) -> Result<()> {
        self.config.save(&self.config_path())
    }
}

/// Find the nearest directory at or above `start` containing `ctxdocs.toml`.
///
/// # Errors
///
/// Returns [`CtxdocsError::ConfigNotFound`] naming the starting directory when
/// no ancestor has a configuration.
pub fn find_project_root(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE_NAME).exists() {
            return Ok(current);
        }

        if !current.pop() {
            return Err(CtxdocsError::ConfigNotFound {
                path: start.join(CONFIG_FILE_NAME).display().to_string(),
            }
            .into());
        }
    }
}
