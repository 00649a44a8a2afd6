//! Declared dependencies from the project's `package.json`.
//!
//! The dependency manifest is read-only input: ctxdocs never edits it. Both
//! `dependencies` and `devDependencies` are considered, in that order and in
//! file order within each group. A package listed in both keeps its first
//! occurrence.
//!
//! [`DependencyRecord`]s are rebuilt from the manifest on every invocation; a
//! record carries a template reference only when a documentation template
//! matches the package name.

use anyhow::Result;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, warn};

use crate::core::CtxdocsError;
use crate::templates::TemplateRegistry;

/// One declared project dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyRecord {
    /// Package name as declared (`hono`, `@tanstack/react-query`)
    pub name: String,
    /// Raw version specifier (`^4.3.0`)
    pub version_spec: String,
    /// Name of the documentation template matching this package, if any
    pub template: Option<String>,
}

impl DependencyRecord {
    /// Create a record with no template reference.
    pub fn new(name: impl Into<String>, version_spec: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version_spec: version_spec.into(),
            template: None,
        }
    }

    /// Attach a template reference.
    #[must_use]
    pub fn with_template(mut self, template: impl Into<String>) -> Self {
        self.template = Some(template.into());
        self
    }
}

/// The parts of `package.json` ctxdocs reads.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageManifest {
    /// Package name, for display
    #[serde(default)]
    pub name: Option<String>,

    /// Runtime dependencies
    #[serde(default)]
    pub dependencies: Map<String, Value>,

    /// Development dependencies
    #[serde(default, rename = "devDependencies")]
    pub dev_dependencies: Map<String, Value>,
}

impl PackageManifest {
    /// Load and parse a `package.json`.
    ///
    /// # Errors
    ///
    /// - [`CtxdocsError::PackageManifestNotFound`] if the file does not exist
    /// - [`CtxdocsError::PackageManifestParseError`] if it is not valid JSON
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CtxdocsError::PackageManifestNotFound {
                path: path.display().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path).map_err(|e| CtxdocsError::FileSystemError {
            operation: format!("read package manifest: {e}"),
            path: path.display().to_string(),
        })?;

        Self::parse(&content, path)
    }

    /// Parse manifest text; `origin` is only used in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`CtxdocsError::PackageManifestParseError`] for malformed JSON.
    pub fn parse(content: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            CtxdocsError::PackageManifestParseError {
                file: origin.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }

    /// Declared `(name, version_spec)` pairs, runtime group first.
    ///
    /// Entries whose value is not a string (malformed manifests) are skipped.
    #[must_use]
    pub fn declared(&self) -> Vec<(String, String)> {
        let mut seen = HashSet::new();
        let mut declared = Vec::new();

        for (name, value) in self.dependencies.iter().chain(self.dev_dependencies.iter()) {
            if !seen.insert(name.as_str()) {
                continue;
            }
            match value.as_str() {
                Some(spec) => declared.push((name.clone(), spec.to_string())),
                None => warn!("Skipping dependency '{name}': version is not a string"),
            }
        }

        declared
    }

    /// Build dependency records, resolving template references against `registry`.
    #[must_use]
    pub fn dependency_records(&self, registry: &TemplateRegistry) -> Vec<DependencyRecord> {
        self.declared()
            .into_iter()
            .map(|(name, spec)| {
                let template = registry.find_for_package(&name).map(|t| t.name.clone());
                if let Some(template) = &template {
                    debug!("Dependency {name} matches template {template}");
                }
                DependencyRecord {
                    name,
                    version_spec: spec,
                    template,
                }
            })
            .collect()
    }
}
