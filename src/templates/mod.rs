//! Documentation templates.
//!
//! A template declares which documentation a framework should have in the
//! cache: an ordered list of categories, each with an ordered list of files.
//! A file is either *fetched* (it names a `topic` to request from the
//! documentation source under the template's `library_id`) or *static* (it
//! carries its `content` inline).
//!
//! ```toml
//! name = "hono"
//! display_name = "Hono"
//! packages = ["hono"]
//! library_id = "/honojs/website"
//! instructions = ["Register middleware with app.use() before routes."]
//!
//! [[categories]]
//! name = "core"
//!
//! [[categories.files]]
//! name = "routing"
//! topic = "routing and path parameters"
//! ```
//!
//! Built-in templates ship inside the binary. Projects can add or override
//! templates with `*.toml` files in `.ctxdocs/templates/`; a project template
//! replaces a built-in one with the same `name`.
//!
//! The structure is fixed at two levels (category → files); iteration order
//! is declaration order.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::config::FrameworkSource;
use crate::core::CtxdocsError;
use crate::utils::path_validation::is_path_component;

const BUILTIN_TEMPLATES: &[(&str, &str)] = &[
    ("hono.toml", include_str!("builtin/hono.toml")),
    ("drizzle-orm.toml", include_str!("builtin/drizzle-orm.toml")),
    ("react.toml", include_str!("builtin/react.toml")),
    ("next.toml", include_str!("builtin/next.toml")),
    ("zod.toml", include_str!("builtin/zod.toml")),
    ("vitest.toml", include_str!("builtin/vitest.toml")),
    ("tailwindcss.toml", include_str!("builtin/tailwindcss.toml")),
    ("typescript.toml", include_str!("builtin/typescript.toml")),
];

/// A documentation template for one framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocTemplate {
    /// Framework name, also the directory name under the docs dir
    pub name: String,

    /// Human-readable name used in the host document index
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    /// Package names this template documents; the template name always matches
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub packages: Vec<String>,

    /// Identifier passed to the documentation source for fetched files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub library_id: Option<String>,

    /// Critical instructions rendered ahead of the file listing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub instructions: Vec<String>,

    /// Ordered categories of documentation files
    #[serde(default)]
    pub categories: Vec<TemplateCategory>,
}

/// A named group of documentation files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateCategory {
    /// Category name, also the subdirectory name
    pub name: String,
    /// Ordered files in this category
    #[serde(default)]
    pub files: Vec<TemplateFile>,
}

/// One documentation file a template expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateFile {
    /// File stem; written as `<name>.md`
    pub name: String,
    /// Topic requested from the documentation source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
    /// Inline content for static files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

impl TemplateFile {
    /// File name on disk.
    #[must_use]
    pub fn file_name(&self) -> String {
        if self.name.ends_with(".md") {
            self.name.clone()
        } else {
            format!("{}.md", self.name)
        }
    }
}

impl DocTemplate {
    /// Parse a template from TOML and validate it.
    ///
    /// # Errors
    ///
    /// Returns [`CtxdocsError::TemplateParseError`] if the TOML is malformed or
    /// the template is inconsistent (see [`DocTemplate::validate`]).
    pub fn parse(content: &str, origin: &str) -> Result<Self> {
        let template: Self = toml::from_str(content).map_err(|e| CtxdocsError::TemplateParseError {
            file: origin.to_string(),
            reason: e.to_string(),
        })?;

        template.validate().map_err(|reason| CtxdocsError::TemplateParseError {
            file: origin.to_string(),
            reason,
        })?;

        Ok(template)
    }

    /// Check structural consistency.
    ///
    /// Every file needs exactly one of `topic` or `content`, fetched files
    /// need a `library_id`, and names must be usable as path components.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if !is_path_component(&self.name) {
            return Err(format!("invalid template name '{}'", self.name));
        }

        for category in &self.categories {
            if !is_path_component(&category.name) {
                return Err(format!("invalid category name '{}'", category.name));
            }
            for file in &category.files {
                if !is_path_component(&file.name) {
                    return Err(format!("invalid file name '{}'", file.name));
                }
                match (&file.topic, &file.content) {
                    (Some(_), Some(_)) => {
                        return Err(format!("file '{}' has both topic and content", file.name));
                    }
                    (None, None) => {
                        return Err(format!("file '{}' needs a topic or content", file.name));
                    }
                    (Some(_), None) if self.library_id.is_none() => {
                        return Err(format!(
                            "file '{}' has a topic but the template has no library_id",
                            file.name
                        ));
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Whether this template documents `package`.
    #[must_use]
    pub fn matches_package(&self, package: &str) -> bool {
        self.name == package || self.packages.iter().any(|p| p == package)
    }

    /// Name used for display.
    #[must_use]
    pub fn title(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// How this template's content is acquired.
    #[must_use]
    pub const fn source(&self) -> FrameworkSource {
        if self.library_id.is_some() {
            FrameworkSource::Generated
        } else {
            FrameworkSource::Static
        }
    }

    /// Total number of files across categories.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.categories.iter().map(|c| c.files.len()).sum()
    }

    /// Iterate `(category, file)` pairs in declaration order.
    pub fn files(&self) -> impl Iterator<Item = (&TemplateCategory, &TemplateFile)> {
        self.categories.iter().flat_map(|c| c.files.iter().map(move |f| (c, f)))
    }
}

/// The set of templates available to a project.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: Vec<DocTemplate>,
}

impl TemplateRegistry {
    /// A registry holding only the built-in templates.
    ///
    /// # Errors
    ///
    /// Fails only if a built-in template is malformed.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::default();
        for (file, content) in BUILTIN_TEMPLATES {
            registry.insert(DocTemplate::parse(content, &format!("builtin:{file}"))?);
        }
        Ok(registry)
    }

    /// Built-in templates plus project templates from `templates_dir`, if it exists.
    ///
    /// Project files are read in file-name order so overrides are deterministic.
    ///
    /// # Errors
    ///
    /// Returns an error if a project template cannot be read or parsed.
    pub fn load(templates_dir: &Path) -> Result<Self> {
        let mut registry = Self::builtin()?;

        if !templates_dir.is_dir() {
            return Ok(registry);
        }

        let mut paths: Vec<_> = std::fs::read_dir(templates_dir)
            .map_err(|e| CtxdocsError::FileSystemError {
                operation: format!("read templates directory: {e}"),
                path: templates_dir.display().to_string(),
            })?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
            .collect();
        paths.sort();

        for path in paths {
            let content = std::fs::read_to_string(&path).map_err(|e| {
                CtxdocsError::FileSystemError {
                    operation: format!("read template: {e}"),
                    path: path.display().to_string(),
                }
            })?;
            let template = DocTemplate::parse(&content, &path.display().to_string())?;
            debug!("Loaded project template {} from {}", template.name, path.display());
            registry.insert(template);
        }

        Ok(registry)
    }

    /// Add a template, replacing any existing one with the same name in place.
    pub fn insert(&mut self, template: DocTemplate) {
        match self.templates.iter_mut().find(|t| t.name == template.name) {
            Some(existing) => *existing = template,
            None => self.templates.push(template),
        }
    }

    /// Look up a template by framework name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&DocTemplate> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Whether a template exists for framework `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// The template documenting `package`, if any.
    #[must_use]
    pub fn find_for_package(&self, package: &str) -> Option<&DocTemplate> {
        self.get(package).or_else(|| self.templates.iter().find(|t| t.matches_package(package)))
    }

    /// All templates in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &DocTemplate> {
        self.templates.iter()
    }

    /// Number of templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
