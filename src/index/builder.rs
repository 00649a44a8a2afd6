//! Assembling index sections from recorded state and on-disk listings.

use serde::Serialize;

use super::scan::{CategoryEntry, DocsListing};
use crate::templates::TemplateRegistry;
use crate::version::is_unknown;

/// Title of the section listing hand-written internal docs.
pub const INTERNAL_SECTION_TITLE: &str = "Internal documentation";

/// One group of documentation rendered into the host document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSection {
    pub title: String,
    /// Directory the entries are relative to, with `/` separators
    pub root_path: String,
    pub critical_instructions: Vec<String>,
    /// Categories in discovery order; empty when nothing is on disk
    pub entries: Vec<IndexEntry>,
}

/// Files of one category within a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub category: String,
    pub files: Vec<String>,
}

impl From<&CategoryEntry> for IndexEntry {
    fn from(entry: &CategoryEntry) -> Self {
        Self {
            category: entry.category.clone(),
            files: entry.files.clone(),
        }
    }
}

/// Builds [`IndexSection`]s.
///
/// Sections follow the order of the framework mapping passed to
/// [`IndexBuilder::build`]. A framework with nothing on disk still gets a
/// section, with no entries.
#[derive(Debug, Clone)]
pub struct IndexBuilder<'a> {
    docs_root: String,
    internal_root: String,
    templates: Option<&'a TemplateRegistry>,
}

impl<'a> IndexBuilder<'a> {
    /// `docs_root` and `internal_root` are the display paths sections are rooted at.
    pub fn new(docs_root: impl Into<String>, internal_root: impl Into<String>) -> Self {
        Self {
            docs_root: docs_root.into(),
            internal_root: internal_root.into(),
            templates: None,
        }
    }

    /// Use template display names and instructions.
    #[must_use]
    pub const fn with_templates(mut self, templates: &'a TemplateRegistry) -> Self {
        self.templates = Some(templates);
        self
    }

    /// Build one section per `(framework, recorded version)` pair, then an
    /// internal-docs section when `internal` has any files.
    #[must_use]
    pub fn build(
        &self,
        frameworks: &[(String, String)],
        listing: &DocsListing,
        internal: &[CategoryEntry],
    ) -> Vec<IndexSection> {
        let mut sections: Vec<IndexSection> = frameworks
            .iter()
            .map(|(name, version)| self.framework_section(name, version, listing))
            .collect();

        let entries: Vec<IndexEntry> =
            internal.iter().filter(|c| !c.files.is_empty()).map(IndexEntry::from).collect();
        if !entries.is_empty() {
            sections.push(IndexSection {
                title: INTERNAL_SECTION_TITLE.to_string(),
                root_path: self.internal_root.clone(),
                critical_instructions: vec![
                    "Project-specific conventions; follow these over framework defaults."
                        .to_string(),
                ],
                entries,
            });
        }

        sections
    }

    fn framework_section(&self, name: &str, version: &str, listing: &DocsListing) -> IndexSection {
        let template = self.templates.and_then(|t| t.get(name));
        let display = template.map_or(name, |t| t.title());
        let title = if is_unknown(version) {
            display.to_string()
        } else {
            format!("{display} {version}")
        };

        let entries = listing
            .get(name)
            .map(|fw| {
                fw.categories.iter().filter(|c| !c.files.is_empty()).map(IndexEntry::from).collect()
            })
            .unwrap_or_default();

        IndexSection {
            title,
            root_path: format!("{}/{name}", self.docs_root.trim_end_matches('/')),
            critical_instructions: template.map(|t| t.instructions.clone()).unwrap_or_default(),
            entries,
        }
    }
}
