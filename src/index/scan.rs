//! On-disk documentation listings.
//!
//! The docs directory has a fixed shape:
//!
//! ```text
//! .ctxdocs/docs/
//! ├── hono/
//! │   ├── core/
//! │   │   ├── routing.md
//! │   │   └── context.md
//! │   └── middleware/
//! │       └── cors.md
//! └── zod/
//!     └── ...
//! ```
//!
//! Listings keep discovery order: nothing here sorts, so an unchanged tree
//! lists the same way on every run.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Category name for internal docs placed directly in the internal root.
pub const ROOT_CATEGORY: &str = "general";

/// Files of one category, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryEntry {
    pub category: String,
    pub files: Vec<String>,
}

/// Categories of one framework, in discovery order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrameworkListing {
    pub name: String,
    pub categories: Vec<CategoryEntry>,
}

impl FrameworkListing {
    /// Total number of files.
    #[must_use]
    pub fn file_count(&self) -> usize {
        self.categories.iter().map(|c| c.files.len()).sum()
    }
}

/// Everything found under the docs directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocsListing {
    pub frameworks: Vec<FrameworkListing>,
}

impl DocsListing {
    /// Listing for framework `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FrameworkListing> {
        self.frameworks.iter().find(|f| f.name == name)
    }
}

fn category_mut<'a>(categories: &'a mut Vec<CategoryEntry>, name: &str) -> &'a mut CategoryEntry {
    let index = match categories.iter().position(|c| c.category == name) {
        Some(index) => index,
        None => {
            categories.push(CategoryEntry {
                category: name.to_string(),
                files: Vec::new(),
            });
            categories.len() - 1
        }
    };
    &mut categories[index]
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "md")
}

fn component(path: &Path, root: &Path, index: usize) -> Option<String> {
    path.strip_prefix(root)
        .ok()?
        .components()
        .nth(index)
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
}

/// List `<root>/<framework>/<category>/<file>.md`.
///
/// A missing root yields an empty listing.
///
/// # Errors
///
/// Returns an error if a directory under `root` cannot be read.
pub fn scan_docs_dir(root: &Path) -> Result<DocsListing> {
    let mut listing = DocsListing::default();
    if !root.is_dir() {
        return Ok(listing);
    }

    for entry in WalkDir::new(root).min_depth(1).max_depth(3) {
        let entry =
            entry.with_context(|| format!("Failed to list documentation in {}", root.display()))?;
        let path = entry.path();
        let is_dir = entry.file_type().is_dir();

        match entry.depth() {
            1 if is_dir => {
                if let Some(name) = component(path, root, 0) {
                    listing.frameworks.push(FrameworkListing {
                        name,
                        categories: Vec::new(),
                    });
                }
            }
            2 if is_dir => {
                let (Some(framework), Some(category)) =
                    (component(path, root, 0), component(path, root, 1))
                else {
                    continue;
                };
                if let Some(listed) = listing.frameworks.iter_mut().find(|f| f.name == framework) {
                    category_mut(&mut listed.categories, &category);
                }
            }
            3 if !is_dir && is_markdown(path) => {
                let (Some(framework), Some(category), Some(file)) = (
                    component(path, root, 0),
                    component(path, root, 1),
                    component(path, root, 2),
                ) else {
                    continue;
                };
                if let Some(listed) = listing.frameworks.iter_mut().find(|f| f.name == framework) {
                    category_mut(&mut listed.categories, &category).files.push(file);
                }
            }
            _ => debug!("Ignoring {} in docs directory", path.display()),
        }
    }

    Ok(listing)
}

/// List internal docs: `<root>/<category>/<file>.md`, with files directly in
/// `root` grouped under [`ROOT_CATEGORY`].
///
/// # Errors
///
/// Returns an error if a directory under `root` cannot be read.
pub fn scan_internal_dir(root: &Path) -> Result<Vec<CategoryEntry>> {
    let mut categories = Vec::new();
    if !root.is_dir() {
        return Ok(categories);
    }

    for entry in WalkDir::new(root).min_depth(1).max_depth(2) {
        let entry = entry
            .with_context(|| format!("Failed to list internal docs in {}", root.display()))?;
        let path = entry.path();
        let is_dir = entry.file_type().is_dir();

        match entry.depth() {
            1 if is_dir => {
                if let Some(category) = component(path, root, 0) {
                    category_mut(&mut categories, &category);
                }
            }
            1 if is_markdown(path) => {
                if let Some(file) = component(path, root, 0) {
                    category_mut(&mut categories, ROOT_CATEGORY).files.push(file);
                }
            }
            2 if !is_dir && is_markdown(path) => {
                if let (Some(category), Some(file)) =
                    (component(path, root, 0), component(path, root, 1))
                {
                    category_mut(&mut categories, &category).files.push(file);
                }
            }
            _ => {}
        }
    }

    categories.retain(|c| !c.files.is_empty());
    Ok(categories)
}
