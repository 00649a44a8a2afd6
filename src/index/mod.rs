//! The generated documentation index in the host document.
//!
//! Every run rebuilds the index from scratch: the docs directory is listed
//! ([`scan`]), turned into sections ([`builder`]), rendered to markdown
//! ([`render`]), and spliced between the sentinel lines of the host document
//! ([`marker`]). Nothing is diffed incrementally; stability comes from
//! deterministic listing and rendering plus an idempotent splice.

pub mod builder;
pub mod marker;
pub mod render;
pub mod scan;

pub use builder::{INTERNAL_SECTION_TITLE, IndexBuilder, IndexEntry, IndexSection};
pub use marker::{MarkerBlock, Splice};
pub use render::render_sections;
pub use scan::{CategoryEntry, DocsListing, FrameworkListing, scan_docs_dir, scan_internal_dir};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::Project;
use crate::templates::TemplateRegistry;
use crate::utils::fs::safe_write;

/// Text placed above the marker block when the host document is created.
pub const HOST_DOCUMENT_PREAMBLE: &str = "# Project guide\n\n\
Notes for coding agents working in this repository. Everything outside the \
generated block below is yours to edit.\n\n";

/// What happened to the host document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexOutcome {
    pub path: PathBuf,
    pub created: bool,
    /// Whether the file content changed
    pub changed: bool,
    pub sections: usize,
}

fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Build the index sections for `project` from what is on disk.
///
/// # Errors
///
/// Returns an error if the docs or internal directory cannot be listed.
pub fn build_sections(project: &Project, templates: &TemplateRegistry) -> Result<Vec<IndexSection>> {
    let listing = scan_docs_dir(&project.docs_dir())?;
    let internal = scan_internal_dir(&project.internal_dir())?;

    let builder = IndexBuilder::new(
        display_path(&project.config.docs_dir),
        display_path(&project.config.internal_dir),
    )
    .with_templates(templates);

    Ok(builder.build(&project.config.recorded_versions(), &listing, &internal))
}

/// Rebuild the index and splice it into the host document.
///
/// With `dry_run` nothing is written. An unchanged document is not rewritten.
///
/// # Errors
///
/// Returns an error if listing, reading, or writing fails.
pub fn refresh_host_document(
    project: &Project,
    templates: &TemplateRegistry,
    dry_run: bool,
) -> Result<IndexOutcome> {
    let sections = build_sections(project, templates)?;
    let rendered = render_sections(&sections);

    let path = project.host_document_path();
    let current = if path.exists() {
        Some(
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read host document {}", path.display()))?,
        )
    } else {
        None
    };

    let markers = MarkerBlock::default();
    if let Some(current) = &current
        && markers.extract(current).is_none()
    {
        warn!("No well-formed ctxdocs block in {}, appending a new one", path.display());
    }

    let splice = markers.splice(current.as_deref(), &rendered, HOST_DOCUMENT_PREAMBLE);
    let changed = current.as_deref() != Some(splice.text.as_str());

    if !changed {
        debug!("Documentation index in {} is current", path.display());
    } else if !dry_run {
        safe_write(&path, &splice.text)?;
        info!("Updated documentation index in {}", path.display());
    }

    Ok(IndexOutcome {
        path,
        created: splice.created,
        changed,
        sections: sections.len(),
    })
}
