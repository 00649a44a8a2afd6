//! Rendering index sections into the text placed inside the marker block.

use std::fmt::Write;

use super::builder::IndexSection;

const HEADER: &str = "## Documentation index";
const LEAD: &str = "Local reference documentation for this project's frameworks, pinned to the \
                    installed major versions. Read the relevant files before writing code against \
                    these libraries; prefer them over recalled APIs.";

/// Render `sections` as markdown.
///
/// The output depends only on the sections, is always newline-terminated, and
/// contains no timestamps, so identical input renders to identical bytes.
#[must_use]
pub fn render_sections(sections: &[IndexSection]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{HEADER}");
    let _ = writeln!(out);
    let _ = writeln!(out, "{LEAD}");

    if sections.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "_No documentation has been generated yet. Run `ctxdocs sync`._");
        return out;
    }

    for section in sections {
        let _ = writeln!(out);
        let _ = writeln!(out, "### {}", section.title);
        let _ = writeln!(out);
        let _ = writeln!(out, "Root: `{}/`", section.root_path);

        if !section.critical_instructions.is_empty() {
            let _ = writeln!(out);
            let _ = writeln!(out, "**Critical:**");
            for instruction in &section.critical_instructions {
                let _ = writeln!(out, "- {instruction}");
            }
        }

        let _ = writeln!(out);
        if section.entries.is_empty() {
            let _ = writeln!(out, "_No files on disk._");
        } else {
            for entry in &section.entries {
                let _ = writeln!(out, "- `{}/`: {}", entry.category, entry.files.join(", "));
            }
        }
    }

    out
}
