//! Splicing generated content between sentinel lines of a host document.
//!
//! The host document is human-authored; ctxdocs owns only the region
//! strictly between a begin line and an end line. Everything outside that
//! region is copied byte for byte.
//!
//! Three cases:
//!
//! 1. No document: a new one is created from the caller's preamble followed
//!    by the marker pair wrapping the content.
//! 2. A begin line followed by an end line: the span between them is
//!    replaced. The *last* begin line is used together with the first end
//!    line after it.
//! 3. Markers missing or out of order: a fresh marker pair is appended after
//!    the existing text, separated by a blank line.
//!
//! Because an appended pair is always the last begin line in the document,
//! a second splice with the same content finds it and replaces it with
//! itself, so repeated application never drifts or duplicates markers.

use std::ops::Range;

use crate::constants::{MARKER_BEGIN, MARKER_END};

/// The sentinel lines delimiting a generated block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerBlock {
    begin: String,
    end: String,
}

/// Result of a splice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    /// The full new document text
    pub text: String,
    /// Whether the document did not exist before
    pub created: bool,
}

impl Default for MarkerBlock {
    fn default() -> Self {
        Self::new(MARKER_BEGIN, MARKER_END)
    }
}

impl MarkerBlock {
    pub fn new(begin: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            begin: begin.into(),
            end: end.into(),
        }
    }

    /// Splice `rendered` into `current`.
    ///
    /// `current` is `None` when the document does not exist; `preamble` is
    /// only used in that case. A missing trailing newline on `rendered` is
    /// supplied so the end line always starts a line of its own.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ctxdocs_cli::index::MarkerBlock;
    ///
    /// let markers = MarkerBlock::new("<!-- b -->", "<!-- e -->");
    /// let doc = "# Notes\n<!-- b -->\nold\n<!-- e -->\nfooter\n";
    ///
    /// let first = markers.splice(Some(doc), "new\n", "");
    /// assert_eq!(first.text, "# Notes\n<!-- b -->\nnew\n<!-- e -->\nfooter\n");
    /// assert!(!first.created);
    ///
    /// let second = markers.splice(Some(&first.text), "new\n", "");
    /// assert_eq!(second.text, first.text);
    /// ```
    #[must_use]
    pub fn splice(&self, current: Option<&str>, rendered: &str, preamble: &str) -> Splice {
        let body = if rendered.is_empty() || rendered.ends_with('\n') {
            rendered.to_string()
        } else {
            format!("{rendered}\n")
        };

        let Some(current) = current else {
            return Splice {
                text: format!("{preamble}{}", self.wrap(&body)),
                created: true,
            };
        };

        let text = match self.locate(current) {
            Some(region) => {
                let mut text = String::with_capacity(current.len() + body.len());
                text.push_str(&current[..region.start]);
                text.push_str(&body);
                text.push_str(&current[region.end..]);
                text
            }
            None => {
                let mut text = current.to_string();
                if !text.is_empty() {
                    if !text.ends_with('\n') {
                        text.push('\n');
                    }
                    text.push('\n');
                }
                text.push_str(&self.wrap(&body));
                text
            }
        };

        Splice {
            text,
            created: false,
        }
    }

    /// The content currently between the markers, if a well-formed pair exists.
    #[must_use]
    pub fn extract<'a>(&self, document: &'a str) -> Option<&'a str> {
        self.locate(document).map(|region| &document[region])
    }

    fn wrap(&self, body: &str) -> String {
        format!("{}\n{body}{}\n", self.begin, self.end)
    }

    /// Byte range strictly between the last begin line and the first end
    /// line following it.
    fn locate(&self, document: &str) -> Option<Range<usize>> {
        let mut offset = 0;
        let mut content_start = None;
        let mut region = None;

        for line in document.split_inclusive('\n') {
            let next = offset + line.len();
            let trimmed = line.trim();

            if trimmed == self.begin && line.ends_with('\n') {
                content_start = Some(next);
                region = None;
            } else if trimmed == self.end
                && let Some(start) = content_start
                && region.is_none()
            {
                region = Some(start..offset);
            }

            offset = next;
        }

        region
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const B: &str = "<!-- ctxdocs:begin -->";
    const E: &str = "<!-- ctxdocs:end -->";

    fn markers() -> MarkerBlock {
        MarkerBlock::default()
    }

    #[test]
    fn test_create_when_missing() {
        let splice = markers().splice(None, "index\n", "# Guide\n\n");
        assert!(splice.created);
        assert_eq!(splice.text, format!("# Guide\n\n{B}\nindex\n{E}\n"));
    }

    #[test]
    fn test_replace_preserves_outside_bytes() {
        let prefix = "# My project\r\n\nHand-written notes.\n";
        let suffix = "\n## Footer\nno trailing newline";
        let doc = format!("{prefix}{B}\nstale\nstale\n{E}{suffix}");

        let splice = markers().splice(Some(&doc), "fresh\n", "ignored");
        assert!(!splice.created);
        assert_eq!(splice.text, format!("{prefix}{B}\nfresh\n{E}{suffix}"));
    }

    #[test]
    fn test_idempotent_replace() {
        let doc = format!("intro\n{B}\nold\n{E}\noutro\n");
        let first = markers().splice(Some(&doc), "new content\n", "");
        let second = markers().splice(Some(&first.text), "new content\n", "");
        assert_eq!(first.text, second.text);
    }

    #[test]
    fn test_idempotent_create() {
        let first = markers().splice(None, "a\n", "# T\n\n");
        let second = markers().splice(Some(&first.text), "a\n", "# T\n\n");
        assert_eq!(first.text, second.text);
    }

    #[test]
    fn test_reversed_markers_append_and_preserve_prefix() {
        let doc = format!("top\n{E}\nmiddle\n{B}\nbottom\n");
        let first = markers().splice(Some(&doc), "body\n", "");

        assert!(first.text.starts_with(&doc));
        assert_eq!(first.text, format!("{doc}\n{B}\nbody\n{E}\n"));

        let second = markers().splice(Some(&first.text), "body\n", "");
        assert_eq!(second.text, first.text);
    }

    #[test]
    fn test_only_begin_present_appends() {
        let doc = format!("text\n{B}\nleftover");
        let splice = markers().splice(Some(&doc), "body\n", "");
        assert!(splice.text.starts_with(&doc));
        assert_eq!(splice.text, format!("{doc}\n\n{B}\nbody\n{E}\n"));
    }

    #[test]
    fn test_only_end_present_appends() {
        let doc = format!("text\n{E}\n");
        let first = markers().splice(Some(&doc), "body\n", "");
        assert_eq!(first.text, format!("{doc}\n{B}\nbody\n{E}\n"));
        assert_eq!(markers().splice(Some(&first.text), "body\n", "").text, first.text);
    }

    #[test]
    fn test_no_markers_appends_with_separator() {
        let splice = markers().splice(Some("# Project"), "body\n", "");
        assert_eq!(splice.text, format!("# Project\n\n{B}\nbody\n{E}\n"));
    }

    #[test]
    fn test_empty_document_gets_bare_block() {
        let splice = markers().splice(Some(""), "body\n", "# preamble\n");
        assert!(!splice.created);
        assert_eq!(splice.text, format!("{B}\nbody\n{E}\n"));
    }

    #[test]
    fn test_last_begin_wins() {
        let doc = format!("{B}\nbroken\n{B}\nold\n{E}\n");
        let splice = markers().splice(Some(&doc), "new\n", "");
        assert_eq!(splice.text, format!("{B}\nbroken\n{B}\nnew\n{E}\n"));
    }

    #[test]
    fn test_missing_trailing_newline_in_content() {
        let splice = markers().splice(None, "body", "");
        assert_eq!(splice.text, format!("{B}\nbody\n{E}\n"));
    }

    #[test]
    fn test_marker_must_be_whole_line() {
        let doc = format!("see {B} inline\nand {E}\n");
        let splice = markers().splice(Some(&doc), "body\n", "");
        assert!(splice.text.starts_with(&doc));
        assert!(splice.text.ends_with(&format!("\n\n{B}\nbody\n{E}\n")));
    }

    #[test]
    fn test_extract() {
        let doc = format!("x\n{B}\ninside\n{E}\n");
        assert_eq!(markers().extract(&doc), Some("inside\n"));
        assert_eq!(markers().extract("nothing"), None);
    }
}
