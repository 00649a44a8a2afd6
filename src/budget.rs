//! Size budgeting for fetched documentation.
//!
//! Fetched documentation can be far larger than what is useful to keep next to
//! a project. [`budget_content`] trims a markdown blob to a character budget
//! while keeping the material an agent reaches for first: overviews, quick
//! starts, usage notes, examples and API references.
//!
//! The text is cut into sections at level 1-3 headings. Sections mentioning a
//! priority topic are kept ahead of the rest; within each class the original
//! order is preserved. Accumulation stops at the first section that does not
//! fit, so the result never exceeds the budget. Lengths are counted in
//! characters, so truncation never splits a UTF-8 sequence.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Topics that mark a section as high priority, matched case-insensitively
/// at the start of a word, so `APIs` and `Usages` count but `rapid` does not.
static PRIORITY_TOPICS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(overview|quick\s*start|getting\s+started|basic|usage|example|api)")
        .expect("priority topic pattern is valid")
});

/// A heading of depth one to three at the start of a line.
static SECTION_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,3}[ \t]").expect("heading pattern is valid"));

/// Fit `text` into `max_chars` characters, keeping priority sections first.
///
/// Text already within budget is returned borrowed and untouched.
///
/// # Examples
///
/// ```rust
/// use ctxdocs_cli::budget::budget_content;
/// use std::borrow::Cow;
///
/// let small = "# Intro\nshort";
/// assert!(matches!(budget_content(small, 100), Cow::Borrowed(_)));
///
/// let doc = "# Internals\nlots of detail here\n# Usage\ncall it\n";
/// assert_eq!(budget_content(doc, 20), "# Usage\ncall it\n");
/// ```
#[must_use]
pub fn budget_content(text: &str, max_chars: usize) -> Cow<'_, str> {
    if char_len(text) <= max_chars {
        return Cow::Borrowed(text);
    }

    let sections = split_sections(text);
    let (priority, rest): (Vec<&str>, Vec<&str>) =
        sections.into_iter().partition(|section| PRIORITY_TOPICS.is_match(section));

    let mut result = String::new();
    let mut used = 0;

    for section in priority.into_iter().chain(rest) {
        let len = char_len(section);

        if used == 0 && len > max_chars {
            return Cow::Owned(truncate_chars(section, max_chars).to_string());
        }

        if used + len > max_chars {
            break;
        }

        result.push_str(section);
        used += len;
    }

    Cow::Owned(result)
}

/// Split markdown into heading-delimited sections.
///
/// Text before the first heading is dropped when any heading exists; with no
/// heading at all, the whole text is a single section.
fn split_sections(text: &str) -> Vec<&str> {
    let mut starts = Vec::new();
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        if SECTION_HEADING.is_match(line) {
            starts.push(offset);
        }
        offset += line.len();
    }

    if starts.is_empty() {
        return vec![text];
    }

    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            &text[start..end]
        })
        .collect()
}

fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}
