//! Data-shaping helpers for list rows and chips.
//!
//! The rendering itself lives outside this crate; these are the pure pieces
//! the views call so that no formatting rule is duplicated per platform.

use crate::model::note::Note;
use once_cell::sync::Lazy;
use regex::Regex;

const PREVIEW_MAX_CHARS: usize = 100;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));
static COLOR_HEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid color regex"));

/// Returns the title to render, falling back to "Untitled" for empty titles.
pub fn display_title(note: &Note) -> &str {
    if note.title.is_empty() {
        "Untitled"
    } else {
        &note.title
    }
}

/// Derives the list-row preview from a note body: whitespace collapsed to
/// single spaces, trimmed, first 100 chars retained. Empty bodies yield
/// `None` so rows can skip the preview line entirely.
pub fn preview_text(body: &str) -> Option<String> {
    let normalized = WHITESPACE_RE.replace_all(body, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.chars().take(PREVIEW_MAX_CHARS).collect())
    }
}

/// Returns whether `value` is a well-formed `#RRGGBB` color tag.
pub fn is_valid_color_hex(value: &str) -> bool {
    COLOR_HEX_RE.is_match(value)
}

/// Returns the first `limit` tags for chip rendering.
pub fn leading_tags(note: &Note, limit: usize) -> &[String] {
    &note.tags[..note.tags.len().min(limit)]
}

#[cfg(test)]
mod tests {
    use super::{display_title, is_valid_color_hex, leading_tags, preview_text};
    use crate::model::note::Note;

    #[test]
    fn empty_title_renders_as_untitled() {
        let note = Note::new("", "body");
        assert_eq!(display_title(&note), "Untitled");
        let titled = Note::new("Grocery List", "");
        assert_eq!(display_title(&titled), "Grocery List");
    }

    #[test]
    fn preview_collapses_whitespace_and_limits_length() {
        let preview = preview_text("  line one\n\nline\ttwo  ").unwrap();
        assert_eq!(preview, "line one line two");

        let long = "x".repeat(500);
        assert_eq!(preview_text(&long).unwrap().chars().count(), 100);

        assert_eq!(preview_text("   \n "), None);
    }

    #[test]
    fn color_hex_requires_full_rrggbb_form() {
        assert!(is_valid_color_hex("#1Fa0b9"));
        assert!(!is_valid_color_hex("1Fa0b9"));
        assert!(!is_valid_color_hex("#fff"));
        assert!(!is_valid_color_hex("#12345G"));
    }

    #[test]
    fn leading_tags_caps_at_limit() {
        let mut note = Note::new("", "");
        note.tags = vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()];
        assert_eq!(leading_tags(&note, 3).len(), 3);
        assert_eq!(leading_tags(&note, 9).len(), 4);
    }
}
