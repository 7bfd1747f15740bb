//! Plain-text export and link detection.
//!
//! Produces the shareable text form of a note; rasterized/image export
//! and OS share sheets live outside the core.

use crate::models::Note;
use regex::Regex;
use std::sync::OnceLock;

fn markup_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"<[^>]*>").unwrap())
}

fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"https?://\S+").unwrap())
}

/// Strip inline markup tags, leaving the text content
pub fn strip_markup(body: &str) -> String {
    markup_pattern().replace_all(body, "").into_owned()
}

/// Render a note as a shareable plain-text block
pub fn note_to_text(note: &Note) -> String {
    format!(
        "\u{1F4DD} {}\n\n{}\n\nCreated: {}",
        note.title,
        strip_markup(&note.body),
        note.date_key()
    )
}

/// Suggested file name for a text export
pub fn export_filename(note: &Note) -> String {
    let stem = note.title.trim();
    if stem.is_empty() {
        "note.txt".to_string()
    } else {
        format!("{}.txt", stem)
    }
}

/// First URL in a body, if any, for the link-preview pane
pub fn detect_link(text: &str) -> Option<String> {
    link_pattern().find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn note(title: &str, body: &str) -> Note {
        Note::with_id(
            "n1".to_string(),
            title.to_string(),
            body.to_string(),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap(),
        )
    }

    #[test]
    fn test_strip_markup() {
        assert_eq!(strip_markup("<b>bold</b> and <i>italic</i>"), "bold and italic");
        assert_eq!(strip_markup("no markup"), "no markup");
    }

    #[test]
    fn test_note_to_text() {
        let text = note_to_text(&note("Plans", "see <b>below</b>"));
        assert_eq!(text, "\u{1F4DD} Plans\n\nsee below\n\nCreated: 2024-03-10");
    }

    #[test]
    fn test_export_filename() {
        assert_eq!(export_filename(&note("Plans", "x")), "Plans.txt");
        assert_eq!(export_filename(&note("  ", "x")), "note.txt");
    }

    #[test]
    fn test_detect_link() {
        assert_eq!(
            detect_link("see https://example.com/page for details"),
            Some("https://example.com/page".to_string())
        );
        assert_eq!(detect_link("nothing here"), None);
    }
}
