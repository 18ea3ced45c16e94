//! Completion of `![[...]]` references while typing.
//!
//! [`pending_reference`] finds an unfinished reference right before the
//! cursor, [`suggest`] filters the document listing by it, and
//! [`insert_suggestion`] writes the chosen name into the text.

use crate::source::DOCUMENT_EXT;
use once_cell::sync::Lazy;
use regex::Regex;

static PENDING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[\[([^\]]*)$").expect("pending reference pattern is valid"));

/// The partial name typed after an unclosed `![[`, if the text ends inside one.
pub fn pending_reference(text_before_cursor: &str) -> Option<&str> {
    PENDING_RE
        .captures(text_before_cursor)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Document names containing `partial`, ignoring case, without their `.md`.
pub fn suggest<S: AsRef<str>>(files: &[S], partial: &str) -> Vec<String> {
    let needle = partial.to_lowercase();
    files
        .iter()
        .map(AsRef::as_ref)
        .filter(|file| file.to_lowercase().contains(&needle))
        .map(|file| file.strip_suffix(DOCUMENT_EXT).unwrap_or(file).to_string())
        .collect()
}

/// Inserts `suggestion` into the reference open before `cursor`.
///
/// When a `]]` follows the cursor, everything between the `[[` and it is
/// replaced; otherwise the suggestion is inserted and closed. Returns the new
/// text and the cursor position after the closing brackets, or `None` when no
/// `[[` precedes the cursor.
pub fn insert_suggestion(text: &str, cursor: usize, suggestion: &str) -> Option<(String, usize)> {
    let cursor = cursor.min(text.len());
    if !text.is_char_boundary(cursor) {
        return None;
    }
    let (before, after) = text.split_at(cursor);
    let start = before.rfind("[[")? + 2;

    let new_text = match after.find("]]") {
        Some(end) => format!("{}{}{}", &before[..start], suggestion, &after[end..]),
        None => format!("{}{}]]{}", &before[..start], suggestion, after),
    };
    Some((new_text, start + suggestion.len() + 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_reference() {
        assert_eq!(pending_reference("see ![[no"), Some("no"));
        assert_eq!(pending_reference("see ![["), Some(""));
        assert_eq!(pending_reference("see ![[notes]] and"), None);
        assert_eq!(pending_reference("plain text"), None);
    }

    #[test]
    fn test_suggest_filters_case_insensitively() {
        let files = ["Notes.md", "plan.md", "meeting-notes.md"];
        assert_eq!(suggest(&files, "NOTES"), vec!["Notes", "meeting-notes"]);
        assert_eq!(suggest(&files, ""), vec!["Notes", "plan", "meeting-notes"]);
        assert!(suggest(&files, "zzz").is_empty());
    }

    #[test]
    fn test_insert_closes_open_reference() {
        let text = "see ![[no";
        let (new_text, cursor) = insert_suggestion(text, text.len(), "notes").unwrap();
        assert_eq!(new_text, "see ![[notes]]");
        assert_eq!(cursor, new_text.len());
    }

    #[test]
    fn test_insert_replaces_existing_reference() {
        let text = "see ![[no]] then";
        let (new_text, cursor) = insert_suggestion(text, 9, "notes#Intro").unwrap();
        assert_eq!(new_text, "see ![[notes#Intro]] then");
        assert_eq!(&new_text[..cursor], "see ![[notes#Intro]]");
    }

    #[test]
    fn test_insert_without_open_brackets() {
        assert_eq!(insert_suggestion("plain", 5, "notes"), None);
    }
}
