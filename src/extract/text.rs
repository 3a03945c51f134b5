//! Text cleanup shared by every extraction tier and by record overrides

use regex::Regex;
use std::sync::OnceLock;

/// Maximum characters kept for a highlight or usage item before truncation
pub const MAX_ITEM_CHARS: usize = 80;

/// Maximum characters kept for the description before truncation
pub const MAX_DESCRIPTION_CHARS: usize = 200;

/// Marker appended to text cut at a character bound
pub const TRUNCATION_MARKER: &str = "...";

/// Collapses whitespace runs to a single space and trims the ends
pub fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Cleans text and returns None when nothing is left
pub fn non_empty(text: &str) -> Option<String> {
    let cleaned = clean_text(text);
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Cuts `text` to `max_chars` characters, appending the truncation marker
///
/// Text that was already cut to this bound is returned unchanged.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count <= max_chars
        || (text.ends_with(TRUNCATION_MARKER) && count <= max_chars + TRUNCATION_MARKER.len())
    {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max_chars).collect();
    cut.truncate(cut.trim_end().len());
    cut.push_str(TRUNCATION_MARKER);
    cut
}

/// Decorative leading glyphs that storefronts put in front of list items
fn is_leading_decoration(c: char) -> bool {
    c.is_whitespace()
        || matches!(
            c,
            '•' | '·' | '✓' | '✔' | '✅' | '★' | '☆' | '⭐' | '✨' | '💊' | '🌿' | '🔴' | '🟢'
                | '🟡' | '👉' | '▪' | '▶' | '►' | '○' | '●' | '■' | '\u{fe0f}' | '\u{200d}'
        )
}

/// A dash bullet or a list number (`1.`, `2)`, `3、`) in front of the text
///
/// Digits that start a word, such as `2 softgels` or `5-HTP`, are content.
fn list_marker() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^(?:[-*–—]\s+|\d{1,2}[.)]\s+|\d{1,2}、\s*)").expect("valid list marker pattern")
    })
}

/// Normalizes one list item for display
///
/// Only the first line is kept, leading bullets, emoji and list numbering
/// are stripped, whitespace is collapsed and the result is bounded to
/// [`MAX_ITEM_CHARS`].
pub fn clean_list_item(raw: &str) -> String {
    let first_line = raw
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .unwrap_or("");
    let stripped = first_line.trim_start_matches(is_leading_decoration);
    let stripped = list_marker()
        .find(stripped)
        .map_or(stripped, |marker| &stripped[marker.end()..]);
    let stripped = stripped.trim_start_matches(is_leading_decoration);
    truncate_chars(&clean_text(stripped), MAX_ITEM_CHARS)
}
