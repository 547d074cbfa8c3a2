use super::{range::TextRange, text::BackingText};

/// Extracts text for a range, truncating to `max` characters with a "..."
/// suffix if needed.
///
/// Used for human-readable dumps of parsed blocks.
pub fn preview(text: &BackingText, range: TextRange, max: usize) -> String {
    let s = text.slice(range);
    if s.chars().count() <= max {
        return s.into_owned();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push_str("...");
    out
}
