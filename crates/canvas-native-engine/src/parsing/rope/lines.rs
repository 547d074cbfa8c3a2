use super::{
    range::TextRange,
    text::{BackingText, utf16_len},
};

/// A single line of backing text with its UTF-16 ranges.
#[derive(Debug, Clone)]
pub struct LineRef {
    /// The line without its terminator.
    pub range: TextRange,
    /// The line including its `\n` terminator when present.
    pub enclosing: TextRange,
    /// The line text without its terminator.
    pub text: String,
}

impl LineRef {
    /// Range of the `\n` terminator, if the line has one.
    pub fn new_line_range(&self) -> Option<TextRange> {
        (self.enclosing.length > self.range.length)
            .then(|| TextRange::new(self.range.max(), 1))
    }
}

/// Lines of `text` inside `window`, with absolute ranges.
///
/// `window` must start at a line start and end at a line end (just after a
/// `\n`, or at the end of the text). A text that ends with `\n` has a final
/// empty line; an empty text has no lines.
///
/// A window ending just after the last `\n` of the text may or may not hold
/// the final empty line, so `through_end` says whether the window runs
/// through the last line. It is only honored when the window reaches the
/// end of the text.
pub fn lines_in_window(text: &BackingText, window: TextRange, through_end: bool) -> Vec<LineRef> {
    if text.is_empty() {
        return vec![];
    }

    let at_end = through_end && window.max() == text.len();
    let source = text.slice(window);
    let mut pieces: Vec<&str> = source.split('\n').collect();
    if !at_end && pieces.last().is_some_and(|p| p.is_empty()) {
        pieces.pop();
    }

    let count = pieces.len();
    let mut offset = window.location;
    pieces
        .into_iter()
        .enumerate()
        .map(|(i, piece)| {
            let len = utf16_len(piece);
            let terminated = i + 1 < count || !at_end && source.ends_with('\n');
            let line = LineRef {
                range: TextRange::new(offset, len),
                enclosing: TextRange::new(offset, len + usize::from(terminated)),
                text: piece.to_string(),
            };
            offset = line.enclosing.max();
            line
        })
        .collect()
}

/// Every line of `text`.
pub fn lines_with_ranges(text: &BackingText) -> Vec<LineRef> {
    lines_in_window(text, TextRange::new(0, text.len()), true)
}
