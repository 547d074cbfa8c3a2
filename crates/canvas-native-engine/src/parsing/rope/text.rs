use std::borrow::Cow;

use xi_rope::{Rope, rope::Utf16CodeUnitsMetric};

use super::range::TextRange;

/// Number of UTF-16 code units in `s`.
pub fn utf16_len(s: &str) -> usize {
    s.encode_utf16().count()
}

/// Byte index in `s` of the UTF-16 offset `units`.
///
/// Offsets past the end clamp to `s.len()`. An offset in the middle of a
/// surrogate pair resolves to the start of that character.
pub fn utf16_to_byte(s: &str, units: usize) -> usize {
    let mut seen = 0;
    for (i, c) in s.char_indices() {
        if seen >= units {
            return i;
        }
        seen += c.len_utf16();
        if seen > units {
            return i;
        }
    }
    s.len()
}

/// The authoritative backing text, stored in a rope and addressed in UTF-16
/// code units.
#[derive(Clone, Default)]
pub struct BackingText {
    rope: Rope,
}

impl BackingText {
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from(text),
        }
    }

    /// Length in UTF-16 code units.
    pub fn len(&self) -> usize {
        self.rope.count::<Utf16CodeUnitsMetric>(self.rope.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rope.is_empty()
    }

    fn byte_offset(&self, units: usize) -> usize {
        self.rope.count_base_units::<Utf16CodeUnitsMetric>(units)
    }

    /// True when `units` does not split a surrogate pair.
    pub fn is_boundary(&self, units: usize) -> bool {
        if units > self.len() {
            return false;
        }
        let byte = self.byte_offset(units);
        self.rope.count::<Utf16CodeUnitsMetric>(byte) == units
    }

    pub fn slice(&self, range: TextRange) -> Cow<'_, str> {
        let start = self.byte_offset(range.location);
        let end = self.byte_offset(range.max());
        self.rope.slice_to_cow(start..end)
    }

    /// Replaces `range` with `text`.
    pub fn replace(&mut self, range: TextRange, text: &str) {
        let start = self.byte_offset(range.location);
        let end = self.byte_offset(range.max());
        self.rope.edit(start..end, text);
    }

    pub fn ends_with_newline(&self) -> bool {
        let len = self.rope.len();
        len > 0 && self.rope.slice_to_cow(len - 1..len) == "\n"
    }
}

impl std::fmt::Display for BackingText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.rope.slice_to_cow(..))
    }
}

impl std::fmt::Debug for BackingText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("BackingText").field(&self.to_string()).finish()
    }
}
