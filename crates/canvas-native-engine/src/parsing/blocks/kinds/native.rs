use crate::parsing::rope::utf16_len;

/// The structural marker that opens native-prefixed lines.
///
/// A marker is `⧙<tag>⧘`; the tag names the block kind and may carry an
/// argument such as an indentation level or a code language.
pub struct NativePrefix;

impl NativePrefix {
    pub const LEADING: char = '⧙';
    pub const TRAILING: char = '⧘';

    /// Splits a line that begins with a marker into its tag and remainder.
    ///
    /// Returns `None` when the line does not begin with [`Self::LEADING`] or
    /// the marker is never closed.
    pub fn split(line: &str) -> Option<NativeTag<'_>> {
        let inner = line.strip_prefix(Self::LEADING)?;
        let end = inner.find(Self::TRAILING)?;
        let name = &inner[..end];
        let rest = &inner[end + Self::TRAILING.len_utf8()..];
        Some(NativeTag {
            name,
            marker_len: 2 + utf16_len(name),
            rest,
        })
    }

    /// Source text of a marker with the given tag.
    pub fn markup(tag: &str) -> String {
        format!("{}{tag}{}", Self::LEADING, Self::TRAILING)
    }

    /// Whether `line` begins with the lead delimiter.
    pub fn starts(line: &str) -> bool {
        line.starts_with(Self::LEADING)
    }
}

/// A parsed structural marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeTag<'a> {
    /// Text between the delimiters.
    pub name: &'a str,
    /// UTF-16 length of the whole marker, delimiters included.
    pub marker_len: usize,
    /// Line text after the marker.
    pub rest: &'a str,
}

impl NativeTag<'_> {
    /// Reads a `<kind>-<n>` tag such as `unordered-list-2`.
    ///
    /// Returns the indentation level and the UTF-16 offset of its digits
    /// within the line, plus the number of digits.
    pub fn indentation(&self, kind: &str) -> Option<(u8, usize, usize)> {
        let digits = self.name.strip_prefix(kind)?.strip_prefix('-')?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let level = digits.parse().ok()?;
        let offset = 1 + utf16_len(kind) + 1;
        Some((level, offset, digits.len()))
    }
}
