use crate::parsing::{
    blocks::types::{BlockKind, BlockNode},
    rope::LineRef,
};

use super::NativePrefix;

/// `⧙ordered-list-<n>⧘<number>. Text`.
pub struct OrderedListItem;

impl OrderedListItem {
    pub const TAG: &'static str = "ordered-list";
    pub const SEPARATOR: &'static str = ". ";

    pub fn parse(line: &LineRef) -> Option<BlockNode> {
        let tag = NativePrefix::split(&line.text)?;
        let (indentation, digits_at, digits) = tag.indentation(Self::TAG)?;
        let number_len = tag.rest.bytes().take_while(u8::is_ascii_digit).count();
        if number_len == 0 || !tag.rest[number_len..].starts_with(Self::SEPARATOR) {
            return None;
        }
        let number = tag.rest[..number_len].parse().ok()?;
        let token = number_len + Self::SEPARATOR.len();
        Some(
            BlockNode::new(
                BlockKind::OrderedListItem {
                    indentation,
                    number,
                },
                line,
            )
            .hide_prefix(tag.marker_len + token)
            .with_prefix_token(tag.marker_len, token)
            .with_indentation_range(digits_at, digits),
        )
    }

    pub fn markup(indentation: u8, number: u64, text: &str) -> String {
        format!(
            "{}{number}{}{text}",
            NativePrefix::markup(&format!("{}-{indentation}", Self::TAG)),
            Self::SEPARATOR
        )
    }
}
