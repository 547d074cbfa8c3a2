use crate::parsing::{
    blocks::types::{BlockKind, BlockNode},
    rope::LineRef,
};

use super::NativePrefix;

/// `⧙unordered-list-<n>⧘- Text`.
pub struct UnorderedListItem;

impl UnorderedListItem {
    pub const TAG: &'static str = "unordered-list";
    pub const BULLET: &'static str = "- ";

    pub fn parse(line: &LineRef) -> Option<BlockNode> {
        let tag = NativePrefix::split(&line.text)?;
        let (indentation, digits_at, digits) = tag.indentation(Self::TAG)?;
        if !tag.rest.starts_with(Self::BULLET) {
            return None;
        }
        let token = Self::BULLET.len();
        Some(
            BlockNode::new(BlockKind::UnorderedListItem { indentation }, line)
                .hide_prefix(tag.marker_len + token)
                .with_prefix_token(tag.marker_len, token)
                .with_indentation_range(digits_at, digits),
        )
    }

    pub fn markup(indentation: u8, text: &str) -> String {
        format!(
            "{}{}{text}",
            NativePrefix::markup(&format!("{}-{indentation}", Self::TAG)),
            Self::BULLET
        )
    }
}
