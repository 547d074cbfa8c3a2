use crate::parsing::{
    blocks::types::{BlockKind, BlockNode, ChecklistState},
    rope::LineRef,
};

use super::NativePrefix;

/// `⧙checklist-<n>⧘- [ ] Text` or `⧙checklist-<n>⧘- [x] Text`.
pub struct ChecklistItem;

impl ChecklistItem {
    pub const TAG: &'static str = "checklist";
    pub const UNCHECKED: &'static str = "- [ ] ";
    pub const CHECKED: &'static str = "- [x] ";
    pub const CHECKED_UPPER: &'static str = "- [X] ";

    pub fn parse(line: &LineRef) -> Option<BlockNode> {
        let tag = NativePrefix::split(&line.text)?;
        let (indentation, digits_at, digits) = tag.indentation(Self::TAG)?;
        let state = if tag.rest.starts_with(Self::UNCHECKED) {
            ChecklistState::Unchecked
        } else if tag.rest.starts_with(Self::CHECKED) || tag.rest.starts_with(Self::CHECKED_UPPER) {
            ChecklistState::Checked
        } else {
            return None;
        };
        let token = Self::UNCHECKED.len();
        Some(
            BlockNode::new(BlockKind::ChecklistItem { indentation, state }, line)
                .hide_prefix(tag.marker_len + token)
                .with_prefix_token(tag.marker_len, token)
                .with_indentation_range(digits_at, digits),
        )
    }

    pub fn markup(indentation: u8, state: ChecklistState, text: &str) -> String {
        let token = match state {
            ChecklistState::Unchecked => Self::UNCHECKED,
            ChecklistState::Checked => Self::CHECKED,
        };
        format!(
            "{}{token}{text}",
            NativePrefix::markup(&format!("{}-{indentation}", Self::TAG))
        )
    }
}
