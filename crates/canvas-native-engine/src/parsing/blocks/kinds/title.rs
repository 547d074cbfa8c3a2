use crate::parsing::{
    blocks::types::{BlockKind, BlockNode},
    rope::LineRef,
};

use super::NativePrefix;

/// The document title: `⧙doc-heading⧘Text`.
pub struct Title;

impl Title {
    pub const TAG: &'static str = "doc-heading";

    pub fn parse(line: &LineRef) -> Option<BlockNode> {
        let tag = NativePrefix::split(&line.text)?;
        (tag.name == Self::TAG).then(|| BlockNode::new(BlockKind::Title, line).hide_prefix(tag.marker_len))
    }

    pub fn markup(text: &str) -> String {
        format!("{}{text}", NativePrefix::markup(Self::TAG))
    }
}
