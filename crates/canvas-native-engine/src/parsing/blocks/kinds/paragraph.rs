use crate::parsing::{
    blocks::types::{BlockKind, BlockNode},
    rope::LineRef,
};

use super::NativePrefix;

/// Paragraph block type.
///
/// Paragraphs have no delimiters - they are the fallback leaf block when no
/// other rule matches. A line that begins with a structural marker is never
/// a paragraph.
pub struct Paragraph;

impl Paragraph {
    pub fn parse(line: &LineRef) -> Option<BlockNode> {
        (!NativePrefix::starts(&line.text)).then(|| BlockNode::new(BlockKind::Paragraph, line))
    }
}

/// A line that begins with a structural marker no rule recognizes.
///
/// The whole line stays visible so the raw markup can be seen and fixed.
pub struct Malformed;

impl Malformed {
    pub fn parse(line: &LineRef) -> BlockNode {
        BlockNode::new(BlockKind::Malformed, line)
    }
}
