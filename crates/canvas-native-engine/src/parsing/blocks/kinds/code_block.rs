use crate::parsing::{
    blocks::types::{BlockKind, BlockNode},
    rope::LineRef,
};

use super::NativePrefix;

/// One line of code: `⧙code⧘source` or `⧙code-<language>⧘source`.
///
/// Code is raw: no inline parsing happens inside it.
pub struct CodeBlock;

impl CodeBlock {
    pub const TAG: &'static str = "code";

    pub fn parse(line: &LineRef) -> Option<BlockNode> {
        let tag = NativePrefix::split(&line.text)?;
        let language = match tag.name.strip_prefix(Self::TAG)? {
            "" => None,
            rest => Some(rest.strip_prefix('-').filter(|l| !l.is_empty())?.to_string()),
        };
        Some(BlockNode::new(BlockKind::CodeBlock { language }, line).hide_prefix(tag.marker_len))
    }

    pub fn markup(language: Option<&str>, source: &str) -> String {
        let tag = match language {
            Some(language) => format!("{}-{language}", Self::TAG),
            None => Self::TAG.to_string(),
        };
        format!("{}{source}", NativePrefix::markup(&tag))
    }
}
