use crate::parsing::{
    blocks::types::{BlockKind, BlockNode},
    rope::{LineRef, TextRange},
};

/// Markdown heading, `#` to `######` followed by a space.
///
/// The `#` token stays visible; only the text after it is inline-parsed.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: usize = 6;

    pub fn parse(line: &LineRef) -> Option<BlockNode> {
        let level = line.text.chars().take_while(|&c| c == Self::MARKER).count();
        if level == 0 || level > Self::MAX_LEVEL || line.text[level..].chars().next() != Some(' ') {
            return None;
        }
        let token = level + 1;
        let mut block = BlockNode::new(
            BlockKind::Heading {
                level: level as u8,
            },
            line,
        )
        .with_prefix_token(0, token);
        block.text_range = TextRange::from_bounds(block.range.location + token, block.range.max());
        Some(block)
    }
}
