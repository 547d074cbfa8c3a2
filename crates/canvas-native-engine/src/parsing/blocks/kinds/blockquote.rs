use crate::parsing::{
    blocks::types::{BlockKind, BlockNode},
    rope::LineRef,
};

use super::NativePrefix;

/// Blockquote block type with owned delimiter constants.
///
/// Backing form is `⧙blockquote⧘> Text`; the `> ` token is hidden along
/// with the marker.
pub struct Blockquote;

impl Blockquote {
    pub const TAG: &'static str = "blockquote";
    /// The quote token following the marker.
    pub const PREFIX: &'static str = "> ";

    pub fn parse(line: &LineRef) -> Option<BlockNode> {
        let tag = NativePrefix::split(&line.text)?;
        if tag.name != Self::TAG || !tag.rest.starts_with(Self::PREFIX) {
            return None;
        }
        let token = Self::PREFIX.len();
        Some(
            BlockNode::new(BlockKind::Blockquote, line)
                .hide_prefix(tag.marker_len + token)
                .with_prefix_token(tag.marker_len, token),
        )
    }

    pub fn markup(text: &str) -> String {
        format!("{}{}{text}", NativePrefix::markup(Self::TAG), Self::PREFIX)
    }
}
