use crate::parsing::{
    blocks::types::{Attachment, BlockKind, BlockNode},
    rope::LineRef,
};

use super::NativePrefix;

/// An attachment line: `⧙image-{"url":...}⧘`.
///
/// The whole line is a hidden marker; the block shows nothing and its
/// visible range is empty at the end of the line.
pub struct Image;

impl Image {
    pub const TAG: &'static str = "image";

    pub fn parse(line: &LineRef) -> Option<BlockNode> {
        let tag = NativePrefix::split(&line.text)?;
        if !tag.rest.is_empty() {
            return None;
        }
        let attachment = match tag.name.strip_prefix(Self::TAG)? {
            "" => Attachment::default(),
            rest => {
                let json = rest.strip_prefix('-')?;
                match serde_json::from_str(json) {
                    Ok(attachment) => attachment,
                    Err(e) => {
                        log::debug!("image metadata at {:?} is not valid: {e}", line.range);
                        return None;
                    }
                }
            }
        };
        Some(BlockNode::new(BlockKind::Image { attachment }, line).hide_prefix(tag.marker_len))
    }

    /// Marker text for an attachment. Serializing plain strings and integers
    /// cannot fail.
    pub fn markup(attachment: &Attachment) -> String {
        let json = serde_json::to_string(attachment).unwrap_or_default();
        NativePrefix::markup(&format!("{}-{json}", Self::TAG))
    }
}
