use serde::Serialize;

use crate::parsing::{blocks::BlockNode, rope::TextRange};

/// One change reported by an edit, in the order a consumer must apply it.
///
/// Every `index` refers to the block list as it stands after applying all
/// preceding events of the same patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChangeEvent {
    WillUpdate,
    InsertedBlock {
        block: BlockNode,
        index: usize,
    },
    RemovedBlock {
        block: BlockNode,
        index: usize,
    },
    /// Same kind of block, different content.
    ReplacedContent {
        before: BlockNode,
        index: usize,
        after: BlockNode,
    },
    /// Content unchanged; ranges shifted and/or position tag changed.
    UpdatedLocation {
        before: BlockNode,
        index: usize,
        after: BlockNode,
    },
    /// `range` of the previous presentation text now reads `replacement`.
    ReplacedPresentationText {
        range: TextRange,
        replacement: String,
    },
    DidUpdate,
}

impl ChangeEvent {
    /// Stable name used in logs and dumps.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            ChangeEvent::WillUpdate => "will_update",
            ChangeEvent::InsertedBlock { .. } => "inserted_block",
            ChangeEvent::RemovedBlock { .. } => "removed_block",
            ChangeEvent::ReplacedContent { .. } => "replaced_content",
            ChangeEvent::UpdatedLocation { .. } => "updated_location",
            ChangeEvent::ReplacedPresentationText { .. } => "replaced_presentation_text",
            ChangeEvent::DidUpdate => "did_update",
        }
    }
}

/// Result of applying an edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Patch {
    /// Ordered change events, bracketed by `WillUpdate` and `DidUpdate`.
    /// Empty when the edit changed nothing observable.
    pub events: Vec<ChangeEvent>,
    /// Controller version after the edit.
    pub version: u64,
}

impl Patch {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Applies the block-level events to `blocks`, in order.
    ///
    /// A consumer holding a copy of the previous block list ends up with the
    /// controller's new list.
    pub fn apply_to(&self, blocks: &mut Vec<BlockNode>) {
        for event in &self.events {
            match event {
                ChangeEvent::InsertedBlock { block, index } => blocks.insert(*index, block.clone()),
                ChangeEvent::RemovedBlock { index, .. } => {
                    blocks.remove(*index);
                }
                ChangeEvent::ReplacedContent { index, after, .. }
                | ChangeEvent::UpdatedLocation { index, after, .. } => {
                    blocks[*index] = after.clone();
                }
                ChangeEvent::WillUpdate
                | ChangeEvent::ReplacedPresentationText { .. }
                | ChangeEvent::DidUpdate => {}
            }
        }
    }

    /// Applies the presentation text event, if any, to `presentation`.
    pub fn apply_presentation(&self, presentation: &mut String) {
        for event in &self.events {
            if let ChangeEvent::ReplacedPresentationText { range, replacement } = event {
                let start = crate::parsing::rope::utf16_to_byte(presentation, range.location);
                let end = crate::parsing::rope::utf16_to_byte(presentation, range.max());
                presentation.replace_range(start..end, replacement);
            }
        }
    }
}
