use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::parsing::{
    inline::{InlineMarkerPair, SpanTree},
    rope::{LineRef, TextRange},
};

/// Where a positionable block sits in its run of same-type siblings.
///
/// `Middle` and `Bottom` carry the length of the whole run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "run_length", rename_all = "snake_case")]
pub enum Position {
    Single,
    Top,
    Middle(usize),
    Bottom(usize),
}

impl Position {
    /// Position of the `index`-th block in a run of `run_length` blocks.
    #[must_use]
    pub fn in_run(index: usize, run_length: usize) -> Self {
        debug_assert!(index < run_length);
        match (index, run_length) {
            (_, 1) => Position::Single,
            (0, _) => Position::Top,
            (i, n) if i + 1 == n => Position::Bottom(n),
            (_, n) => Position::Middle(n),
        }
    }
}

/// Checked state of a checklist item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistState {
    Unchecked,
    Checked,
}

/// Metadata carried in an image marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Attachment {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
}

/// The kind of a block, with any facts specific to that kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockKind {
    Title,
    Heading { level: u8 },
    Paragraph,
    CodeBlock { language: Option<String> },
    Blockquote,
    ChecklistItem { indentation: u8, state: ChecklistState },
    OrderedListItem { indentation: u8, number: u64 },
    UnorderedListItem { indentation: u8 },
    Image { attachment: Attachment },
    /// A line carrying a structural marker that no rule recognizes. Kept
    /// verbatim and fully visible.
    Malformed,
}

impl BlockKind {
    /// Stable name used in dumps.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            BlockKind::Title => "title",
            BlockKind::Heading { .. } => "heading",
            BlockKind::Paragraph => "paragraph",
            BlockKind::CodeBlock { .. } => "code_block",
            BlockKind::Blockquote => "blockquote",
            BlockKind::ChecklistItem { .. } => "checklist_item",
            BlockKind::OrderedListItem { .. } => "ordered_list_item",
            BlockKind::UnorderedListItem { .. } => "unordered_list_item",
            BlockKind::Image { .. } => "image",
            BlockKind::Malformed => "malformed",
        }
    }

    /// Whether two kinds are the same variant, ignoring their fields.
    #[must_use]
    pub fn same_variant(&self, other: &BlockKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Blocks that form runs tagged with a [`Position`].
    #[must_use]
    pub fn is_positionable(&self) -> bool {
        matches!(
            self,
            BlockKind::Blockquote
                | BlockKind::CodeBlock { .. }
                | BlockKind::ChecklistItem { .. }
                | BlockKind::OrderedListItem { .. }
                | BlockKind::UnorderedListItem { .. }
        )
    }

    /// Indentation level of list variants.
    #[must_use]
    pub fn indentation(&self) -> Option<u8> {
        match self {
            BlockKind::ChecklistItem { indentation, .. }
            | BlockKind::OrderedListItem { indentation, .. }
            | BlockKind::UnorderedListItem { indentation } => Some(*indentation),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_listable(&self) -> bool {
        self.indentation().is_some()
    }

    /// Blocks whose line begins with a hidden structural marker.
    #[must_use]
    pub fn is_native_prefixable(&self) -> bool {
        !matches!(
            self,
            BlockKind::Paragraph | BlockKind::Heading { .. } | BlockKind::Malformed
        )
    }

    /// Blocks whose text range holds inline spans.
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            BlockKind::Title
                | BlockKind::Heading { .. }
                | BlockKind::Paragraph
                | BlockKind::Blockquote
                | BlockKind::ChecklistItem { .. }
                | BlockKind::OrderedListItem { .. }
                | BlockKind::UnorderedListItem { .. }
        )
    }

    /// Blocks that show no text and own their whole line as a marker.
    #[must_use]
    pub fn is_attachable(&self) -> bool {
        matches!(self, BlockKind::Image { .. })
    }
}

/// A parsed block: one line of backing text.
///
/// All ranges are absolute UTF-16 ranges into the backing text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BlockNode {
    pub kind: BlockKind,
    /// The line without its terminator.
    pub range: TextRange,
    /// The line including its `\n` terminator when present.
    pub enclosing_range: TextRange,
    /// Hidden structural marker, including any list or quote token after it.
    pub native_prefix_range: Option<TextRange>,
    /// Markdown-like token (`# `, `- `, `1. `, `- [ ] `, `> `). Hidden when
    /// it lies inside the native prefix, visible for headings.
    pub prefix_range: Option<TextRange>,
    /// The indentation digits inside a list marker.
    pub indentation_range: Option<TextRange>,
    /// Shown in presentation text.
    pub visible_range: TextRange,
    /// Inline-parsed content. Excludes a heading's `# `.
    pub text_range: TextRange,
    pub position: Option<Position>,
    pub spans: SpanTree,
    pub inline_marker_pairs: Vec<InlineMarkerPair>,
}

impl BlockNode {
    /// A block covering `line` with nothing hidden.
    pub(crate) fn new(kind: BlockKind, line: &LineRef) -> Self {
        let position = kind.is_positionable().then_some(Position::Single);
        Self {
            kind,
            range: line.range,
            enclosing_range: line.enclosing,
            native_prefix_range: None,
            prefix_range: None,
            indentation_range: None,
            visible_range: line.range,
            text_range: line.range,
            position,
            spans: SpanTree::new(),
            inline_marker_pairs: Vec::new(),
        }
    }

    /// Hides the first `len` units of the line.
    pub(crate) fn hide_prefix(mut self, len: usize) -> Self {
        let len = len.min(self.range.length);
        let hidden = TextRange::new(self.range.location, len);
        let rest = TextRange::from_bounds(hidden.max(), self.range.max());
        self.native_prefix_range = Some(hidden);
        self.visible_range = rest;
        self.text_range = rest;
        self
    }

    /// Records a prefix token at `offset` units into the line.
    pub(crate) fn with_prefix_token(mut self, offset: usize, len: usize) -> Self {
        self.prefix_range = Some(TextRange::new(self.range.location + offset, len));
        self
    }

    /// Records indentation digits at `offset` units into the line.
    pub(crate) fn with_indentation_range(mut self, offset: usize, len: usize) -> Self {
        self.indentation_range = Some(TextRange::new(self.range.location + offset, len));
        self
    }

    /// Range of the `\n` terminator, if the line has one.
    #[must_use]
    pub fn new_line_range(&self) -> Option<TextRange> {
        (self.enclosing_range.length > self.range.length)
            .then(|| TextRange::new(self.range.max(), 1))
    }

    /// Every hidden range of this block in text order: the native prefix,
    /// then inline markers.
    pub fn hidden_ranges(&self) -> impl Iterator<Item = TextRange> + '_ {
        self.native_prefix_range
            .into_iter()
            .chain(self.spans.marker_ranges())
    }

    /// Total length of hidden inline markers.
    #[must_use]
    pub fn marker_length(&self) -> usize {
        self.spans.marker_ranges().map(|r| r.length).sum()
    }

    /// Length of this block's text in presentation space.
    #[must_use]
    pub fn presentation_length(&self) -> usize {
        self.visible_range.length - self.marker_length()
    }

    /// Shifts every owned range, spans and marker pairs included.
    pub fn offset(&mut self, delta: isize) {
        self.range.offset(delta);
        self.enclosing_range.offset(delta);
        self.visible_range.offset(delta);
        self.text_range.offset(delta);
        for r in [
            &mut self.native_prefix_range,
            &mut self.prefix_range,
            &mut self.indentation_range,
        ]
        .into_iter()
        .flatten()
        {
            r.offset(delta);
        }
        self.spans.offset(delta);
        for pair in &mut self.inline_marker_pairs {
            pair.offset(delta);
        }
    }

    /// Whether `other` is this block moved to another location, possibly
    /// with a different position tag, and otherwise unchanged.
    #[must_use]
    pub fn same_content(&self, other: &BlockNode) -> bool {
        let delta = other.range.location as isize - self.range.location as isize;
        let mut moved = self.clone();
        moved.offset(delta);
        moved.position = other.position;
        moved == *other
    }

    /// Debug representation with nested spans.
    pub fn dictionary(&self) -> Value {
        let mut value = json!({
            "type": self.kind.name(),
            "range": self.range,
            "enclosing_range": self.enclosing_range,
            "visible_range": self.visible_range,
        });
        if let Some(r) = self.native_prefix_range {
            value["native_prefix_range"] = json!(r);
        }
        if let Some(r) = self.prefix_range {
            value["prefix_range"] = json!(r);
        }
        if let Some(r) = self.indentation_range {
            value["indentation_range"] = json!(r);
        }
        if let Some(position) = self.position {
            value["position"] = json!(position);
        }
        match &self.kind {
            BlockKind::Heading { level } => value["level"] = json!(level),
            BlockKind::CodeBlock {
                language: Some(language),
            } => value["language"] = json!(language),
            BlockKind::ChecklistItem { indentation, state } => {
                value["indentation"] = json!(indentation);
                value["state"] = json!(state);
            }
            BlockKind::OrderedListItem {
                indentation,
                number,
            } => {
                value["indentation"] = json!(indentation);
                value["number"] = json!(number);
            }
            BlockKind::UnorderedListItem { indentation } => {
                value["indentation"] = json!(indentation);
            }
            BlockKind::Image { attachment } => value["attachment"] = json!(attachment),
            _ => {}
        }
        if self.kind.is_container() {
            value["subnodes"] = self.spans.dictionary();
        }
        if !self.inline_marker_pairs.is_empty() {
            value["inline_marker_pairs"] = json!(self.inline_marker_pairs);
        }
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn line(location: usize, length: usize, terminated: bool) -> LineRef {
        LineRef {
            range: TextRange::new(location, length),
            enclosing: TextRange::new(location, length + usize::from(terminated)),
            text: "x".repeat(length),
        }
    }

    #[rstest]
    #[case(0, 1, Position::Single)]
    #[case(0, 2, Position::Top)]
    #[case(1, 2, Position::Bottom(2))]
    #[case(1, 4, Position::Middle(4))]
    #[case(3, 4, Position::Bottom(4))]
    fn position_in_run(#[case] index: usize, #[case] n: usize, #[case] expected: Position) {
        assert_eq!(Position::in_run(index, n), expected);
    }

    #[test]
    fn hide_prefix_splits_line() {
        let block = BlockNode::new(BlockKind::Title, &line(10, 18, true)).hide_prefix(13);
        assert_eq!(block.native_prefix_range, Some(TextRange::new(10, 13)));
        assert_eq!(block.visible_range, TextRange::new(23, 5));
        assert_eq!(block.new_line_range(), Some(TextRange::new(28, 1)));
    }

    #[test]
    fn positionable_blocks_start_single() {
        let block = BlockNode::new(BlockKind::Blockquote, &line(0, 3, false));
        assert_eq!(block.position, Some(Position::Single));
        let block = BlockNode::new(BlockKind::Paragraph, &line(0, 3, false));
        assert_eq!(block.position, None);
    }

    #[test]
    fn offset_moves_every_range() {
        let mut block = BlockNode::new(
            BlockKind::UnorderedListItem { indentation: 0 },
            &line(0, 22, true),
        )
        .hide_prefix(20)
        .with_prefix_token(18, 2)
        .with_indentation_range(16, 1);
        block.offset(5);
        assert_eq!(block.range, TextRange::new(5, 22));
        assert_eq!(block.enclosing_range, TextRange::new(5, 23));
        assert_eq!(block.native_prefix_range, Some(TextRange::new(5, 20)));
        assert_eq!(block.prefix_range, Some(TextRange::new(23, 2)));
        assert_eq!(block.indentation_range, Some(TextRange::new(21, 1)));
        assert_eq!(block.visible_range, TextRange::new(25, 2));
    }

    #[test]
    fn same_content_ignores_location_and_position() {
        let a = BlockNode::new(BlockKind::Blockquote, &line(0, 3, true));
        let mut b = a.clone();
        b.offset(7);
        b.position = Some(Position::Top);
        assert!(a.same_content(&b));

        let c = BlockNode::new(BlockKind::Blockquote, &line(7, 4, true));
        assert!(!a.same_content(&c));
    }

    #[test]
    fn capabilities() {
        let list = BlockKind::OrderedListItem {
            indentation: 2,
            number: 1,
        };
        assert!(list.is_positionable());
        assert!(list.is_listable());
        assert_eq!(list.indentation(), Some(2));
        assert!(list.is_native_prefixable());
        assert!(!BlockKind::Paragraph.is_native_prefixable());
        assert!(BlockKind::Heading { level: 1 }.is_container());
        assert!(!BlockKind::CodeBlock { language: None }.is_container());
        assert!(BlockKind::Image {
            attachment: Attachment::default()
        }
        .is_attachable());
    }

    #[test]
    fn dictionary_names_kind() {
        let block = BlockNode::new(BlockKind::Heading { level: 2 }, &line(0, 5, false));
        let value = block.dictionary();
        assert_eq!(value["type"], "heading");
        assert_eq!(value["level"], 2);
        assert_eq!(value["range"]["length"], 5);
    }
}
