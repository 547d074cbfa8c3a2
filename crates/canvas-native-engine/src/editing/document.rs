use crate::parsing::{
    blocks::{BlockKind, BlockNode},
    inline::SpanId,
    node::NodeRef,
    parse_document,
    rope::{BackingText, TextRange, utf16_len, utf16_to_byte},
};

/// Read-only snapshot of a parsed document.
///
/// A `Document` pairs the backing text with its blocks and derives the
/// presentation text: the backing text with every hidden range excised.
/// Hidden ranges are each block's native prefix and its inline markers.
///
/// ## Coordinate spaces
///
/// - **Backing**: UTF-16 offsets into the stored text, markers included
/// - **Presentation**: UTF-16 offsets into what an editor displays
///
/// [`Document::presentation_range`] and [`Document::backing_range`] convert
/// between them. Converting a backing range to presentation and back is
/// exact unless the range starts or ends on a hidden range.
///
/// ## Usage
///
/// ```rust
/// # use canvas_native_engine::{Document, TextRange};
/// let doc = Document::new("⧙doc-heading⧘Title\nHello");
/// assert_eq!(doc.presentation_string(), "Title\nHello");
/// assert_eq!(doc.presentation_range(TextRange::new(13, 5)), TextRange::new(0, 5));
/// assert_eq!(doc.backing_range(TextRange::new(6, 5)), TextRange::new(19, 5));
/// ```
#[derive(Debug, Clone)]
pub struct Document {
    backing: BackingText,
    blocks: Vec<BlockNode>,
    presentation: String,
    block_presentation_locations: Vec<usize>,
}

impl Document {
    /// Parses `backing` into a snapshot.
    pub fn new(backing: &str) -> Self {
        let text = BackingText::new(backing);
        let blocks = parse_document(&text).blocks;
        Self::from_parts(text, blocks)
    }

    /// Builds a snapshot from text and the blocks already parsed from it.
    pub fn from_parts(backing: BackingText, blocks: Vec<BlockNode>) -> Self {
        let presentation = presentation_text(&backing, TextRange::new(0, backing.len()), &blocks);
        let mut locations = Vec::with_capacity(blocks.len());
        let mut hidden_total = 0;

        for block in &blocks {
            let prefix = block.native_prefix_range.map_or(0, |r| r.length);
            locations.push(block.visible_range.location - hidden_total - prefix);
            hidden_total += block.hidden_ranges().map(|r| r.length).sum::<usize>();
        }

        Self {
            backing,
            blocks,
            presentation,
            block_presentation_locations: locations,
        }
    }

    pub fn backing(&self) -> &BackingText {
        &self.backing
    }

    pub fn backing_string(&self) -> String {
        self.backing.to_string()
    }

    pub fn blocks(&self) -> &[BlockNode] {
        &self.blocks
    }

    pub fn presentation_string(&self) -> &str {
        &self.presentation
    }

    /// Start of each block's text in presentation space.
    pub fn block_presentation_locations(&self) -> &[usize] {
        &self.block_presentation_locations
    }

    /// The block's text in presentation space, without its newline.
    pub fn presentation_range_of_block(&self, index: usize) -> TextRange {
        TextRange::new(
            self.block_presentation_locations[index],
            self.blocks[index].presentation_length(),
        )
    }

    /// Maps a backing range to presentation space.
    ///
    /// Hidden ranges before `backing` move the location back; hidden ranges
    /// overlapping it shorten it. A location inside a hidden range maps to
    /// where that range was excised.
    pub fn presentation_range(&self, backing: TextRange) -> TextRange {
        let mut location = backing.location;
        let mut length = backing.length;

        for block in &self.blocks {
            if block.range.location > backing.max() {
                break;
            }
            for hidden in block.hidden_ranges() {
                if hidden.max() <= backing.location {
                    location -= hidden.length;
                    continue;
                }
                if hidden.location < backing.location {
                    location -= backing.location - hidden.location;
                }
                let start = hidden.location.max(backing.location);
                let end = hidden.max().min(backing.max());
                if end > start {
                    length -= end - start;
                }
            }
        }

        TextRange::new(location, length)
    }

    /// Maps a presentation range to backing space.
    ///
    /// Hidden ranges inside the mapped region are included. A native prefix
    /// directly after a non-empty region is included too, so deleting the
    /// newline before a block takes the block's marker with it. An image
    /// marker at the very start of the region counts as inside it.
    pub fn backing_range(&self, presentation: TextRange) -> TextRange {
        let mut location = presentation.location;
        let mut length = presentation.length;

        'blocks: for block in &self.blocks {
            let inclusive = block.kind.is_attachable();
            let prefix = block.native_prefix_range.map(|r| (r, true));
            let markers = block.spans.marker_ranges().map(|r| (r, false));
            for (hidden, is_prefix) in prefix.into_iter().chain(markers) {
                let after = if inclusive && is_prefix {
                    hidden.location >= location
                } else {
                    hidden.location > location
                };
                if !after {
                    location += hidden.length;
                    continue;
                }
                let end = location + length;
                if hidden.location < end {
                    length += hidden.length;
                    continue;
                }
                if is_prefix && length > 0 && hidden.location == end {
                    length += hidden.length;
                }
                break 'blocks;
            }
        }

        TextRange::new(location, length)
    }

    /// Index of the block owning a presentation location. A location at a
    /// block's end belongs to that block.
    pub fn block_index_at_presentation(&self, location: usize) -> Option<usize> {
        let i = self
            .block_presentation_locations
            .partition_point(|&l| l <= location);
        let index = i.checked_sub(1)?;
        if index + 1 == self.blocks.len()
            && location > self.presentation_range_of_block(index).max()
        {
            return None;
        }
        Some(index)
    }

    pub fn block_at_presentation(&self, location: usize) -> Option<&BlockNode> {
        self.block_index_at_presentation(location)
            .map(|i| &self.blocks[i])
    }

    /// Index of the block owning a backing location. A location at a
    /// block's end belongs to that block.
    pub fn block_index_at_backing(&self, location: usize) -> Option<usize> {
        let i = self
            .blocks
            .partition_point(|b| b.range.location <= location);
        let index = i.checked_sub(1)?;
        if index + 1 == self.blocks.len() && location > self.blocks[index].range.max() {
            return None;
        }
        Some(index)
    }

    pub fn block_at_backing(&self, location: usize) -> Option<&BlockNode> {
        self.block_index_at_backing(location).map(|i| &self.blocks[i])
    }

    /// Blocks whose presentation text, newline included, meets `range`.
    pub fn blocks_in_presentation(&self, range: TextRange) -> Vec<&BlockNode> {
        (0..self.blocks.len())
            .filter(|&i| {
                let mut r = self.presentation_range_of_block(i);
                r.length += 1;
                r.intersection(range).is_some()
            })
            .map(|i| &self.blocks[i])
            .collect()
    }

    /// Every block and span whose range meets `backing`, depth first.
    pub fn nodes_in(&self, backing: TextRange) -> Vec<NodeRef<'_>> {
        let mut nodes = Vec::new();
        for block in &self.blocks {
            if block.range.location > backing.max() {
                break;
            }
            if block.range.intersection(backing).is_none() {
                continue;
            }
            nodes.push(NodeRef::Block(block));

            let mut i = 0;
            while i < block.spans.len() {
                let span = block.spans.get(SpanId(i));
                if span.range.intersection(backing).is_some() {
                    nodes.push(NodeRef::Span(span));
                    i += 1;
                } else {
                    i = span.subtree_end;
                }
            }
        }
        nodes
    }

    /// Presentation text corresponding to a backing range.
    pub fn presentation_string_in(&self, backing: TextRange) -> &str {
        self.presentation_slice(self.presentation_range(backing))
    }

    /// Presentation text of the block at `index`.
    pub fn presentation_string_of(&self, index: usize) -> &str {
        self.presentation_slice(self.presentation_range_of_block(index))
    }

    fn presentation_slice(&self, range: TextRange) -> &str {
        let start = utf16_to_byte(&self.presentation, range.location);
        let end = utf16_to_byte(&self.presentation, range.max());
        &self.presentation[start..end]
    }

    /// Length of the presentation text in UTF-16 units.
    pub fn presentation_len(&self) -> usize {
        utf16_len(&self.presentation)
    }

    /// Text of a leading title block, when it has any.
    pub fn title(&self) -> Option<&str> {
        let first = self.blocks.first()?;
        if first.kind != BlockKind::Title {
            return None;
        }
        Some(self.presentation_string_of(0)).filter(|t| !t.is_empty())
    }

    pub fn index_of(&self, block: &BlockNode) -> Option<usize> {
        self.blocks.iter().position(|b| b == block)
    }
}

/// `region` of `backing` with the hidden ranges of `blocks` excised. Every
/// hidden range of `blocks` lies inside `region`.
pub(crate) fn presentation_text(backing: &BackingText, region: TextRange, blocks: &[BlockNode]) -> String {
    let mut out = String::with_capacity(region.length);
    let mut cursor = region.location;
    for hidden in blocks.iter().flat_map(|b| b.hidden_ranges()) {
        out.push_str(&backing.slice(TextRange::from_bounds(cursor, hidden.location)));
        cursor = hidden.max();
    }
    out.push_str(&backing.slice(TextRange::from_bounds(cursor, region.max())));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const SAMPLE: &str = "⧙doc-heading⧘Title\nHello\n⧙unordered-list-0⧘- One\n⧙unordered-list-0⧘- Two";

    fn r(location: usize, length: usize) -> TextRange {
        TextRange::new(location, length)
    }

    #[test]
    fn presentation_excises_prefixes() {
        let doc = Document::new(SAMPLE);
        assert_eq!(doc.presentation_string(), "Title\nHello\nOne\nTwo");
        assert_eq!(doc.block_presentation_locations(), &[0, 6, 12, 16]);
        assert_eq!(doc.presentation_range_of_block(2), r(12, 3));
        assert_eq!(doc.presentation_len(), 19);
    }

    #[test]
    fn presentation_excises_inline_markers() {
        let doc = Document::new("a☊co|x☋b☊Ωco|x☋c\nnext");
        assert_eq!(doc.presentation_string(), "abc\nnext");
        assert_eq!(doc.block_presentation_locations(), &[0, 4]);
        assert_eq!(doc.presentation_range_of_block(0), r(0, 3));
    }

    #[test]
    fn empty_document() {
        let doc = Document::new("");
        assert_eq!(doc.presentation_string(), "");
        assert!(doc.block_presentation_locations().is_empty());
        assert_eq!(doc.block_at_presentation(0), None);
        assert_eq!(doc.title(), None);
    }

    #[rstest]
    #[case(r(13, 5), r(0, 5))]
    #[case(r(0, 18), r(0, 5))]
    #[case(r(19, 5), r(6, 5))]
    #[case(r(5, 0), r(0, 0))]
    #[case(r(18, 7), r(5, 7))]
    #[case(r(45, 3), r(12, 3))]
    #[case(r(0, 72), r(0, 19))]
    fn backing_to_presentation(#[case] backing: TextRange, #[case] expected: TextRange) {
        let doc = Document::new(SAMPLE);
        assert_eq!(doc.presentation_range(backing), expected);
    }

    #[rstest]
    #[case(r(0, 5), r(13, 5))]
    #[case(r(6, 5), r(19, 5))]
    #[case(r(12, 3), r(45, 3))]
    #[case(r(12, 0), r(45, 0))]
    // the newline before a list item takes the item's marker along
    #[case(r(11, 1), r(24, 21))]
    fn presentation_to_backing(#[case] presentation: TextRange, #[case] expected: TextRange) {
        let doc = Document::new(SAMPLE);
        assert_eq!(doc.backing_range(presentation), expected);
    }

    #[test]
    fn image_marker_is_inclusive_at_start() {
        let doc = Document::new("Hi\n⧙image-{\"url\":\"u\"}⧘\nBye");
        assert_eq!(doc.presentation_string(), "Hi\n\nBye");
        // deleting the empty image line from its start swallows the marker
        let image = &doc.blocks()[1];
        assert_eq!(doc.backing_range(r(3, 1)), r(3, image.range.length + 1));
    }

    #[test]
    fn round_trip_for_ranges_off_hidden_boundaries() {
        let doc = Document::new(SAMPLE);
        let hidden: Vec<TextRange> = doc.blocks().iter().flat_map(|b| b.hidden_ranges()).collect();
        let len = doc.backing().len();
        let start_ok = |p: usize| !hidden.iter().any(|h| p >= h.location && p < h.max());
        let end_ok = |p: usize| !hidden.iter().any(|h| p >= h.location && p <= h.max());

        let mut checked = 0;
        for start in (0..=len).filter(|&p| start_ok(p)) {
            for end in (start..=len).filter(|&p| end_ok(p)) {
                let backing = TextRange::from_bounds(start, end);
                let round = doc.backing_range(doc.presentation_range(backing));
                assert_eq!(round, backing, "round trip of {backing:?}");
                checked += 1;
            }
        }
        assert!(checked > 100);
    }

    #[rstest]
    #[case(0, Some(0))]
    #[case(5, Some(0))]
    #[case(6, Some(1))]
    #[case(11, Some(1))]
    #[case(12, Some(2))]
    #[case(19, Some(3))]
    #[case(20, None)]
    fn block_at_presentation_owns_end_boundary(#[case] location: usize, #[case] expected: Option<usize>) {
        let doc = Document::new(SAMPLE);
        assert_eq!(doc.block_index_at_presentation(location), expected);
    }

    #[rstest]
    #[case(0, Some(0))]
    #[case(18, Some(0))]
    #[case(19, Some(1))]
    #[case(24, Some(1))]
    #[case(25, Some(2))]
    #[case(72, Some(3))]
    #[case(73, None)]
    fn block_at_backing_owns_end_boundary(#[case] location: usize, #[case] expected: Option<usize>) {
        let doc = Document::new(SAMPLE);
        assert_eq!(doc.backing().len(), 72);
        assert_eq!(doc.block_index_at_backing(location), expected);
    }

    #[test]
    fn blocks_in_presentation_range() {
        let doc = Document::new(SAMPLE);
        let kinds: Vec<&str> = doc
            .blocks_in_presentation(r(8, 6))
            .iter()
            .map(|b| b.kind.name())
            .collect();
        assert_eq!(kinds, vec!["paragraph", "unordered_list_item"]);
    }

    #[test]
    fn nodes_in_is_depth_first() {
        let doc = Document::new("plain\nsome **bold _it_** text");
        let names: Vec<&str> = doc.nodes_in(r(15, 6)).iter().map(|n| n.name()).collect();
        assert_eq!(names, vec!["paragraph", "double_emphasis", "text", "emphasis", "text"]);
    }

    #[test]
    fn presentation_strings() {
        let doc = Document::new(SAMPLE);
        assert_eq!(doc.presentation_string_of(3), "Two");
        assert_eq!(doc.presentation_string_in(r(0, 24)), "Title\nHello");
        assert_eq!(doc.title(), Some("Title"));
        assert_eq!(doc.index_of(&doc.blocks()[2]), Some(2));
    }

    #[test]
    fn empty_title_is_none() {
        assert_eq!(Document::new("⧙doc-heading⧘\nBody").title(), None);
        assert_eq!(Document::new("Body").title(), None);
    }
}
