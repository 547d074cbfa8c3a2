use crate::parsing::{
    blocks::{BlockNode, classify_positions},
    inline::{SpanId, SpanTree},
    rope::{BackingText, TextRange},
};

/// Panics with a description of the first parser invariant `blocks` breaks
/// for `text`.
pub fn check(text: &BackingText, blocks: &[BlockNode]) {
    let n = text.len();
    let mut cursor = 0;
    for (i, b) in blocks.iter().enumerate() {
        assert_eq!(
            b.enclosing_range.location, cursor,
            "block {i} does not start where the previous one ended"
        );
        cursor = b.enclosing_range.max();
        assert!(cursor <= n, "block {i} out of bounds: {:?} (len {n})", b.enclosing_range);
        assert_eq!(b.range.location, b.enclosing_range.location, "block {i} range start");
        assert!(
            b.enclosing_range.length - b.range.length <= 1,
            "block {i} terminator longer than one unit"
        );
        if let Some(nl) = b.new_line_range() {
            assert_eq!(text.slice(nl), "\n", "block {i} terminator is not a newline");
        }
        assert!(
            !text.slice(b.range).contains('\n'),
            "block {i} range crosses a line: {:?}",
            b.range
        );

        let hidden = b.native_prefix_range.map_or(0, |r| r.length);
        assert_eq!(
            hidden + b.visible_range.length,
            b.range.length,
            "block {i}: prefix and visible ranges do not cover the line"
        );
        assert_eq!(b.visible_range.max(), b.range.max(), "block {i} visible end");
        assert!(contains(b.visible_range, b.text_range), "block {i} text outside visible");

        if b.kind.is_container() {
            check_tiling(&b.spans, None, b.text_range, i);
        } else {
            assert!(b.spans.is_empty(), "block {i} is not a container but has spans");
        }
    }
    assert_eq!(cursor, n, "blocks do not cover the whole text");

    let mut reclassified = blocks.to_vec();
    classify_positions(&mut reclassified);
    let positions: Vec<_> = blocks.iter().map(|b| b.position).collect();
    let expected: Vec<_> = reclassified.iter().map(|b| b.position).collect();
    assert_eq!(positions, expected, "stale positional classification");
}

fn contains(outer: TextRange, inner: TextRange) -> bool {
    inner.location >= outer.location && inner.max() <= outer.max()
}

/// Children of `parent` (or the roots) must tile `range` in order.
fn check_tiling(tree: &SpanTree, parent: Option<SpanId>, range: TextRange, block: usize) {
    let mut cursor = range.location;
    let spans: Vec<_> = match parent {
        Some(id) => tree.children(id).collect(),
        None => tree.roots().collect(),
    };
    for (id, span) in spans {
        assert_eq!(
            span.range.location, cursor,
            "block {block}: span {:?} leaves a gap or overlaps",
            span.range
        );
        assert_eq!(span.parent, parent, "block {block}: span {:?} parent", span.range);
        cursor = span.range.max();
        assert!(contains(span.range, span.text_range));
        if tree.children(id).next().is_some() {
            check_tiling(tree, Some(id), span.text_range, block);
        }
    }
    assert_eq!(cursor, range.max(), "block {block}: spans stop short of {range:?}");
}
