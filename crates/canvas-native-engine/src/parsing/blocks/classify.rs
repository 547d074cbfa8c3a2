use super::types::{BlockKind, BlockNode, Position};

/// Assigns [`Position`] tags to runs of same-type positionable blocks.
///
/// A change of block type ends a run. For ordered lists a change of
/// indentation ends a run as well, so each nesting level numbers on its own.
/// Blocks that are not positionable get no position.
pub fn classify_positions(blocks: &mut [BlockNode]) {
    let mut start = 0;
    while start < blocks.len() {
        if !blocks[start].kind.is_positionable() {
            blocks[start].position = None;
            start += 1;
            continue;
        }

        let mut end = start + 1;
        while end < blocks.len() && continues_run(&blocks[end - 1].kind, &blocks[end].kind) {
            end += 1;
        }

        let run_length = end - start;
        for (i, block) in blocks[start..end].iter_mut().enumerate() {
            block.position = Some(Position::in_run(i, run_length));
        }
        start = end;
    }
}

fn continues_run(prev: &BlockKind, next: &BlockKind) -> bool {
    match (prev, next) {
        (
            BlockKind::OrderedListItem { indentation: a, .. },
            BlockKind::OrderedListItem { indentation: b, .. },
        ) => a == b,
        _ => prev.same_variant(next),
    }
}
