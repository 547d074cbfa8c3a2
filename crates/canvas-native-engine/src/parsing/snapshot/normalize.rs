use serde::Serialize;

use crate::parsing::{
    blocks::{BlockNode, Position},
    inline::{SpanId, SpanTree},
    rope::{BackingText, TextRange, slice::preview},
};

const PREVIEW_CHARS: usize = 60;

#[derive(Debug, Serialize)]
pub struct Snap {
    pub blocks: Vec<BlockSnap>,
}

#[derive(Debug, Serialize)]
pub struct BlockSnap {
    pub kind: String,
    pub range: (usize, usize),
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<(usize, usize)>,
    pub visible: (usize, usize),
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub spans: Vec<SpanSnap>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub markers: Vec<MarkerPairSnap>,
}

#[derive(Debug, Serialize)]
pub struct SpanSnap {
    pub kind: String,
    pub range: (usize, usize),
    pub text: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SpanSnap>,
}

#[derive(Debug, Serialize)]
pub struct MarkerPairSnap {
    pub id: String,
    pub opening: (usize, usize),
    pub closing: (usize, usize),
}

fn bounds(r: TextRange) -> (usize, usize) {
    (r.location, r.max())
}

pub fn normalize(text: &BackingText, blocks: &[BlockNode]) -> Snap {
    let blocks = blocks
        .iter()
        .map(|b| BlockSnap {
            kind: b.kind.name().to_string(),
            range: bounds(b.range),
            prefix: b.native_prefix_range.map(bounds),
            visible: bounds(b.visible_range),
            position: b.position,
            text: preview(text, b.visible_range, PREVIEW_CHARS),
            spans: b
                .spans
                .roots()
                .map(|(id, _)| span_snap(text, &b.spans, id))
                .collect(),
            markers: b
                .inline_marker_pairs
                .iter()
                .map(|p| MarkerPairSnap {
                    id: p.id.clone(),
                    opening: bounds(p.opening),
                    closing: bounds(p.closing),
                })
                .collect(),
        })
        .collect();
    Snap { blocks }
}

fn span_snap(text: &BackingText, tree: &SpanTree, id: SpanId) -> SpanSnap {
    let node = tree.get(id);
    SpanSnap {
        kind: node.kind.name().to_string(),
        range: bounds(node.range),
        text: preview(text, node.range, PREVIEW_CHARS),
        children: tree
            .children(id)
            .map(|(child, _)| span_snap(text, tree, child))
            .collect(),
    }
}
