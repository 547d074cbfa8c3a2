use serde::Serialize;
use serde_json::{Value, json};

use crate::parsing::rope::TextRange;

/// Whether an inline marker opens or closes an annotated region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerPosition {
    Opening,
    Closing,
}

/// The kind of an inline span, with any ranges specific to that kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpanKind {
    /// Plain text between other spans.
    Text,
    /// `*text*` or `_text_`.
    Emphasis,
    /// `**text**` or `__text__`.
    DoubleEmphasis,
    /// `~~text~~`.
    Strikethrough,
    /// `` `code` ``. Never contains other spans.
    CodeSpan,
    /// `[text](url "title")`.
    Link {
        url: TextRange,
        title: Option<TextRange>,
    },
    /// `☊co|id☋` or `☊Ωco|id☋`. Hidden in presentation.
    InlineMarker { position: MarkerPosition, id: String },
}

impl SpanKind {
    /// Stable name used in dumps.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            SpanKind::Text => "text",
            SpanKind::Emphasis => "emphasis",
            SpanKind::DoubleEmphasis => "double_emphasis",
            SpanKind::Strikethrough => "strikethrough",
            SpanKind::CodeSpan => "code_span",
            SpanKind::Link { .. } => "link",
            SpanKind::InlineMarker { .. } => "inline_marker",
        }
    }
}

/// Handle to a span inside a [`SpanTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SpanId(pub usize);

/// A parsed inline span. Ranges are absolute into the backing text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpanNode {
    pub kind: SpanKind,
    pub range: TextRange,
    /// Content between delimiters. Equal to `range` for text and markers.
    pub text_range: TextRange,
    /// Delimiter ranges a presenter may fold away.
    pub foldable_ranges: Vec<TextRange>,
    pub parent: Option<SpanId>,
    /// One past the arena index of the last descendant.
    pub subtree_end: usize,
}

impl SpanNode {
    /// Range shown to the user. Markers show nothing.
    #[must_use]
    pub fn visible_range(&self) -> TextRange {
        match self.kind {
            SpanKind::InlineMarker { .. } => TextRange::new(self.range.max(), 0),
            _ => self.range,
        }
    }

    #[must_use]
    pub fn is_marker(&self) -> bool {
        matches!(self.kind, SpanKind::InlineMarker { .. })
    }

    /// Shifts this span's own ranges. Descendants live in the tree and are
    /// shifted with it.
    pub fn offset(&mut self, delta: isize) {
        self.range.offset(delta);
        self.text_range.offset(delta);
        for r in &mut self.foldable_ranges {
            r.offset(delta);
        }
        if let SpanKind::Link { url, title } = &mut self.kind {
            url.offset(delta);
            if let Some(t) = title {
                t.offset(delta);
            }
        }
    }
}

/// Inline spans of one block, stored as a flat pre-order arena.
///
/// Children of a span occupy `id + 1 .. subtree_end`, so walking, shifting
/// and dumping never recurse through pointers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SpanTree {
    nodes: Vec<SpanNode>,
}

impl SpanTree {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: SpanId) -> &SpanNode {
        &self.nodes[id.0]
    }

    /// Appends a span and returns its handle. `subtree_end` is set to cover
    /// the span alone until [`SpanTree::close`] is called.
    pub fn push(
        &mut self,
        kind: SpanKind,
        range: TextRange,
        text_range: TextRange,
        foldable_ranges: Vec<TextRange>,
        parent: Option<SpanId>,
    ) -> SpanId {
        let id = SpanId(self.nodes.len());
        self.nodes.push(SpanNode {
            kind,
            range,
            text_range,
            foldable_ranges,
            parent,
            subtree_end: id.0 + 1,
        });
        id
    }

    /// Marks every span pushed since `id` as a descendant of `id`.
    pub fn close(&mut self, id: SpanId) {
        let end = self.nodes.len();
        self.nodes[id.0].subtree_end = end;
    }

    /// Every span in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (SpanId, &SpanNode)> {
        self.nodes.iter().enumerate().map(|(i, n)| (SpanId(i), n))
    }

    /// Top-level spans in order.
    pub fn roots(&self) -> impl Iterator<Item = (SpanId, &SpanNode)> {
        self.siblings_from(0, self.nodes.len())
    }

    /// Direct children of `id` in order.
    pub fn children(&self, id: SpanId) -> impl Iterator<Item = (SpanId, &SpanNode)> {
        self.siblings_from(id.0 + 1, self.nodes[id.0].subtree_end)
    }

    fn siblings_from(&self, start: usize, end: usize) -> impl Iterator<Item = (SpanId, &SpanNode)> {
        let mut next = start;
        std::iter::from_fn(move || {
            if next >= end {
                return None;
            }
            let id = next;
            next = self.nodes[id].subtree_end;
            Some((SpanId(id), &self.nodes[id]))
        })
    }

    /// Ranges of every inline marker, in text order.
    pub fn marker_ranges(&self) -> impl Iterator<Item = TextRange> + '_ {
        self.nodes.iter().filter(|n| n.is_marker()).map(|n| n.range)
    }

    /// Shifts every span by `delta`.
    pub fn offset(&mut self, delta: isize) {
        for node in &mut self.nodes {
            node.offset(delta);
        }
    }

    /// Nested JSON rendering of the spans under `parent` (or the roots).
    pub fn dictionary(&self) -> Value {
        Value::Array(self.roots().map(|(id, _)| self.span_dictionary(id)).collect())
    }

    pub(crate) fn span_dictionary(&self, id: SpanId) -> Value {
        let node = self.get(id);
        let mut value = json!({
            "type": node.kind.name(),
            "range": node.range,
            "visible_range": node.visible_range(),
        });
        match &node.kind {
            SpanKind::Link { url, title } => {
                value["url_range"] = json!(url);
                if let Some(title) = title {
                    value["title_range"] = json!(title);
                }
            }
            SpanKind::InlineMarker { position, id } => {
                value["position"] = json!(position);
                value["id"] = json!(id);
            }
            _ => {}
        }
        let children: Vec<Value> = self.children(id).map(|(c, _)| self.span_dictionary(c)).collect();
        if !children.is_empty() {
            value["subnodes"] = Value::Array(children);
        }
        value
    }
}

/// An opening and closing inline marker sharing an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InlineMarkerPair {
    pub id: String,
    pub opening: TextRange,
    pub closing: TextRange,
}

impl InlineMarkerPair {
    /// Everything from the start of the opening marker to the end of the
    /// closing one.
    #[must_use]
    pub fn range(&self) -> TextRange {
        self.opening.union(self.closing)
    }

    /// The annotated text between the markers.
    #[must_use]
    pub fn content_range(&self) -> TextRange {
        TextRange::from_bounds(self.opening.max(), self.closing.location)
    }

    pub fn offset(&mut self, delta: isize) {
        self.opening.offset(delta);
        self.closing.offset(delta);
    }
}

/// Pairs opening and closing markers by id, in order of the opening marker.
/// A closing marker without a preceding opening one is ignored, as is an
/// opening marker never closed.
pub fn pair_markers(tree: &SpanTree) -> Vec<InlineMarkerPair> {
    let mut open: Vec<(String, TextRange)> = Vec::new();
    let mut pairs = Vec::new();
    for (_, node) in tree.iter() {
        let SpanKind::InlineMarker { position, id } = &node.kind else {
            continue;
        };
        match position {
            MarkerPosition::Opening => open.push((id.clone(), node.range)),
            MarkerPosition::Closing => {
                if let Some(i) = open.iter().position(|(o, _)| o == id) {
                    let (id, opening) = open.remove(i);
                    pairs.push(InlineMarkerPair {
                        id,
                        opening,
                        closing: node.range,
                    });
                }
            }
        }
    }
    pairs.sort_by_key(|p| p.opening.location);
    pairs
}
