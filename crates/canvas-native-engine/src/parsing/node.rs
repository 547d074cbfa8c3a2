use serde_json::{Value, json};

use super::{
    blocks::BlockNode,
    inline::SpanNode,
    rope::{TextRange, utf16_to_byte},
};

/// Behaviour shared by blocks and spans.
pub trait Node {
    /// Full extent, hidden markers included.
    fn range(&self) -> TextRange;

    /// The part of [`Node::range`] shown in presentation text.
    fn visible_range(&self) -> TextRange;

    /// Shifts every owned range by `delta`.
    fn offset(&mut self, delta: isize);

    /// Debug representation.
    fn dictionary(&self) -> Value;

    /// The visible text of this node in `backing`.
    fn content_in<'a>(&self, backing: &'a str) -> &'a str {
        let r = self.visible_range();
        let start = utf16_to_byte(backing, r.location);
        let end = utf16_to_byte(backing, r.max());
        &backing[start..end]
    }
}

impl Node for BlockNode {
    fn range(&self) -> TextRange {
        self.range
    }

    fn visible_range(&self) -> TextRange {
        self.visible_range
    }

    fn offset(&mut self, delta: isize) {
        BlockNode::offset(self, delta);
    }

    fn dictionary(&self) -> Value {
        BlockNode::dictionary(self)
    }
}

impl Node for SpanNode {
    fn range(&self) -> TextRange {
        self.range
    }

    fn visible_range(&self) -> TextRange {
        SpanNode::visible_range(self)
    }

    /// Shifts this span only. Descendants are shifted through their tree.
    fn offset(&mut self, delta: isize) {
        SpanNode::offset(self, delta);
    }

    fn dictionary(&self) -> Value {
        json!({
            "type": self.kind.name(),
            "range": self.range,
            "visible_range": SpanNode::visible_range(self),
        })
    }
}

/// A borrowed block or span, as returned by range queries.
#[derive(Debug, Clone, Copy)]
pub enum NodeRef<'a> {
    Block(&'a BlockNode),
    Span(&'a SpanNode),
}

impl NodeRef<'_> {
    #[must_use]
    pub fn range(&self) -> TextRange {
        match self {
            NodeRef::Block(b) => b.range,
            NodeRef::Span(s) => s.range,
        }
    }

    #[must_use]
    pub fn visible_range(&self) -> TextRange {
        match self {
            NodeRef::Block(b) => b.visible_range,
            NodeRef::Span(s) => s.visible_range(),
        }
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            NodeRef::Block(b) => b.kind.name(),
            NodeRef::Span(s) => s.kind.name(),
        }
    }
}
