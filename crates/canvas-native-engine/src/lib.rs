//! Incremental document model for Canvas Native backing text.
//!
//! - [`parsing`] turns backing text into blocks and inline spans
//! - [`editing`] maps ranges between backing and presentation text and
//!   applies edits incrementally

pub mod editing;
pub mod parsing;

pub use editing::{ChangeEvent, Controller, ControllerError, Document, Operation, Patch};
pub use parsing::{
    ParsedDoc,
    blocks::{Attachment, BlockKind, BlockNode, ChecklistState, Position},
    inline::{InlineMarkerPair, SpanKind, SpanNode, SpanTree},
    node::{Node, NodeRef},
    parse, parse_document,
    rope::{BackingText, TextRange},
};
