//! # Inline Parsing
//!
//! Table-driven inline parsing over a block's text range.
//!
//! ## Architecture
//!
//! Inline parsing is separate from block parsing. Each block that holds
//! inline content hands its text range to [`parse_inline`], which runs the
//! rules in [`kinds::SPAN_PARSE_ORDER`] over it:
//! - a match overlapping one accepted earlier is dropped
//! - container matches are parsed again over their own text range
//! - gaps become plain `Text` spans, so spans tile their parent exactly
//!
//! ## Modules
//!
//! - **`types`**: `SpanKind`, `SpanNode` and the flat `SpanTree` arena
//! - **`kinds`**: span kinds with owned delimiters and patterns
//! - **`parser`**: `parse_inline()` entry point
//!
//! ## Hidden Markers
//!
//! Inline markers (`☊co|id☋`) are spans like any other but show nothing;
//! the document layer removes them when building presentation text.

pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::parse_inline;
pub use types::{
    InlineMarkerPair, MarkerPosition, SpanId, SpanKind, SpanNode, SpanTree, pair_markers,
};
