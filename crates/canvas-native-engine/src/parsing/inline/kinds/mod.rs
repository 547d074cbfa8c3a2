//! # Inline Kinds
//!
//! Each span kind owns its delimiters and the pattern that recognizes it.
//! The parser never hardcodes `*`, `` ` `` or `☊`; it walks
//! [`SPAN_PARSE_ORDER`] and asks each rule to build a match.
//!
//! ## Types
//!
//! - **`InlineMarker`**: `☊co|id☋` / `☊Ωco|id☋`, hidden annotation anchors
//! - **`CodeSpan`**: `` `code` ``, never contains other spans
//! - **`Link`**: `[text](url "title")`
//! - **`DoubleEmphasis`**: `**text**` / `__text__`
//! - **`Strikethrough`**: `~~text~~`
//! - **`Emphasis`**: `*text*` / `_text_`
//!
//! ## Precedence
//!
//! Rules run in table order. A match overlapping one accepted earlier is
//! dropped, so `` `*x*` `` is a code span and never emphasis.

pub mod code_span;
pub mod emphasis;
pub mod inline_marker;
pub mod link;
pub mod strikethrough;

use std::sync::LazyLock;

use regex::{Captures, Regex};

pub use code_span::CodeSpan;
pub use emphasis::{DoubleEmphasis, Emphasis};
pub use inline_marker::InlineMarker;
pub use link::Link;
pub use strikethrough::Strikethrough;

use super::parser::{InlineMatch, Scope};
use super::types::SpanKind;

/// One entry of the inline rule table.
pub struct SpanRule {
    pub name: &'static str,
    pub pattern: &'static LazyLock<Regex>,
    /// Minimum number of participating capture groups, including group 0.
    pub min_captures: usize,
    pub build: fn(&Captures<'_>, &Scope<'_>) -> Option<InlineMatch>,
}

/// Inline rules in precedence order.
pub static SPAN_PARSE_ORDER: &[SpanRule] = &[
    SpanRule {
        name: "inline_marker",
        pattern: &inline_marker::PATTERN,
        min_captures: 3,
        build: InlineMarker::build,
    },
    SpanRule {
        name: "code_span",
        pattern: &code_span::PATTERN,
        min_captures: 4,
        build: CodeSpan::build,
    },
    SpanRule {
        name: "link",
        pattern: &link::PATTERN,
        min_captures: 6,
        build: Link::build,
    },
    SpanRule {
        name: "double_emphasis_star",
        pattern: &emphasis::DOUBLE_STAR,
        min_captures: 4,
        build: DoubleEmphasis::build,
    },
    SpanRule {
        name: "double_emphasis_underscore",
        pattern: &emphasis::DOUBLE_UNDERSCORE,
        min_captures: 4,
        build: DoubleEmphasis::build,
    },
    SpanRule {
        name: "strikethrough",
        pattern: &strikethrough::PATTERN,
        min_captures: 4,
        build: Strikethrough::build,
    },
    SpanRule {
        name: "emphasis_star",
        pattern: &emphasis::STAR,
        min_captures: 4,
        build: Emphasis::build,
    },
    SpanRule {
        name: "emphasis_underscore",
        pattern: &emphasis::UNDERSCORE,
        min_captures: 4,
        build: Emphasis::build,
    },
];

/// Builds a match for the common `(leading)(text)(trailing)` layout in
/// capture groups 1 to 3.
pub(crate) fn delimited(
    kind: SpanKind,
    caps: &Captures<'_>,
    scope: &Scope<'_>,
    container: bool,
) -> Option<InlineMatch> {
    let leading = scope.range(caps.get(1)?);
    let text = scope.range(caps.get(2)?);
    let trailing = scope.range(caps.get(3)?);
    Some(InlineMatch {
        kind,
        range: leading.union(trailing),
        text_range: text,
        foldable_ranges: vec![leading, trailing],
        container,
    })
}
