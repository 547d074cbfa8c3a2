use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::parsing::inline::{
    parser::{InlineMatch, Scope},
    types::SpanKind,
};

/// `[text](url)` or `[text](url "title")`.
///
/// Only the text is visible content; everything from `](` through `)` is
/// foldable.
pub struct Link;

impl Link {
    pub const OPEN: char = '[';
    pub const MIDDLE: &'static str = "](";
    pub const CLOSE: char = ')';

    pub(crate) fn build(caps: &Captures<'_>, scope: &Scope<'_>) -> Option<InlineMatch> {
        let open = scope.range(caps.get(1)?);
        let text = scope.range(caps.get(2)?);
        let middle = scope.range(caps.get(3)?);
        let url = scope.range(caps.get(4)?);
        let title = caps.get(5).map(|m| scope.range(m));
        let close = scope.range(caps.get(6)?);
        Some(InlineMatch {
            kind: SpanKind::Link { url, title },
            range: open.union(close),
            text_range: text,
            foldable_ranges: vec![open, middle.union(close)],
            container: true,
        })
    }
}

pub(crate) static PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(\[)([^\[\]]+)(\]\()([^\s\)]+)(?:\s+"([^"]*)")?(\))"#).expect("valid link pattern")
});
