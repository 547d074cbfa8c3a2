use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::delimited;
use crate::parsing::inline::{
    parser::{InlineMatch, Scope},
    types::SpanKind,
};

/// Code span inline type with owned delimiter constant.
///
/// Code spans never contain other spans.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick character that delimits code spans.
    pub const TICK: char = '`';

    pub(crate) fn build(caps: &Captures<'_>, scope: &Scope<'_>) -> Option<InlineMatch> {
        delimited(SpanKind::CodeSpan, caps, scope, false)
    }
}

pub(crate) static PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(`)([^`]+)(`)").expect("valid code span pattern"));
