use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::delimited;
use crate::parsing::inline::{
    parser::{InlineMatch, Scope},
    types::SpanKind,
};

pub struct Strikethrough;

impl Strikethrough {
    pub const DELIMITER: &'static str = "~~";

    pub(crate) fn build(caps: &Captures<'_>, scope: &Scope<'_>) -> Option<InlineMatch> {
        delimited(SpanKind::Strikethrough, caps, scope, true)
    }
}

pub(crate) static PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\W)(~~)(\S|\S.*?\S)(~~)").expect("valid strikethrough pattern"));
