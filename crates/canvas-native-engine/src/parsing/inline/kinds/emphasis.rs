use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::delimited;
use crate::parsing::inline::{
    parser::{InlineMatch, Scope},
    types::SpanKind,
};

/// `*text*` or `_text_`.
///
/// The opening delimiter must start the text or follow a non-word
/// character, and the content may not begin or end with whitespace.
pub struct Emphasis;

impl Emphasis {
    pub const STAR: &'static str = "*";
    pub const UNDERSCORE: &'static str = "_";

    pub(crate) fn build(caps: &Captures<'_>, scope: &Scope<'_>) -> Option<InlineMatch> {
        delimited(SpanKind::Emphasis, caps, scope, true)
    }
}

/// `**text**` or `__text__`. Same boundary rules as [`Emphasis`].
pub struct DoubleEmphasis;

impl DoubleEmphasis {
    pub const STAR: &'static str = "**";
    pub const UNDERSCORE: &'static str = "__";

    pub(crate) fn build(caps: &Captures<'_>, scope: &Scope<'_>) -> Option<InlineMatch> {
        delimited(SpanKind::DoubleEmphasis, caps, scope, true)
    }
}

fn pattern(delimiter: &str) -> Regex {
    let d = regex::escape(delimiter);
    Regex::new(&format!(r"(?:^|\W)({d})(\S|\S.*?\S)({d})")).expect("valid emphasis pattern")
}

pub(crate) static STAR: LazyLock<Regex> = LazyLock::new(|| pattern(Emphasis::STAR));
pub(crate) static UNDERSCORE: LazyLock<Regex> = LazyLock::new(|| pattern(Emphasis::UNDERSCORE));
pub(crate) static DOUBLE_STAR: LazyLock<Regex> = LazyLock::new(|| pattern(DoubleEmphasis::STAR));
pub(crate) static DOUBLE_UNDERSCORE: LazyLock<Regex> =
    LazyLock::new(|| pattern(DoubleEmphasis::UNDERSCORE));
