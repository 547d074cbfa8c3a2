use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::parsing::inline::{
    parser::{InlineMatch, Scope},
    types::{MarkerPosition, SpanKind},
};

/// Zero-width annotation anchors such as comment boundaries.
///
/// `☊co|<id>☋` opens a region and `☊Ωco|<id>☋` closes it. Markers are hidden
/// in presentation and pair up by id at the block level.
pub struct InlineMarker;

impl InlineMarker {
    pub const LEADING: char = '☊';
    pub const TRAILING: char = '☋';
    pub const CLOSING: char = 'Ω';
    pub const NAME: &'static str = "co";
    pub const SEPARATOR: char = '|';

    pub(crate) fn build(caps: &Captures<'_>, scope: &Scope<'_>) -> Option<InlineMatch> {
        let range = scope.range(caps.get(0)?);
        let position = if caps.get(1)?.is_empty() {
            MarkerPosition::Opening
        } else {
            MarkerPosition::Closing
        };
        let id = caps.get(2)?.as_str().to_string();
        Some(InlineMatch {
            kind: SpanKind::InlineMarker { position, id },
            range,
            text_range: range,
            foldable_ranges: vec![],
            container: false,
        })
    }

    /// Source text of a marker.
    pub fn markup(position: MarkerPosition, id: &str) -> String {
        let closing = match position {
            MarkerPosition::Opening => String::new(),
            MarkerPosition::Closing => Self::CLOSING.to_string(),
        };
        format!(
            "{}{closing}{}{}{id}{}",
            Self::LEADING,
            Self::NAME,
            Self::SEPARATOR,
            Self::TRAILING
        )
    }
}

pub(crate) static PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"☊(Ω?)co\|([^☋\s]+)☋").expect("valid inline marker pattern"));
