use regex::Match;

use crate::parsing::rope::{TextRange, utf16_len, utf16_to_byte};

use super::{
    kinds::SPAN_PARSE_ORDER,
    types::{SpanId, SpanKind, SpanTree},
};

/// A slice of line text together with the absolute UTF-16 location where it
/// starts, used to turn regex byte offsets into backing ranges.
pub struct Scope<'a> {
    pub text: &'a str,
    pub base: usize,
}

impl Scope<'_> {
    /// Absolute UTF-16 range of a regex match inside this scope.
    pub fn range(&self, m: Match<'_>) -> TextRange {
        TextRange::new(
            self.base + utf16_len(&self.text[..m.start()]),
            utf16_len(m.as_str()),
        )
    }
}

/// A span recognized by one rule, before it is placed in the tree.
#[derive(Debug, Clone)]
pub struct InlineMatch {
    pub kind: SpanKind,
    pub range: TextRange,
    pub text_range: TextRange,
    pub foldable_ranges: Vec<TextRange>,
    /// Whether `text_range` is parsed for nested spans.
    pub container: bool,
}

/// Parses the inline spans of `range`, a range inside `line`.
///
/// # Arguments
/// - `line`: text of the whole line (no terminator)
/// - `line_start`: absolute UTF-16 location where `line` begins
/// - `range`: the absolute range to parse, usually a block's text range
///
/// # Returns
/// A tree whose top-level spans tile `range` exactly. Gaps between matches
/// become [`SpanKind::Text`] spans; containers hold their own tiling of
/// their text range.
pub fn parse_inline(line: &str, line_start: usize, range: TextRange) -> SpanTree {
    let mut tree = SpanTree::new();
    parse_into(&mut tree, line, line_start, range, None);
    tree
}

fn parse_into(
    tree: &mut SpanTree,
    line: &str,
    line_start: usize,
    range: TextRange,
    parent: Option<SpanId>,
) {
    if range.is_empty() {
        return;
    }

    let start = utf16_to_byte(line, range.location - line_start);
    let end = utf16_to_byte(line, range.max() - line_start);
    let scope = Scope {
        text: &line[start..end],
        base: range.location,
    };

    let mut cursor = range.location;
    for m in collect_matches(&scope) {
        if m.range.location > cursor {
            push_text(tree, TextRange::from_bounds(cursor, m.range.location), parent);
        }
        cursor = m.range.max();
        let id = tree.push(m.kind, m.range, m.text_range, m.foldable_ranges, parent);
        if m.container {
            parse_into(tree, line, line_start, m.text_range, Some(id));
        }
        tree.close(id);
    }

    if cursor < range.max() {
        push_text(tree, TextRange::from_bounds(cursor, range.max()), parent);
    }
}

fn push_text(tree: &mut SpanTree, range: TextRange, parent: Option<SpanId>) {
    tree.push(SpanKind::Text, range, range, vec![], parent);
}

/// Runs every rule over the scope and keeps the non-overlapping matches,
/// first accepted wins, sorted by location.
fn collect_matches(scope: &Scope<'_>) -> Vec<InlineMatch> {
    let mut accepted: Vec<InlineMatch> = Vec::new();
    for rule in SPAN_PARSE_ORDER {
        for caps in rule.pattern.captures_iter(scope.text) {
            if caps.iter().flatten().count() < rule.min_captures {
                continue;
            }
            let Some(m) = (rule.build)(&caps, scope) else {
                continue;
            };
            if accepted
                .iter()
                .any(|a| a.range.intersection(m.range).is_some())
            {
                log::trace!("{} at {:?} overlaps an earlier span", rule.name, m.range);
                continue;
            }
            accepted.push(m);
        }
    }
    accepted.sort_by_key(|m| m.range.location);
    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::inline::types::{MarkerPosition, SpanNode};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn parse(s: &str) -> SpanTree {
        parse_inline(s, 0, TextRange::new(0, utf16_len(s)))
    }

    fn roots(tree: &SpanTree) -> Vec<(&'static str, TextRange)> {
        tree.roots().map(|(_, n)| (n.kind.name(), n.range)).collect()
    }

    fn r(location: usize, length: usize) -> TextRange {
        TextRange::new(location, length)
    }

    #[test]
    fn plain_text_is_one_span() {
        let tree = parse("hello");
        assert_eq!(roots(&tree), vec![("text", r(0, 5))]);
    }

    #[test]
    fn empty_range_has_no_spans() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn emphasis_between_text() {
        let tree = parse("a *b* c");
        assert_eq!(
            roots(&tree),
            vec![("text", r(0, 2)), ("emphasis", r(2, 3)), ("text", r(5, 2))]
        );
        let (id, em) = tree.roots().nth(1).unwrap();
        assert_eq!(em.text_range, r(3, 1));
        assert_eq!(em.foldable_ranges, vec![r(2, 1), r(4, 1)]);
        let children: Vec<&SpanNode> = tree.children(id).map(|(_, n)| n).collect();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].range, r(3, 1));
    }

    #[rstest]
    #[case("**bold**", "double_emphasis")]
    #[case("__bold__", "double_emphasis")]
    #[case("*it*", "emphasis")]
    #[case("_it_", "emphasis")]
    #[case("~~gone~~", "strikethrough")]
    #[case("`code`", "code_span")]
    #[case("[a](http://x)", "link")]
    fn recognizes_whole_line(#[case] input: &str, #[case] kind: &str) {
        let tree = parse(input);
        let found = roots(&tree);
        assert_eq!(found.len(), 1, "{found:?}");
        assert_eq!(found[0].0, kind);
        assert_eq!(found[0].1, r(0, utf16_len(input)));
    }

    #[rstest]
    #[case("a * b *")]
    #[case("snake_case_name")]
    #[case("2*3*4")]
    #[case("``")]
    fn rejects_non_spans(#[case] input: &str) {
        let tree = parse(input);
        assert_eq!(roots(&tree), vec![("text", r(0, utf16_len(input)))]);
    }

    #[test]
    fn code_span_suppresses_emphasis() {
        let tree = parse("`*x*`");
        assert_eq!(roots(&tree), vec![("code_span", r(0, 5))]);
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn nested_emphasis_inside_double() {
        let tree = parse("**a _b_ c**");
        let (id, _) = tree.roots().next().unwrap();
        let kinds: Vec<&str> = tree.children(id).map(|(_, n)| n.kind.name()).collect();
        assert_eq!(kinds, vec!["text", "emphasis", "text"]);
    }

    #[test]
    fn link_ranges() {
        let tree = parse(r#"see [docs](http://a.b "Title")"#);
        let (_, link) = tree.roots().nth(1).unwrap();
        let SpanKind::Link { url, title } = &link.kind else {
            panic!("expected link, got {:?}", link.kind);
        };
        assert_eq!(link.range, r(4, 26));
        assert_eq!(link.text_range, r(5, 4));
        assert_eq!(*url, r(11, 10));
        assert_eq!(*title, Some(r(23, 5)));
        assert_eq!(link.foldable_ranges, vec![r(4, 1), r(9, 21)]);
    }

    #[test]
    fn inline_markers_are_recognized() {
        let tree = parse("a☊co|x1☋b☊Ωco|x1☋c");
        let kinds = roots(&tree);
        assert_eq!(
            kinds,
            vec![
                ("text", r(0, 1)),
                ("inline_marker", r(1, 7)),
                ("text", r(8, 1)),
                ("inline_marker", r(9, 8)),
                ("text", r(17, 1)),
            ]
        );
        let (_, closing) = tree.roots().nth(3).unwrap();
        assert_eq!(
            closing.kind,
            SpanKind::InlineMarker {
                position: MarkerPosition::Closing,
                id: "x1".into()
            }
        );
    }

    #[test]
    fn offsets_are_absolute_and_utf16() {
        // "😀 *b*" starting at 100, parsing from after the emoji
        let line = "😀 *b*";
        let tree = parse_inline(line, 100, r(102, 4));
        assert_eq!(roots(&tree), vec![("text", r(102, 1)), ("emphasis", r(103, 3))]);
    }

    #[test]
    fn spans_tile_the_range() {
        let line = "x **y** `z` [l](u) ~~s~~ _e_ end";
        let tree = parse(line);
        let mut cursor = 0;
        for (_, n) in tree.roots() {
            assert_eq!(n.range.location, cursor);
            cursor = n.range.max();
        }
        assert_eq!(cursor, utf16_len(line));
    }
}
