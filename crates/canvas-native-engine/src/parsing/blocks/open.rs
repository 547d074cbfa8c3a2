use crate::parsing::{
    inline::{pair_markers, parse_inline},
    rope::LineRef,
};

use super::{
    kinds::{
        Blockquote, ChecklistItem, CodeBlock, Heading, Image, Malformed, OrderedListItem,
        Paragraph, Title, UnorderedListItem,
    },
    types::BlockNode,
};

/// One entry of the block rule table.
pub struct BlockRule {
    pub name: &'static str,
    pub parse: fn(&LineRef) -> Option<BlockNode>,
}

/// Block rules in precedence order. Rules are mutually exclusive, so the
/// order only matters for speed and for the Paragraph fallback coming last.
pub static BLOCK_PARSE_ORDER: &[BlockRule] = &[
    BlockRule {
        name: "blockquote",
        parse: Blockquote::parse,
    },
    BlockRule {
        name: "checklist_item",
        parse: ChecklistItem::parse,
    },
    BlockRule {
        name: "code_block",
        parse: CodeBlock::parse,
    },
    BlockRule {
        name: "title",
        parse: Title::parse,
    },
    BlockRule {
        name: "heading",
        parse: Heading::parse,
    },
    BlockRule {
        name: "image",
        parse: Image::parse,
    },
    BlockRule {
        name: "ordered_list_item",
        parse: OrderedListItem::parse,
    },
    BlockRule {
        name: "unordered_list_item",
        parse: UnorderedListItem::parse,
    },
    BlockRule {
        name: "paragraph",
        parse: Paragraph::parse,
    },
];

/// Builds the block for one line, inline spans included.
///
/// Never fails: a line with an unrecognized marker becomes a malformed
/// block.
pub fn open_block(line: &LineRef) -> BlockNode {
    let mut block = BLOCK_PARSE_ORDER
        .iter()
        .find_map(|rule| (rule.parse)(line))
        .unwrap_or_else(|| {
            log::warn!(
                "unrecognized structural marker at {:?}: {:?}",
                line.range,
                line.text
            );
            Malformed::parse(line)
        });

    if block.kind.is_container() {
        block.spans = parse_inline(&line.text, line.range.location, block.text_range);
        block.inline_marker_pairs = pair_markers(&block.spans);
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::{
        blocks::types::{BlockKind, ChecklistState},
        rope::{BackingText, TextRange, lines_with_ranges},
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn line(text: &str) -> LineRef {
        lines_with_ranges(&BackingText::new(text)).remove(0)
    }

    #[rstest]
    #[case("⧙blockquote⧘> quoted", "blockquote")]
    #[case("⧙checklist-0⧘- [ ] todo", "checklist_item")]
    #[case("⧙checklist-1⧘- [x] done", "checklist_item")]
    #[case("⧙code⧘let x = 1;", "code_block")]
    #[case("⧙code-rust⧘fn main() {}", "code_block")]
    #[case("⧙doc-heading⧘Title", "title")]
    #[case("## Section", "heading")]
    #[case("⧙image-{\"url\":\"http://x/y.png\"}⧘", "image")]
    #[case("⧙ordered-list-0⧘1. first", "ordered_list_item")]
    #[case("⧙unordered-list-2⧘- item", "unordered_list_item")]
    #[case("Just text", "paragraph")]
    #[case("", "paragraph")]
    fn exactly_one_rule_matches(#[case] text: &str, #[case] expected: &str) {
        let l = line(text);
        let matched: Vec<&str> = BLOCK_PARSE_ORDER
            .iter()
            .filter(|rule| (rule.parse)(&l).is_some())
            .map(|rule| rule.name)
            .collect();
        assert_eq!(matched, vec![expected]);
        assert_eq!(open_block(&l).kind.name(), expected);
    }

    #[rstest]
    #[case("⧙mystery⧘text")]
    #[case("⧙unterminated")]
    #[case("⧙blockquote⧘no token")]
    #[case("⧙checklist-0⧘- [?] odd")]
    #[case("⧙image-{not json}⧘")]
    #[case("⧙code-⧘x")]
    fn unknown_markers_are_malformed(#[case] text: &str) {
        let l = line(text);
        let block = open_block(&l);
        assert_eq!(block.kind, BlockKind::Malformed);
        assert_eq!(block.visible_range, l.range);
        assert_eq!(block.native_prefix_range, None);
        assert!(block.spans.is_empty());
    }

    #[test]
    fn title_ranges() {
        let block = open_block(&line("⧙doc-heading⧘Title"));
        assert_eq!(block.kind, BlockKind::Title);
        assert_eq!(block.native_prefix_range, Some(TextRange::new(0, 13)));
        assert_eq!(block.visible_range, TextRange::new(13, 5));
    }

    #[test]
    fn checklist_ranges() {
        let block = open_block(&line("⧙checklist-0⧘- [x] Done"));
        assert_eq!(
            block.kind,
            BlockKind::ChecklistItem {
                indentation: 0,
                state: ChecklistState::Checked
            }
        );
        assert_eq!(block.native_prefix_range, Some(TextRange::new(0, 19)));
        assert_eq!(block.prefix_range, Some(TextRange::new(13, 6)));
        assert_eq!(block.indentation_range, Some(TextRange::new(11, 1)));
        assert_eq!(block.visible_range, TextRange::new(19, 4));
    }

    #[test]
    fn ordered_list_ranges() {
        let block = open_block(&line("⧙ordered-list-1⧘12. Twelfth"));
        assert_eq!(
            block.kind,
            BlockKind::OrderedListItem {
                indentation: 1,
                number: 12
            }
        );
        assert_eq!(block.native_prefix_range, Some(TextRange::new(0, 20)));
        assert_eq!(block.visible_range, TextRange::new(20, 7));
    }

    #[test]
    fn unordered_list_prefix_is_twenty_units() {
        let block = open_block(&line("⧙unordered-list-0⧘- A"));
        assert_eq!(block.native_prefix_range, Some(TextRange::new(0, 20)));
        assert_eq!(block.visible_range, TextRange::new(20, 1));
    }

    #[test]
    fn code_block_language_and_raw_content() {
        let block = open_block(&line("⧙code-rust⧘let *x* = 1;"));
        assert_eq!(
            block.kind,
            BlockKind::CodeBlock {
                language: Some("rust".into())
            }
        );
        assert!(block.spans.is_empty());
    }

    #[test]
    fn image_hides_whole_line() {
        let text = "⧙image-{\"url\":\"http://x/y.png\",\"width\":10}⧘";
        let block = open_block(&line(text));
        let BlockKind::Image { attachment } = &block.kind else {
            panic!("expected image");
        };
        assert_eq!(attachment.url.as_deref(), Some("http://x/y.png"));
        assert_eq!(attachment.width, Some(10));
        assert_eq!(block.native_prefix_range, Some(block.range));
        assert_eq!(block.visible_range, TextRange::new(block.range.max(), 0));
    }

    #[test]
    fn paragraph_spans_and_marker_pairs() {
        let block = open_block(&line("a ☊co|c1☋*b*☊Ωco|c1☋"));
        assert_eq!(block.kind, BlockKind::Paragraph);
        let kinds: Vec<&str> = block.spans.roots().map(|(_, n)| n.kind.name()).collect();
        assert_eq!(kinds, vec!["text", "inline_marker", "emphasis", "inline_marker"]);
        assert_eq!(block.inline_marker_pairs.len(), 1);
        assert_eq!(block.inline_marker_pairs[0].content_range(), TextRange::new(9, 3));
    }
}
