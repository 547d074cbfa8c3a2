//! Tests for the parsing module as a whole.
//!
//! Uses snapshot testing with YAML format for readability.
//! Fixtures (`.cn`) and snapshots (`.snap`) are co-located in `fixtures/`;
//! every fixture is also checked against the parser invariants.

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::parsing::{
    blocks::BlockKind,
    parse, parse_document, parse_window,
    rope::{BackingText, TextRange},
    snapshot::{invariants, normalize},
};

fn fixtures_dir() -> String {
    format!("{}/src/parsing/tests/fixtures", env!("CARGO_MANIFEST_DIR"))
}

fn fixture(name: &str) -> BackingText {
    let path = format!("{}/{name}.cn", fixtures_dir());
    BackingText::new(&std::fs::read_to_string(path).unwrap())
}

// Fixture-based snapshot tests

#[test]
fn fixture_checklist() {
    assert_fixture("checklist");
}

#[test]
fn fixture_mixed() {
    assert_fixture("mixed");
}

#[test]
fn fixture_lists() {
    assert_fixture("lists");
}

#[test]
fn fixture_markers() {
    assert_fixture("markers");
}

fn assert_fixture(name: &str) {
    let text = fixture(name);
    let doc = parse_document(&text);
    invariants(&text, &doc.blocks);

    let snap = normalize(&text, &doc.blocks);
    let dir = fixtures_dir();
    insta::with_settings!({
        snapshot_path => dir.as_str(),
        prepend_module_to_snapshot => false,
    }, {
        insta::assert_yaml_snapshot!(name, snap);
    });
}

#[test]
fn fixture_code_is_raw() {
    let text = fixture("mixed");
    let doc = parse_document(&text);
    for block in doc.blocks.iter().filter(|b| matches!(b.kind, BlockKind::CodeBlock { .. })) {
        assert!(block.spans.is_empty());
    }
}

/// Slicing any block's ranges from the text reproduces the exact line.
#[test]
fn lossless_ranges() {
    let text = fixture("mixed");
    let source = text.to_string();
    let lines: Vec<&str> = source.split('\n').collect();
    let doc = parse_document(&text);
    assert_eq!(doc.blocks.len(), lines.len());
    for (block, line) in doc.blocks.iter().zip(lines) {
        assert_eq!(text.slice(block.range), line);
    }
}

#[test]
fn empty_document() {
    assert!(parse("").is_empty());
}

#[test]
fn newlines_only_are_empty_paragraphs() {
    let blocks = parse("\n\n");
    assert_eq!(blocks.len(), 3);
    assert!(blocks.iter().all(|b| b.kind == BlockKind::Paragraph && b.range.is_empty()));
    assert_eq!(blocks[2].range, TextRange::new(2, 0));
    assert_eq!(blocks[2].new_line_range(), None);
}

#[rstest]
#[case("plain words")]
#[case("   indented")]
#[case("#not a heading")]
#[case("> not a native quote")]
#[case("- not a native list")]
#[case("x ⧙ marker later in the line")]
fn lines_without_lead_delimiter_are_paragraphs(#[case] line: &str) {
    let blocks = parse(line);
    assert_eq!(blocks.len(), 1);
    assert_eq!(blocks[0].kind, BlockKind::Paragraph);
    assert_eq!(blocks[0].visible_range, blocks[0].range);
}

#[test]
fn reparse_is_idempotent() {
    for name in ["checklist", "mixed", "lists", "markers"] {
        let text = fixture(name);
        let first = parse_document(&text);
        let again = parse_document(&BackingText::new(&text.to_string()));
        assert_eq!(first, again, "fixture {name}");
    }
}

#[test]
fn window_matches_full_parse() {
    let text = fixture("checklist");
    let full = parse_document(&text).blocks;
    // lines 2..=3
    let window = full[2].enclosing_range.union(full[3].enclosing_range);
    let partial = parse_window(&text, window, false);
    assert_eq!(partial.len(), 2);
    assert_eq!(partial[0].range, full[2].range);
    assert_eq!(partial[1].spans, full[3].spans);
}

#[test]
fn utf16_offsets_after_emoji() {
    let text = fixture("markers");
    let doc = parse_document(&text);
    let second = &doc.blocks[1];
    // "😀 emoji " is 9 units
    let (_, em) = second.spans.roots().nth(1).unwrap();
    assert_eq!(em.range, TextRange::new(second.range.location + 9, 7));
    assert_eq!(text.slice(em.range), "_first_");
}
