// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
use canvas_native_engine::{
    ChecklistState,
    parsing::blocks::kinds::{Blockquote, ChecklistItem, CodeBlock, OrderedListItem, Title, UnorderedListItem},
};

/// A document of `sections` repeated sections, one of every block kind each.
#[allow(dead_code)]
pub fn generate_document(sections: usize) -> String {
    let mut lines = vec![Title::markup("Benchmark")];
    for section in 0..sections {
        lines.push(format!("# Section {section}"));
        lines.push("Paragraph with *some* **inline** `content` and a [link](https://example.com).".into());
        lines.push(Blockquote::markup("Quoted ~~text~~ here"));
        for i in 0..3 {
            lines.push(UnorderedListItem::markup(i % 2, &format!("Bullet {i}")));
        }
        for i in 0..3u64 {
            lines.push(OrderedListItem::markup(0, i + 1, &format!("Step {i}")));
        }
        lines.push(ChecklistItem::markup(0, ChecklistState::Unchecked, "Todo"));
        lines.push(ChecklistItem::markup(0, ChecklistState::Checked, "Done"));
        lines.push(CodeBlock::markup(Some("rust"), "fn example() {"));
        lines.push(CodeBlock::markup(Some("rust"), "    println!(\"*raw*\");"));
        lines.push(CodeBlock::markup(Some("rust"), "}"));
        lines.push("A ☊co|c1☋commented☊Ωco|c1☋ line".into());
    }
    lines.join("\n")
}
