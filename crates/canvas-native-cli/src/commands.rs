use anyhow::{Context, Result};
use canvas_native_engine::{BlockNode, ChangeEvent, Controller, Document, Operation, TextRange};
use serde_json::{Value, json};
use std::path::Path;

fn range(r: TextRange) -> String {
    format!("[{}, {})", r.location, r.max())
}

fn describe_block(block: &BlockNode) -> String {
    match block.position {
        Some(position) => format!("{} {} {:?}", block.kind.name(), range(block.range), position),
        None => format!("{} {}", block.kind.name(), range(block.range)),
    }
}

/// One line per event, as printed by `replay`.
pub fn format_event(event: &ChangeEvent) -> String {
    match event {
        ChangeEvent::WillUpdate | ChangeEvent::DidUpdate => event.name().to_string(),
        ChangeEvent::InsertedBlock { block, index } | ChangeEvent::RemovedBlock { block, index } => {
            format!("{} #{index} {}", event.name(), describe_block(block))
        }
        ChangeEvent::ReplacedContent { before, index, after }
        | ChangeEvent::UpdatedLocation { before, index, after } => format!(
            "{} #{index} {} -> {}",
            event.name(),
            describe_block(before),
            describe_block(after)
        ),
        ChangeEvent::ReplacedPresentationText { range: r, replacement } => {
            format!("{} {} {replacement:?}", event.name(), range(*r))
        }
    }
}

/// The dump of a document: its blocks and presentation text.
pub fn dump_value(text: &str) -> Value {
    let doc = Document::new(text);
    let blocks: Vec<Value> = doc.blocks().iter().map(BlockNode::dictionary).collect();
    json!({
        "blocks": blocks,
        "presentation": doc.presentation_string(),
    })
}

pub fn dump(text: &str, pretty: bool) -> Result<String> {
    let value = dump_value(text);
    let out = if pretty {
        serde_json::to_string_pretty(&value)?
    } else {
        serde_json::to_string(&value)?
    };
    Ok(out)
}

/// Applies `ops` to `text` in order, returning the printed event log and the
/// final presentation text.
pub fn replay(text: &str, ops: &[Operation]) -> Result<Vec<String>> {
    let mut controller = Controller::with_text(text);
    let mut lines = Vec::new();
    for (i, op) in ops.iter().enumerate() {
        let patch = controller
            .apply(op)
            .with_context(|| format!("operation {i} ({op:?})"))?;
        lines.push(format!("-- op {i} -> version {}", patch.version));
        lines.extend(patch.events.iter().map(format_event));
    }
    lines.push(format!(
        "-- presentation: {:?}",
        controller.document().presentation_string()
    ));
    Ok(lines)
}

pub fn read_operations(path: &Path) -> Result<Vec<Operation>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading operations from {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("parsing operations in {}", path.display()))
}
