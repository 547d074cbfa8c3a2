use std::ops::Range;

use crate::parsing::{
    blocks::{BlockNode, classify_positions},
    parse_document, parse_window,
    rope::{BackingText, TextRange, utf16_len},
};

use super::{ChangeEvent, Document, Operation, Patch, diff, document::presentation_text};

/// Errors for operations that arrive from outside the process.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("range {range:?} is outside text of length {len}")]
    OutOfBounds { range: TextRange, len: usize },
    #[error("offset {0} splits a surrogate pair")]
    SplitsCharacter(usize),
}

/// Blocks touched by an edit, and where re-parsing starts.
#[derive(Debug, Clone, PartialEq, Eq)]
struct AffectedSpan {
    /// Indices of the old blocks the re-parse replaces.
    blocks: Range<usize>,
    /// Backing location (in the old text) where the re-parse window starts.
    window_start: usize,
    /// The edit starts a new line right after block `blocks.start - 1`.
    new_block: bool,
}

/// The incremental edit engine.
///
/// A `Controller` owns the backing text and the current block list, and
/// changes them only through [`Controller::replace_characters`].
///
/// ## Edit Pipeline
///
/// 1. **Locate**: find the blocks whose lines the edit touches
/// 2. **Splice**: replace the range in the backing text
/// 3. **Window**: the touched lines, resized by the change in length
/// 4. **Re-parse**: only the window, with absolute ranges
/// 5. **Diff**: the new blocks against the touched ones, by position
/// 6. **Cascade**: shift every later block by the change in length
/// 7. **Classify**: recompute positions over the whole list
/// 8. **Report**: an ordered list of [`ChangeEvent`]s
///
/// Only the window is parsed, so the cost of an edit depends on the lines it
/// touches rather than on the document size. Shifting later blocks is a
/// linear pass over their ranges.
///
/// ## Example
///
/// ```rust
/// # use canvas_native_engine::{ChangeEvent, Controller, TextRange};
/// let mut controller = Controller::with_text("⧙doc-heading⧘Title\nHello");
/// let patch = controller.replace_characters(TextRange::new(24, 0), "!");
/// assert!(matches!(patch.events[1], ChangeEvent::ReplacedContent { index: 1, .. }));
/// assert_eq!(controller.string(), "⧙doc-heading⧘Title\nHello!");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Controller {
    text: BackingText,
    blocks: Vec<BlockNode>,
    version: u64,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: &str) -> Self {
        let text = BackingText::new(text);
        let blocks = parse_document(&text).blocks;
        Self {
            text,
            blocks,
            version: 0,
        }
    }

    /// The current backing text.
    pub fn string(&self) -> String {
        self.text.to_string()
    }

    /// Length of the backing text in UTF-16 units.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn blocks(&self) -> &[BlockNode] {
        &self.blocks
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// A snapshot for range queries.
    pub fn document(&self) -> Document {
        Document::from_parts(self.text.clone(), self.blocks.clone())
    }

    /// Replaces the whole text.
    pub fn set_string(&mut self, text: &str) -> Patch {
        self.replace_characters(TextRange::new(0, self.text.len()), text)
    }

    /// Applies an operation from outside, checking its range first.
    pub fn apply(&mut self, op: &Operation) -> Result<Patch, ControllerError> {
        let range = op.range();
        let len = self.text.len();
        if range.max() > len {
            return Err(ControllerError::OutOfBounds { range, len });
        }
        for offset in [range.location, range.max()] {
            if !self.text.is_boundary(offset) {
                return Err(ControllerError::SplitsCharacter(offset));
            }
        }
        Ok(self.replace_characters(range, op.text()))
    }

    /// Replaces `range` of the backing text with `replacement` and returns
    /// the changes, in order.
    ///
    /// # Panics
    ///
    /// If `range` reaches past the end of the text or splits a surrogate
    /// pair. Use [`Controller::apply`] for unchecked input.
    pub fn replace_characters(&mut self, range: TextRange, replacement: &str) -> Patch {
        assert!(
            range.max() <= self.text.len(),
            "edit {range:?} is outside text of length {}",
            self.text.len()
        );
        assert!(
            self.text.is_boundary(range.location) && self.text.is_boundary(range.max()),
            "edit {range:?} splits a surrogate pair"
        );

        if range.is_empty() && replacement.is_empty() {
            return Patch {
                events: vec![],
                version: self.version,
            };
        }

        let inserted = utf16_len(replacement);
        let delta = inserted as isize - range.length as isize;

        let affected = self.affected_span(range, replacement);
        let window = self.reparse_window(&affected, range, inserted);
        let through_end = affected.blocks.end == self.blocks.len();
        let region = self.presentation_region(&affected, range);
        log::debug!(
            "replace {range:?} with {inserted} units: blocks {:?}, window {window:?}",
            affected.blocks
        );

        let before_text = self.text.clone();
        self.text.replace(range, replacement);
        let parsed = parse_window(&self.text, window, through_end);

        let old = std::mem::take(&mut self.blocks);
        let mut blocks = Vec::with_capacity(old.len() + parsed.len());
        blocks.extend_from_slice(&old[..affected.blocks.start]);
        blocks.extend(parsed.iter().cloned());
        for block in &old[affected.blocks.end..] {
            let mut block = block.clone();
            block.offset(delta);
            blocks.push(block);
        }
        if affected.new_block {
            // a last line gains the inserted terminator
            let owner = &mut blocks[affected.blocks.start - 1];
            if owner.new_line_range().is_none() {
                owner.enclosing_range.length += 1;
            }
        }
        classify_positions(&mut blocks);

        let mut events = block_events(
            (&before_text, &old),
            (&self.text, &blocks),
            &affected.blocks,
            parsed.len(),
        );

        // only the region's presentation text can change
        let presented_before = presentation_text(&before_text, region, &old[affected.blocks.clone()]);
        let presented_after = presentation_text(
            &self.text,
            TextRange::from_bounds(region.location, window.max()),
            &parsed,
        );
        if let Some((changed, text)) = diff::replacement(&presented_before, &presented_after) {
            let hidden_before: usize = old[..affected.blocks.start]
                .iter()
                .flat_map(|b| b.hidden_ranges())
                .map(|r| r.length)
                .sum();
            let base = region.location - hidden_before;
            events.push(ChangeEvent::ReplacedPresentationText {
                range: TextRange::new(base + changed.location, changed.length),
                replacement: text,
            });
        }

        self.blocks = blocks;
        self.version += 1;

        if !events.is_empty() {
            events.insert(0, ChangeEvent::WillUpdate);
            events.push(ChangeEvent::DidUpdate);
        }
        log::trace!("{} events, version {}", events.len(), self.version);

        Patch {
            events,
            version: self.version,
        }
    }

    /// Finds the blocks an edit touches.
    ///
    /// A point belongs to the block whose enclosing range holds it; the end
    /// of the text belongs to the last block.
    fn affected_span(&self, range: TextRange, replacement: &str) -> AffectedSpan {
        if self.blocks.is_empty() {
            return AffectedSpan {
                blocks: 0..0,
                window_start: 0,
                new_block: false,
            };
        }

        if range.is_empty()
            && replacement.starts_with('\n')
            && let Some(i) = self
                .blocks
                .iter()
                .position(|b| b.range.max() == range.location)
        {
            return AffectedSpan {
                blocks: i + 1..i + 1,
                window_start: range.location + 1,
                new_block: true,
            };
        }

        let first = self.block_index_containing(range.location);
        let last = self.block_index_containing(range.max()).max(first);
        AffectedSpan {
            blocks: first..last + 1,
            window_start: self.blocks[first].enclosing_range.location,
            new_block: false,
        }
    }

    fn block_index_containing(&self, point: usize) -> usize {
        self.blocks
            .partition_point(|b| b.enclosing_range.max() <= point)
            .min(self.blocks.len() - 1)
    }

    /// The window of the new text to re-parse.
    fn reparse_window(&self, affected: &AffectedSpan, range: TextRange, inserted: usize) -> TextRange {
        let new_len = self.text.len() - range.length + inserted;
        if self.blocks.is_empty() {
            return TextRange::new(0, new_len);
        }

        if affected.new_block {
            // the line that held the insertion point keeps its newline, now
            // after the inserted text
            let owner = &self.blocks[affected.blocks.start - 1];
            let end = range.location + inserted + usize::from(owner.new_line_range().is_some());
            return TextRange::from_bounds(affected.window_start, end);
        }

        let old_end = self.blocks[affected.blocks.end - 1].enclosing_range.max();
        let new_end = old_end + inserted - range.length;
        TextRange::from_bounds(affected.window_start, new_end)
    }

    /// The old backing text replaced by the re-parsed window. It starts where
    /// the window starts, or at the insertion point of a new line, and holds
    /// every hidden range of the affected blocks.
    fn presentation_region(&self, affected: &AffectedSpan, range: TextRange) -> TextRange {
        if self.blocks.is_empty() {
            return TextRange::new(0, 0);
        }
        if affected.new_block {
            let owner = &self.blocks[affected.blocks.start - 1];
            return TextRange::new(range.location, usize::from(owner.new_line_range().is_some()));
        }
        let end = self.blocks[affected.blocks.end - 1].enclosing_range.max();
        TextRange::from_bounds(affected.window_start, end)
    }
}

/// Diffs the re-parsed blocks against the ones they replace and reports
/// every block outside the span that moved or changed position.
///
/// Blocks hold ranges, not text, so blocks inside the span are compared
/// against both texts as well.
fn block_events(
    (old_text, old): (&BackingText, &[BlockNode]),
    (new_text, new): (&BackingText, &[BlockNode]),
    span: &Range<usize>,
    parsed: usize,
) -> Vec<ChangeEvent> {
    let same_text = |before: &BlockNode, after: &BlockNode| {
        old_text.slice(before.range) == new_text.slice(after.range)
    };

    // unchanged blocks at the start of the span
    let head = old[span.clone()]
        .iter()
        .zip(&new[span.start..span.start + parsed])
        .take_while(|(before, after)| before == after && same_text(*before, *after))
        .count();
    let first = span.start + head;
    let replaced = span.len() - head;
    let parsed = parsed - head;
    let mut events = Vec::new();

    let surplus_new = parsed.saturating_sub(replaced);
    let surplus_old = replaced.saturating_sub(parsed);

    for j in 0..surplus_new {
        events.push(ChangeEvent::InsertedBlock {
            block: new[first + j].clone(),
            index: first + j,
        });
    }
    for j in 0..surplus_old {
        events.push(ChangeEvent::RemovedBlock {
            block: old[first + j].clone(),
            index: first,
        });
    }

    for j in 0..replaced.min(parsed) {
        let before = &old[first + surplus_old + j];
        let after = &new[first + surplus_new + j];
        let index = first + surplus_new + j;
        let unchanged_text = same_text(before, after);
        if before == after && unchanged_text {
            continue;
        }
        if !before.kind.same_variant(&after.kind) {
            events.push(ChangeEvent::RemovedBlock {
                block: before.clone(),
                index,
            });
            events.push(ChangeEvent::InsertedBlock {
                block: after.clone(),
                index,
            });
        } else if unchanged_text && before.same_content(after) {
            events.push(ChangeEvent::UpdatedLocation {
                before: before.clone(),
                index,
                after: after.clone(),
            });
        } else {
            events.push(ChangeEvent::ReplacedContent {
                before: before.clone(),
                index,
                after: after.clone(),
            });
        }
    }

    let leading = (0..first).map(|i| (i, i));
    let trailing = (first + parsed..new.len()).map(|i| (i - parsed + replaced, i));
    for (old_index, index) in leading.chain(trailing) {
        if old[old_index] != new[index] {
            events.push(ChangeEvent::UpdatedLocation {
                before: old[old_index].clone(),
                index,
                after: new[index].clone(),
            });
        }
    }

    events
}
