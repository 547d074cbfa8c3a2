//! # Parsing
//!
//! Backing text to block list. Block rules run once per line; container
//! blocks then inline-parse their text; a final pass tags positional runs.
//!
//! - [`parse`] / [`parse_document`] parse a whole text
//! - [`parse_window`] parses a line-aligned window with absolute ranges and
//!   is what the controller uses after an edit

pub mod blocks;
pub mod inline;
pub mod node;
pub mod rope;
pub mod snapshot;

use blocks::{BlockNode, classify_positions, open_block};
use rope::{BackingText, TextRange, lines_in_window};

/// A fully parsed document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDoc {
    pub blocks: Vec<BlockNode>,
}

pub fn parse_document(text: &BackingText) -> ParsedDoc {
    let mut blocks = parse_window(text, TextRange::new(0, text.len()), true);
    classify_positions(&mut blocks);
    log::trace!("parsed {} blocks from {} units", blocks.len(), text.len());
    ParsedDoc { blocks }
}

/// Convenience: parse a string into its block list.
pub fn parse(text: &str) -> Vec<BlockNode> {
    parse_document(&BackingText::new(text)).blocks
}

/// Parses the lines inside `window` without positional classification.
///
/// `window` must start at a line start and end at a line end of `text`.
/// `through_end` is set when the window runs through the last line, which
/// is the only way to include the empty line after a trailing `\n`.
pub fn parse_window(text: &BackingText, window: TextRange, through_end: bool) -> Vec<BlockNode> {
    lines_in_window(text, window, through_end)
        .iter()
        .map(open_block)
        .collect()
}

#[cfg(test)]
mod tests;
