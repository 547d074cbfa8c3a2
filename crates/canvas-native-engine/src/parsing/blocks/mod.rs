//! # Block Parsing
//!
//! Line-oriented block parsing: every line of backing text is exactly one
//! block.
//!
//! ## Parsing Phases
//!
//! 1. **Opening** (`open`): each line is offered to the rules in
//!    `BLOCK_PARSE_ORDER`; the first that accepts builds the block, and
//!    container blocks get their inline spans
//! 2. **Positional classification** (`classify`): one pass over the whole
//!    block list tags runs of same-type positionable blocks
//!
//! ## Modules
//!
//! - **`types`**: `BlockNode`, `BlockKind`, `Position` and capability helpers
//! - **`kinds`**: block kinds with owned markers and prefix tokens
//! - **`open`**: the rule table and `open_block`
//! - **`classify`**: `classify_positions`
//!
//! ## Key Invariants
//!
//! - Block rules are mutually exclusive; Paragraph is the fallback
//! - A line with an unrecognized marker is a `Malformed` block, never dropped
//! - `native_prefix_range` and `visible_range` together cover `range`

pub mod classify;
pub mod kinds;
pub mod open;
pub mod types;

pub use classify::classify_positions;
pub use open::{BLOCK_PARSE_ORDER, open_block};
pub use types::{Attachment, BlockKind, BlockNode, ChecklistState, Position};
