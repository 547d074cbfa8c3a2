//! # Snapshot Support
//!
//! Utilities for testing and inspecting the parser.
//!
//! ## Modules
//!
//! - **`normalize`**: converts parsed blocks to a stable, serializable `Snap`
//!   with text previews, used by the fixture snapshot tests
//! - **`invariants`**: runtime checks for parser correctness (ranges in
//!   bounds, blocks tiling the text, spans tiling their parents, hidden and
//!   visible ranges covering each line)

pub mod invariants;
pub mod normalize;

pub use invariants::check as invariants;
pub use normalize::{BlockSnap, MarkerPairSnap, Snap, SpanSnap, normalize};
