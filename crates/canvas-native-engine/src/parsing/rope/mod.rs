pub mod lines;
pub mod range;
pub mod slice;
pub mod text;

pub use lines::{LineRef, lines_in_window, lines_with_ranges};
pub use range::TextRange;
pub use slice::preview;
pub use text::{BackingText, utf16_len, utf16_to_byte};
