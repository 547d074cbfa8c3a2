//! # Block Kinds
//!
//! Block-specific types that own their syntax: each knows its structural
//! marker tag, its prefix token and how to build a [`BlockNode`] from a
//! line. Each also offers `markup()` to write that syntax back.
//!
//! ## Types
//!
//! - **`NativePrefix`**: `⧙tag⧘` marker splitting shared by every kind below
//! - **`Title`**: `⧙doc-heading⧘`
//! - **`Heading`**: `#` .. `######`, visible
//! - **`CodeBlock`**: `⧙code⧘` / `⧙code-<lang>⧘`
//! - **`Blockquote`**: `⧙blockquote⧘> `
//! - **`ChecklistItem`**: `⧙checklist-<n>⧘- [ ] `
//! - **`OrderedListItem`**: `⧙ordered-list-<n>⧘1. `
//! - **`UnorderedListItem`**: `⧙unordered-list-<n>⧘- `
//! - **`Image`**: `⧙image-<json>⧘`
//! - **`Paragraph`** / **`Malformed`**: fallbacks
//!
//! [`BlockNode`]: super::types::BlockNode

pub mod blockquote;
pub mod checklist;
pub mod code_block;
pub mod heading;
pub mod image;
pub mod native;
pub mod ordered_list;
pub mod paragraph;
pub mod title;
pub mod unordered_list;

pub use blockquote::Blockquote;
pub use checklist::ChecklistItem;
pub use code_block::CodeBlock;
pub use heading::Heading;
pub use image::Image;
pub use native::{NativePrefix, NativeTag};
pub use ordered_list::OrderedListItem;
pub use paragraph::{Malformed, Paragraph};
pub use title::Title;
pub use unordered_list::UnorderedListItem;
