/*!
 * # Editing
 *
 * Read-only snapshots and incremental edits over Canvas Native backing text.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: the backing text
 * - The document is stored once, as backing text in an **`xi_rope::Rope`**
 * - Structural markers live in that text; nothing is regenerated from blocks
 * - Saving writes the backing text verbatim
 *
 * ### 2. Incremental re-parsing
 * - Every change goes through **`Controller::replace_characters`**
 * - Only the lines touched by an edit are parsed again
 * - Blocks after the edit are shifted, never re-parsed
 *
 * ### 3. Ordered change events
 * - Each edit returns a **`Patch`**: `WillUpdate`, block events, an optional
 *   presentation text replacement, `DidUpdate`
 * - A consumer applying the events in order ends up with the same block list
 *
 * ### 4. Presentation text
 * - **`Document`** derives what an editor shows: backing text with hidden
 *   markers excised
 * - Ranges convert between backing and presentation coordinates
 *
 * ## Module Structure
 *
 * - **`controller`**: `Controller`, the incremental edit engine
 * - **`document`**: `Document` snapshot and range mapping
 * - **`patch`**: `Patch` and `ChangeEvent`
 * - **`operation`**: `Operation`, a serializable edit from outside
 * - **`diff`**: minimal single replacement between two strings
 *
 * ## Usage Pattern
 *
 * ```rust
 * use canvas_native_engine::editing::*;
 * use canvas_native_engine::TextRange;
 *
 * // 1. Load backing text
 * let mut controller = Controller::with_text("⧙doc-heading⧘Groceries\nMilk");
 *
 * // 2. Edit it
 * let patch = controller.replace_characters(TextRange::new(27, 0), " and eggs");
 * assert_eq!(patch.events.first(), Some(&ChangeEvent::WillUpdate));
 *
 * // 3. Read the presentation text
 * let doc = controller.document();
 * assert_eq!(doc.presentation_string(), "Groceries\nMilk and eggs");
 * ```
 */

pub mod controller;
pub mod diff;
pub mod document;
pub mod operation;
pub mod patch;

pub use controller::{Controller, ControllerError};
pub use document::Document;
pub use operation::Operation;
pub use patch::{ChangeEvent, Patch};
