use serde::{Deserialize, Serialize};

use crate::parsing::rope::TextRange;

/// An edit arriving from outside the controller, local or remote, already
/// resolved to a position in the current backing text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Operation {
    Insert { location: usize, text: String },
    Remove { location: usize, length: usize },
}

impl Operation {
    /// The backing range this operation replaces.
    #[must_use]
    pub fn range(&self) -> TextRange {
        match self {
            Operation::Insert { location, .. } => TextRange::new(*location, 0),
            Operation::Remove { location, length } => TextRange::new(*location, *length),
        }
    }

    /// The replacement text.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Operation::Insert { text, .. } => text,
            Operation::Remove { .. } => "",
        }
    }
}
