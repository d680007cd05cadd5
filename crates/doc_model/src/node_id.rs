//! Stable identity for paragraphs and runs

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a paragraph or run.
///
/// Ids survive edits that do not replace the node itself, which lets the
/// editing surface keep track of a run across a split or an insertion next
/// to it. Document equality never looks at ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
