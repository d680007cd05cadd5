//! Render item types

use doc_model::NodeId;
use serde::{Deserialize, Serialize};

/// A presentational item for the editing surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderItem {
    /// Literal text
    Text {
        /// Id of the source run
        id: NodeId,
        text: String,
    },
    /// An atomic placeholder chip
    Placeholder {
        /// Id of the source run
        id: NodeId,
        /// Raw key, delimiters included
        raw_key: String,
        /// Mapped display value, or `"?"` when unmapped
        title: String,
    },
}

impl RenderItem {
    pub fn id(&self) -> NodeId {
        match self {
            RenderItem::Text { id, .. } | RenderItem::Placeholder { id, .. } => *id,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, RenderItem::Placeholder { .. })
    }
}

/// Render items for one paragraph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParagraphRender {
    pub paragraph_id: NodeId,
    pub items: Vec<RenderItem>,
}
