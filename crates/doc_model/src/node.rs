//! Core node trait and types

use crate::NodeId;
use serde::{Deserialize, Serialize};

/// Kinds of nodes in a template document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeType {
    Paragraph,
    Text,
    Placeholder,
}

/// Common interface for paragraphs and runs
pub trait Node: std::fmt::Debug {
    /// Get the unique ID of this node
    fn id(&self) -> NodeId;

    /// Get the type of this node
    fn node_type(&self) -> NodeType;

    /// Editable text held by this node, if it has any
    fn text_content(&self) -> Option<&str> {
        None
    }
}
