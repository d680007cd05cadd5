//! Runs - the leaves of a paragraph
//!
//! A run is either editable text or an atomic placeholder. Placeholders
//! have no interior: the editing surface can select or delete one as a
//! whole, never a part of it.

use crate::{Node, NodeId, NodeType};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// Freely editable text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRun {
    #[serde(default)]
    id: NodeId,
    /// The text content of this run
    pub text: String,
}

impl TextRun {
    /// Create a new text run
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            text: text.into(),
        }
    }

    /// Create an empty text run
    pub fn empty() -> Self {
        Self::new(String::new())
    }

    /// Length of the text in characters
    pub fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Byte index of a character offset, clamped to the end of the text
    fn byte_index(&self, char_offset: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_offset)
            .map(|(i, _)| i)
            .unwrap_or(self.text.len())
    }

    /// Split at a character offset.
    ///
    /// `self` keeps the head and its identity; the tail becomes a new run.
    pub fn split_off(&mut self, char_offset: usize) -> TextRun {
        let at = self.byte_index(char_offset);
        TextRun::new(self.text.split_off(at))
    }

    /// Insert text at a character offset
    pub fn insert_str(&mut self, char_offset: usize, text: &str) {
        let at = self.byte_index(char_offset);
        self.text.insert_str(at, text);
    }

    /// Remove a range of characters
    pub fn remove_chars(&mut self, range: Range<usize>) {
        let start = self.byte_index(range.start);
        let end = self.byte_index(range.end);
        self.text.replace_range(start..end, "");
    }
}

impl PartialEq for TextRun {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for TextRun {}

impl Node for TextRun {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Text
    }

    fn text_content(&self) -> Option<&str> {
        Some(&self.text)
    }
}

/// An atomic interpolation placeholder such as `{{ name }}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceholderRun {
    #[serde(default)]
    id: NodeId,
    /// Exact source text of the tag, delimiters included
    raw_key: String,
}

impl PlaceholderRun {
    pub fn new(raw_key: impl Into<String>) -> Self {
        Self {
            id: NodeId::new(),
            raw_key: raw_key.into(),
        }
    }

    /// The raw key, used both for attribute lookup and for serialization
    pub fn raw_key(&self) -> &str {
        &self.raw_key
    }
}

impl PartialEq for PlaceholderRun {
    fn eq(&self, other: &Self) -> bool {
        self.raw_key == other.raw_key
    }
}

impl Eq for PlaceholderRun {}

impl Node for PlaceholderRun {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Placeholder
    }
}

/// A paragraph child
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Run {
    Text(TextRun),
    Placeholder(PlaceholderRun),
}

impl Run {
    /// Shorthand for a text run
    pub fn text(text: impl Into<String>) -> Self {
        Run::Text(TextRun::new(text))
    }

    /// Shorthand for a placeholder run
    pub fn placeholder(raw_key: impl Into<String>) -> Self {
        Run::Placeholder(PlaceholderRun::new(raw_key))
    }

    /// Number of caret columns this run occupies.
    ///
    /// Text occupies one column per character; a placeholder occupies one.
    pub fn width(&self) -> usize {
        match self {
            Run::Text(t) => t.char_len(),
            Run::Placeholder(_) => 1,
        }
    }

    /// The text this run contributes to the template source
    pub fn source_text(&self) -> &str {
        match self {
            Run::Text(t) => &t.text,
            Run::Placeholder(p) => p.raw_key(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Run::Placeholder(_))
    }

    pub fn as_text(&self) -> Option<&TextRun> {
        match self {
            Run::Text(t) => Some(t),
            Run::Placeholder(_) => None,
        }
    }

    pub fn as_placeholder(&self) -> Option<&PlaceholderRun> {
        match self {
            Run::Placeholder(p) => Some(p),
            Run::Text(_) => None,
        }
    }
}

impl Node for Run {
    fn id(&self) -> NodeId {
        match self {
            Run::Text(t) => t.id(),
            Run::Placeholder(p) => p.id(),
        }
    }

    fn node_type(&self) -> NodeType {
        match self {
            Run::Text(t) => t.node_type(),
            Run::Placeholder(p) => p.node_type(),
        }
    }

    fn text_content(&self) -> Option<&str> {
        match self {
            Run::Text(t) => t.text_content(),
            Run::Placeholder(p) => p.text_content(),
        }
    }
}
