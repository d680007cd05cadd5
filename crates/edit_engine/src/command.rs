//! Command system for document editing
//!
//! Commands never mutate the document they are given. Each one works on a
//! clone and hands back the new document and selection; the engine swaps
//! them in only when the command succeeds.

use crate::Result;
use doc_model::{Document, Point, Position, Selection};
use serde::{Deserialize, Serialize};

/// Result of applying a command
#[derive(Debug)]
pub struct CommandResult {
    /// The new document after the command
    pub document: Document,
    /// The new selection after the command
    pub selection: Selection,
}

impl CommandResult {
    /// Build a result with the caret collapsed at a point
    pub(crate) fn with_caret(document: Document, caret: Point) -> Result<Self> {
        let selection = Selection::collapsed(document.position(caret)?);
        Ok(Self {
            document,
            selection,
        })
    }
}

/// Trait for all editing commands
pub trait Command: std::fmt::Debug + Send + Sync {
    /// Apply this command to a document
    fn apply(&self, document: &Document, selection: &Selection) -> Result<CommandResult>;

    /// Get a display name for this command
    fn display_name(&self) -> &str;
}

/// Delete whatever the selection covers and return the collapsed caret.
///
/// Selection endpoints sit on run edges, so a placeholder is either wholly
/// inside the range or wholly outside it.
pub(crate) fn delete_selection(document: &mut Document, selection: &Selection) -> Result<Point> {
    let (start, end) = document.selection_points(selection)?;
    if start != end {
        document.delete_range(start, end)?;
    }
    Ok(start)
}

/// Insert text at the selection, replacing any selected content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertText {
    pub text: String,
}

impl InsertText {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Command for InsertText {
    fn apply(&self, document: &Document, selection: &Selection) -> Result<CommandResult> {
        let mut new_doc = document.clone();
        let at = delete_selection(&mut new_doc, selection)?;
        let caret = new_doc.insert_text(at, &self.text)?;
        CommandResult::with_caret(new_doc, caret)
    }

    fn display_name(&self) -> &str {
        "Insert Text"
    }
}

/// Delete a range between two positions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteRange {
    pub start: Position,
    pub end: Position,
}

impl DeleteRange {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Delete exactly what a selection covers
    pub fn from_selection(selection: &Selection) -> Self {
        Self::new(selection.anchor, selection.focus)
    }
}

impl Command for DeleteRange {
    fn apply(&self, document: &Document, _selection: &Selection) -> Result<CommandResult> {
        let mut new_doc = document.clone();
        let start = new_doc.point(&self.start)?;
        let end = new_doc.point(&self.end)?;
        new_doc.delete_range(start, end)?;
        CommandResult::with_caret(new_doc, start)
    }

    fn display_name(&self) -> &str {
        "Delete"
    }
}

/// Split the paragraph at the caret (Enter key)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SplitParagraph;

impl SplitParagraph {
    pub fn new() -> Self {
        Self
    }
}

impl Command for SplitParagraph {
    fn apply(&self, document: &Document, selection: &Selection) -> Result<CommandResult> {
        let mut new_doc = document.clone();
        let at = delete_selection(&mut new_doc, selection)?;
        let caret = new_doc.split_paragraph(at)?;
        CommandResult::with_caret(new_doc, caret)
    }

    fn display_name(&self) -> &str {
        "Split Paragraph"
    }
}
