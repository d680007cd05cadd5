//! Selection model - caret positions and selections

use serde::{Deserialize, Serialize};

/// A run-relative caret position as reported by the editing surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Index of the paragraph in the document
    pub paragraph: usize,
    /// Index of the run within the paragraph
    pub run: usize,
    /// Offset within the run: characters for text, `0` or `1` for a placeholder
    pub offset: usize,
}

impl Position {
    pub fn new(paragraph: usize, run: usize, offset: usize) -> Self {
        Self {
            paragraph,
            run,
            offset,
        }
    }

    /// The very start of a paragraph
    pub fn start_of(paragraph: usize) -> Self {
        Self::new(paragraph, 0, 0)
    }
}

/// A resolved caret location: paragraph index plus column.
///
/// Unlike [`Position`], a point has exactly one spelling per caret location,
/// so points order and compare the way the caret moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub paragraph: usize,
    pub column: usize,
}

impl Point {
    pub fn new(paragraph: usize, column: usize) -> Self {
        Self { paragraph, column }
    }
}

/// A selection in the document
///
/// A selection has an anchor (where the selection started) and a focus
/// (where the caret is). When anchor == focus the selection is collapsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub anchor: Position,
    pub focus: Position,
}

impl Selection {
    pub fn new(anchor: Position, focus: Position) -> Self {
        Self { anchor, focus }
    }

    /// A caret with nothing selected
    pub fn collapsed(position: Position) -> Self {
        Self {
            anchor: position,
            focus: position,
        }
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor == self.focus
    }

    /// Collapse the selection to the focus position
    pub fn collapse_to_focus(&self) -> Self {
        Self::collapsed(self.focus)
    }
}

impl Default for Selection {
    fn default() -> Self {
        Self::collapsed(Position::start_of(0))
    }
}
