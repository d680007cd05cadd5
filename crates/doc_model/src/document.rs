//! Document root and document-level editing primitives

use crate::{
    DocModelError, Paragraph, PlaceholderRun, Point, Position, Result, Run, Selection,
};
use serde::{Deserialize, Serialize};

/// An ordered, never-empty list of paragraphs.
///
/// Serializes as a bare array of paragraphs. Equality is structural: ids and
/// the version counter are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<Paragraph>", into = "Vec<Paragraph>")]
pub struct Document {
    paragraphs: Vec<Paragraph>,
    /// Version counter for tracking changes
    version: u64,
}

impl Document {
    /// Create a document with a single empty paragraph
    pub fn new() -> Self {
        Self::from_paragraphs(Vec::new())
    }

    /// Create a document from paragraphs, adding an empty one if there are none
    pub fn from_paragraphs(paragraphs: Vec<Paragraph>) -> Self {
        let mut doc = Self {
            paragraphs,
            version: 0,
        };
        doc.ensure_paragraph();
        doc
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    fn increment_version(&mut self) {
        self.version += 1;
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Iterate over every placeholder in document order
    pub fn placeholders(&self) -> impl Iterator<Item = &PlaceholderRun> {
        self.paragraphs.iter().flat_map(Paragraph::placeholders)
    }

    fn paragraph_mut(&mut self, index: usize) -> Result<&mut Paragraph> {
        let count = self.paragraphs.len();
        self.paragraphs
            .get_mut(index)
            .ok_or(DocModelError::ParagraphOutOfRange { index, count })
    }

    /// Restore the at-least-one-paragraph invariant. Returns true if a
    /// repair was needed.
    pub fn ensure_paragraph(&mut self) -> bool {
        if self.paragraphs.is_empty() {
            self.paragraphs.push(Paragraph::new());
            return true;
        }
        false
    }

    /// Resolve a run-relative position to a point
    pub fn point(&self, position: &Position) -> Result<Point> {
        let invalid = DocModelError::InvalidPosition {
            paragraph: position.paragraph,
            run: position.run,
            offset: position.offset,
        };
        let para = self.paragraphs.get(position.paragraph).ok_or(invalid.clone())?;
        let column = para.column_of(position.run, position.offset).ok_or(invalid)?;
        Ok(Point::new(position.paragraph, column))
    }

    /// Canonical run-relative position of a point
    pub fn position(&self, point: Point) -> Result<Position> {
        let para = self.paragraphs.get(point.paragraph).ok_or(
            DocModelError::ParagraphOutOfRange {
                index: point.paragraph,
                count: self.paragraphs.len(),
            },
        )?;
        let (run, offset) = para.position_at(point.column);
        Ok(Position::new(point.paragraph, run, offset))
    }

    /// Resolve a selection to ordered (start, end) points
    pub fn selection_points(&self, selection: &Selection) -> Result<(Point, Point)> {
        let anchor = self.point(&selection.anchor)?;
        let focus = self.point(&selection.focus)?;
        Ok(if anchor <= focus {
            (anchor, focus)
        } else {
            (focus, anchor)
        })
    }

    /// The point after the last column of the last paragraph
    pub fn end_point(&self) -> Point {
        let last = self.paragraphs.len() - 1;
        Point::new(last, self.paragraphs[last].width())
    }

    fn check_point(&self, point: Point) -> Result<()> {
        let para = self.paragraphs.get(point.paragraph).ok_or(
            DocModelError::ParagraphOutOfRange {
                index: point.paragraph,
                count: self.paragraphs.len(),
            },
        )?;
        if point.column > para.width() {
            return Err(DocModelError::InvalidRange(format!(
                "column {} is past the end of paragraph {} (width {})",
                point.column,
                point.paragraph,
                para.width()
            )));
        }
        Ok(())
    }

    /// Delete everything between two points.
    ///
    /// A range spanning paragraphs joins the tail of the last paragraph onto
    /// the head of the first. The document keeps at least one paragraph.
    pub fn delete_range(&mut self, start: Point, end: Point) -> Result<Vec<Run>> {
        self.check_point(start)?;
        self.check_point(end)?;
        if start > end {
            return Err(DocModelError::InvalidRange(format!(
                "start {:?} is after end {:?}",
                start, end
            )));
        }
        if start == end {
            return Ok(Vec::new());
        }

        let removed = if start.paragraph == end.paragraph {
            self.paragraph_mut(start.paragraph)?
                .delete_columns(start.column..end.column)
        } else {
            let tail = self.paragraph_mut(end.paragraph)?.split_off(end.column);
            let head = self.paragraph_mut(start.paragraph)?;
            let mut removed: Vec<Run> = head.split_off(start.column).runs().to_vec();
            for para in self.paragraphs.drain(start.paragraph + 1..=end.paragraph) {
                removed.extend(para.runs().iter().cloned());
            }
            self.paragraph_mut(start.paragraph)?.append(tail);
            removed
        };

        if self.ensure_paragraph() {
            tracing::warn!("delete_range left the document without paragraphs; repaired");
        }
        self.increment_version();
        Ok(removed)
    }

    /// Split the paragraph at a point; returns the start of the new paragraph
    pub fn split_paragraph(&mut self, at: Point) -> Result<Point> {
        self.check_point(at)?;
        let next = self.split_at(at)?;
        self.increment_version();
        Ok(next)
    }

    fn split_at(&mut self, at: Point) -> Result<Point> {
        let tail = self.paragraph_mut(at.paragraph)?.split_off(at.column);
        self.paragraphs.insert(at.paragraph + 1, tail);
        Ok(Point::new(at.paragraph + 1, 0))
    }

    /// Insert text at a point; line breaks start new paragraphs and a `\r`
    /// directly before a `\n` is dropped. Returns the point after the
    /// inserted text.
    pub fn insert_text(&mut self, at: Point, text: &str) -> Result<Point> {
        self.check_point(at)?;
        let mut point = at;
        let mut lines = text.split('\n').peekable();
        while let Some(line) = lines.next() {
            let line = match lines.peek() {
                Some(_) => line.strip_suffix('\r').unwrap_or(line),
                None => line,
            };
            self.paragraph_mut(point.paragraph)?.insert_text(point.column, line);
            point.column += line.chars().count();
            if lines.peek().is_some() {
                point = self.split_at(point)?;
            }
        }
        self.increment_version();
        Ok(point)
    }

    /// Insert an atomic placeholder at a point; returns the point after it
    pub fn insert_placeholder(&mut self, at: Point, placeholder: PlaceholderRun) -> Result<Point> {
        self.check_point(at)?;
        self.paragraph_mut(at.paragraph)?
            .insert_run(at.column, Run::Placeholder(placeholder));
        self.increment_version();
        Ok(Point::new(at.paragraph, at.column + 1))
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.paragraphs == other.paragraphs
    }
}

impl Eq for Document {}

impl From<Vec<Paragraph>> for Document {
    fn from(paragraphs: Vec<Paragraph>) -> Self {
        Self::from_paragraphs(paragraphs)
    }
}

impl From<Document> for Vec<Paragraph> {
    fn from(doc: Document) -> Self {
        doc.paragraphs
    }
}
