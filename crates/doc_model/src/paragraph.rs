//! Paragraph node - one line of the template as a sequence of runs
//!
//! Caret positions inside a paragraph are measured in columns: one per
//! text character and one per placeholder. All editing primitives here take
//! columns and leave the paragraph in canonical shape (see [`Paragraph::normalize`]).

use crate::{Node, NodeId, NodeType, PlaceholderRun, Run, TextRun};
use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A paragraph containing text and placeholder runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    #[serde(default)]
    id: NodeId,
    runs: Vec<Run>,
}

impl Paragraph {
    /// Create a paragraph holding a single empty text run
    pub fn new() -> Self {
        Self::from_runs(vec![Run::Text(TextRun::empty())])
    }

    /// Create a paragraph from runs exactly as given
    pub fn from_runs(runs: Vec<Run>) -> Self {
        Self {
            id: NodeId::new(),
            runs,
        }
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn run(&self, index: usize) -> Option<&Run> {
        self.runs.get(index)
    }

    /// Iterate over the placeholders of this paragraph in order
    pub fn placeholders(&self) -> impl Iterator<Item = &PlaceholderRun> {
        self.runs.iter().filter_map(Run::as_placeholder)
    }

    /// Total number of caret columns
    pub fn width(&self) -> usize {
        self.runs.iter().map(Run::width).sum()
    }

    /// Column of a run-relative offset.
    ///
    /// Text offsets range over `0..=char_len`. A placeholder has no interior,
    /// so its only valid offsets are `0` (before it) and `1` (after it).
    /// Anything else is `None`.
    pub fn column_of(&self, run: usize, offset: usize) -> Option<usize> {
        let target = self.runs.get(run)?;
        if offset > target.width() {
            return None;
        }
        let start: usize = self.runs[..run].iter().map(Run::width).sum();
        Some(start + offset)
    }

    /// Run-relative address of a column, preferring text runs.
    ///
    /// A column after a placeholder is reported as the start of the text run
    /// that follows it. Columns past the end clamp to the end.
    pub fn position_at(&self, column: usize) -> (usize, usize) {
        let last = self.runs.len().saturating_sub(1);
        let mut start = 0;
        for (i, run) in self.runs.iter().enumerate() {
            let width = run.width();
            if column <= start + width {
                match run {
                    Run::Text(_) => return (i, column - start),
                    Run::Placeholder(_) if column == start => return (i, 0),
                    Run::Placeholder(_) if i == last => return (i, 1),
                    Run::Placeholder(_) => {}
                }
            }
            start += width;
        }
        (last, self.runs.last().map(Run::width).unwrap_or(0))
    }

    /// Make `column` fall on a run boundary and return the index of the
    /// first run at or after it. Splits a text run if needed; never splits
    /// a placeholder.
    fn boundary_at(&mut self, column: usize) -> usize {
        let mut start = 0;
        for i in 0..self.runs.len() {
            if column == start {
                return i;
            }
            let width = self.runs[i].width();
            if column < start + width {
                if let Run::Text(text) = &mut self.runs[i] {
                    let tail = text.split_off(column - start);
                    self.runs.insert(i + 1, Run::Text(tail));
                    return i + 1;
                }
            }
            start += width;
        }
        self.runs.len()
    }

    /// Insert text at a column
    pub fn insert_text(&mut self, column: usize, text: &str) {
        if text.is_empty() {
            return;
        }
        let mut start = 0;
        let mut inserted = false;
        for run in self.runs.iter_mut() {
            let width = run.width();
            if let Run::Text(t) = run {
                if (start..=start + width).contains(&column) {
                    t.insert_str(column - start, text);
                    inserted = true;
                    break;
                }
            }
            start += width;
        }
        if !inserted {
            let index = self.boundary_at(column);
            self.runs.insert(index, Run::text(text));
        }
        self.normalize();
    }

    /// Insert a run at a column, splitting the text run the column falls in
    pub fn insert_run(&mut self, column: usize, run: Run) {
        let index = self.boundary_at(column);
        self.runs.insert(index, run);
        self.normalize();
    }

    /// Remove the runs covering a column range, returning what was removed.
    ///
    /// Placeholders only leave whole: one is removed exactly when its column
    /// lies inside the range.
    pub fn delete_columns(&mut self, range: Range<usize>) -> Vec<Run> {
        if range.start >= range.end {
            return Vec::new();
        }
        let start = self.boundary_at(range.start);
        let end = self.boundary_at(range.end);
        let removed = self.runs.drain(start..end).collect();
        self.normalize();
        removed
    }

    /// Split the paragraph at a column; `self` keeps the head.
    pub fn split_off(&mut self, column: usize) -> Paragraph {
        let index = self.boundary_at(column);
        let tail = self.runs.split_off(index);
        self.normalize();
        let mut next = Paragraph::from_runs(tail);
        next.normalize();
        next
    }

    /// Append all runs of another paragraph
    pub fn append(&mut self, other: Paragraph) {
        self.runs.extend(other.runs);
        self.normalize();
    }

    /// Bring the run list into the canonical shape the builder produces.
    ///
    /// - adjacent text runs merge, the first keeps its identity
    /// - adjacent placeholders are separated by an empty text run
    /// - a text run always follows the last placeholder
    /// - an empty text run in front of a leading placeholder is dropped
    /// - an empty paragraph holds one empty text run
    pub fn normalize(&mut self) {
        let mut out: Vec<Run> = Vec::with_capacity(self.runs.len() + 1);
        for run in self.runs.drain(..) {
            match run {
                Run::Text(text) => match out.last_mut() {
                    Some(Run::Text(prev)) => prev.text.push_str(&text.text),
                    _ => out.push(Run::Text(text)),
                },
                Run::Placeholder(placeholder) => {
                    if matches!(out.last(), Some(Run::Placeholder(_))) {
                        out.push(Run::Text(TextRun::empty()));
                    }
                    out.push(Run::Placeholder(placeholder));
                }
            }
        }
        if matches!(out.last(), None | Some(Run::Placeholder(_))) {
            out.push(Run::Text(TextRun::empty()));
        }
        if out.len() > 1 && matches!(&out[0], Run::Text(t) if t.is_empty()) {
            out.remove(0);
        }
        self.runs = out;
    }

    /// Whether the run list is already canonical
    pub fn is_normalized(&self) -> bool {
        let mut canonical = self.clone();
        canonical.normalize();
        canonical.runs == self.runs
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for Paragraph {
    fn eq(&self, other: &Self) -> bool {
        self.runs == other.runs
    }
}

impl Eq for Paragraph {}

impl Node for Paragraph {
    fn id(&self) -> NodeId {
        self.id
    }

    fn node_type(&self) -> NodeType {
        NodeType::Paragraph
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(runs: Vec<Run>) -> Paragraph {
        Paragraph::from_runs(runs)
    }

    #[test]
    fn test_new_paragraph_is_one_empty_text_run() {
        let p = Paragraph::new();
        assert_eq!(p.runs(), &[Run::text("")]);
        assert_eq!(p.width(), 0);
        assert!(p.is_normalized());
    }

    #[test]
    fn test_column_geometry() {
        let p = para(vec![Run::text("Hi "), Run::placeholder("{{ a }}"), Run::text("!")]);
        assert_eq!(p.width(), 5);
        assert_eq!(p.column_of(0, 3), Some(3));
        assert_eq!(p.column_of(1, 0), Some(3));
        assert_eq!(p.column_of(1, 1), Some(4));
        assert_eq!(p.column_of(1, 2), None);
        assert_eq!(p.column_of(2, 1), Some(5));
        assert_eq!(p.column_of(3, 0), None);
        assert_eq!(p.column_of(0, 4), None);
    }

    #[test]
    fn test_position_prefers_text_runs() {
        let p = para(vec![Run::text("Hi "), Run::placeholder("{{ a }}"), Run::text("!")]);
        assert_eq!(p.position_at(3), (0, 3));
        assert_eq!(p.position_at(4), (2, 0));
        assert_eq!(p.position_at(5), (2, 1));
        assert_eq!(p.position_at(99), (2, 1));

        let leading = para(vec![Run::placeholder("{{ a }}"), Run::text("")]);
        assert_eq!(leading.position_at(0), (0, 0));
        assert_eq!(leading.position_at(1), (1, 0));
    }

    #[test]
    fn test_insert_run_splits_text_and_keeps_other_ids() {
        let mut p = para(vec![Run::text("abcd"), Run::placeholder("{{ x }}"), Run::text("")]);
        let head_id = p.runs()[0].id();
        let x_id = p.runs()[1].id();

        p.insert_run(2, Run::placeholder("{{ new }}"));

        assert_eq!(
            p.runs(),
            &[
                Run::text("ab"),
                Run::placeholder("{{ new }}"),
                Run::text("cd"),
                Run::placeholder("{{ x }}"),
                Run::text(""),
            ]
        );
        assert_eq!(p.runs()[0].id(), head_id);
        assert_eq!(p.runs()[3].id(), x_id);
    }

    #[test]
    fn test_insert_run_between_adjacent_placeholders() {
        let mut p = para(vec![
            Run::placeholder("{{a}}"),
            Run::text(""),
            Run::placeholder("{{b}}"),
            Run::text(""),
        ]);
        p.insert_run(1, Run::placeholder("{{c}}"));
        assert_eq!(
            p.runs(),
            &[
                Run::placeholder("{{a}}"),
                Run::text(""),
                Run::placeholder("{{c}}"),
                Run::text(""),
                Run::placeholder("{{b}}"),
                Run::text(""),
            ]
        );
    }

    #[test]
    fn test_insert_text_before_leading_placeholder() {
        let mut p = para(vec![Run::placeholder("{{a}}"), Run::text("")]);
        p.insert_text(0, "x");
        assert_eq!(p.runs(), &[Run::text("x"), Run::placeholder("{{a}}"), Run::text("")]);

        p.insert_text(2, "y");
        assert_eq!(p.runs(), &[Run::text("x"), Run::placeholder("{{a}}"), Run::text("y")]);
    }

    #[test]
    fn test_delete_columns_removes_whole_placeholders() {
        let mut p = para(vec![Run::text("ab"), Run::placeholder("{{ x }}"), Run::text("cd")]);
        let removed = p.delete_columns(1..4);
        assert_eq!(removed, vec![Run::text("b"), Run::placeholder("{{ x }}"), Run::text("c")]);
        assert_eq!(p.runs(), &[Run::text("ad")]);
    }

    #[test]
    fn test_delete_everything_leaves_empty_text() {
        let mut p = para(vec![Run::placeholder("{{ x }}"), Run::text("cd")]);
        p.delete_columns(0..3);
        assert_eq!(p.runs(), &[Run::text("")]);
    }

    #[test]
    fn test_split_off_and_append() {
        let mut p = para(vec![Run::text("ab"), Run::placeholder("{{ x }}"), Run::text("cd")]);
        let tail = p.split_off(3);
        assert_eq!(p.runs(), &[Run::text("ab"), Run::placeholder("{{ x }}"), Run::text("")]);
        assert_eq!(tail.runs(), &[Run::text("cd")]);

        p.append(tail);
        assert_eq!(p.runs(), &[Run::text("ab"), Run::placeholder("{{ x }}"), Run::text("cd")]);
    }

    #[test]
    fn test_normalize_shapes() {
        let mut p = para(vec![
            Run::text(""),
            Run::placeholder("{{a}}"),
            Run::placeholder("{{b}}"),
        ]);
        p.normalize();
        assert_eq!(
            p.runs(),
            &[Run::placeholder("{{a}}"), Run::text(""), Run::placeholder("{{b}}"), Run::text("")]
        );

        let mut q = para(vec![Run::text("a"), Run::text("b"), Run::text("")]);
        let first = q.runs()[0].id();
        q.normalize();
        assert_eq!(q.runs(), &[Run::text("ab")]);
        assert_eq!(q.runs()[0].id(), first);

        let mut empty = para(Vec::new());
        assert!(!empty.is_normalized());
        empty.normalize();
        assert_eq!(empty.runs(), &[Run::text("")]);
    }
}
