//! Rendered length accounting
//!
//! Measures the output a template produces once every placeholder is
//! replaced by its display value. Unmapped placeholders contribute nothing.
//! Each paragraph break counts as one unit.

use crate::{render_text, AttributeMapping};
use doc_model::{Document, Paragraph, Run};
use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

/// Unit used to count rendered length
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Unicode scalar values
    #[default]
    Chars,
    /// UTF-16 code units, as counted by browser text APIs
    Utf16,
    /// Extended grapheme clusters
    Graphemes,
}

impl LengthUnit {
    pub fn measure(&self, text: &str) -> usize {
        match self {
            LengthUnit::Chars => text.chars().count(),
            LengthUnit::Utf16 => text.encode_utf16().count(),
            LengthUnit::Graphemes => text.graphemes(true).count(),
        }
    }
}

/// Computes rendered length of documents
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderedLengthAccountant {
    unit: LengthUnit,
}

impl RenderedLengthAccountant {
    pub fn new(unit: LengthUnit) -> Self {
        Self { unit }
    }

    pub fn unit(&self) -> LengthUnit {
        self.unit
    }

    /// Rendered length of one paragraph, without any line break
    pub fn paragraph_length(&self, para: &Paragraph, mapping: &AttributeMapping) -> usize {
        fn piece<'a>(run: &'a Run, mapping: &'a AttributeMapping) -> &'a str {
            match run {
                Run::Text(text) => &text.text,
                Run::Placeholder(placeholder) => mapping.resolve(placeholder.raw_key()),
            }
        }
        match self.unit {
            // Clusters can straddle run boundaries, so measure the joined text
            LengthUnit::Graphemes => {
                let joined: String = para.runs().iter().map(|run| piece(run, mapping)).collect();
                self.unit.measure(&joined)
            }
            LengthUnit::Chars | LengthUnit::Utf16 => para
                .runs()
                .iter()
                .map(|run| self.unit.measure(piece(run, mapping)))
                .sum(),
        }
    }

    /// Rendered length of a document: paragraph lengths plus one per break.
    ///
    /// In grapheme units a line break can join the `\r` ending the line
    /// before it, so the whole rendered text is measured instead.
    pub fn document_length(&self, doc: &Document, mapping: &AttributeMapping) -> usize {
        if self.unit == LengthUnit::Graphemes {
            return self.unit.measure(&render_text(doc, mapping));
        }
        let body: usize = doc
            .paragraphs()
            .iter()
            .map(|para| self.paragraph_length(para, mapping))
            .sum();
        body + doc.paragraph_count().saturating_sub(1)
    }

    /// Measure a document against a maximum
    pub fn count(&self, doc: &Document, mapping: &AttributeMapping, maximum: usize) -> LengthCounter {
        LengthCounter {
            current: self.document_length(doc, mapping),
            maximum,
        }
    }
}

/// Rendered length in characters
pub fn rendered_length(doc: &Document, mapping: &AttributeMapping) -> usize {
    RenderedLengthAccountant::default().document_length(doc, mapping)
}

/// A `current/maximum` reading.
///
/// Going over the maximum is advisory; nothing here rejects an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthCounter {
    pub current: usize,
    pub maximum: usize,
}

impl LengthCounter {
    pub fn is_over_limit(&self) -> bool {
        self.current > self.maximum
    }

    pub fn remaining(&self) -> usize {
        self.maximum.saturating_sub(self.current)
    }
}

impl std::fmt::Display for LengthCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.current, self.maximum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(lines: Vec<Vec<Run>>) -> Document {
        Document::from_paragraphs(lines.into_iter().map(Paragraph::from_runs).collect())
    }

    #[test]
    fn test_mapped_placeholder_counts_its_value() {
        let d = doc(vec![vec![Run::text("Hi "), Run::placeholder("{{ name }}"), Run::text("!")]]);
        let mapping: AttributeMapping = [("{{ name }}", "Ann")].into_iter().collect();
        assert_eq!(rendered_length(&d, &mapping), 7);
    }

    #[test]
    fn test_unmapped_placeholder_counts_zero() {
        let d = doc(vec![vec![Run::text("Hi "), Run::placeholder("{{ name }}"), Run::text("!")]]);
        assert_eq!(rendered_length(&d, &AttributeMapping::new()), 4);
    }

    #[test]
    fn test_paragraph_breaks_count_one_each() {
        let d = doc(vec![vec![Run::text("a")], vec![Run::text("b")], vec![Run::text("")]]);
        assert_eq!(rendered_length(&d, &AttributeMapping::new()), 4);
        assert_eq!(rendered_length(&Document::new(), &AttributeMapping::new()), 0);
    }

    #[test]
    fn test_units() {
        let d = doc(vec![vec![Run::text("e\u{301}😀")]]);
        let mapping = AttributeMapping::new();
        assert_eq!(RenderedLengthAccountant::new(LengthUnit::Chars).document_length(&d, &mapping), 3);
        assert_eq!(RenderedLengthAccountant::new(LengthUnit::Utf16).document_length(&d, &mapping), 4);
        assert_eq!(
            RenderedLengthAccountant::new(LengthUnit::Graphemes).document_length(&d, &mapping),
            2
        );
    }

    #[test]
    fn test_graphemes_across_run_boundary() {
        let d = doc(vec![vec![Run::text("e"), Run::placeholder("{{ accent }}"), Run::text("")]]);
        let mapping: AttributeMapping = [("{{ accent }}", "\u{301}")].into_iter().collect();
        let accountant = RenderedLengthAccountant::new(LengthUnit::Graphemes);
        assert_eq!(accountant.document_length(&d, &mapping), 1);
    }

    #[test]
    fn test_crlf_is_one_grapheme() {
        let d = doc(vec![vec![Run::text("a\r")], vec![Run::text("b")]]);
        let mapping = AttributeMapping::new();
        let graphemes = RenderedLengthAccountant::new(LengthUnit::Graphemes);
        assert_eq!(graphemes.document_length(&d, &mapping), 3);
        assert_eq!(RenderedLengthAccountant::new(LengthUnit::Chars).document_length(&d, &mapping), 4);
    }

    #[test]
    fn test_counter() {
        let d = doc(vec![vec![Run::text("hello")]]);
        let counter = RenderedLengthAccountant::default().count(&d, &AttributeMapping::new(), 3);
        assert_eq!(counter.to_string(), "5/3");
        assert!(counter.is_over_limit());
        assert_eq!(counter.remaining(), 0);

        let roomy = LengthCounter { current: 5, maximum: 150 };
        assert!(!roomy.is_over_limit());
        assert_eq!(roomy.remaining(), 145);
    }

    #[test]
    fn test_unit_serde_names() {
        assert_eq!(serde_json::to_string(&LengthUnit::Utf16).unwrap(), "\"utf16\"");
        let unit: LengthUnit = serde_json::from_str("\"graphemes\"").unwrap();
        assert_eq!(unit, LengthUnit::Graphemes);
    }
}
