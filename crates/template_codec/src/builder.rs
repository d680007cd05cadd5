//! Document builder - template string to document

use crate::PlaceholderScanner;
use doc_model::{Document, Paragraph, Run};

/// Builds documents from template strings
#[derive(Debug, Clone, Default)]
pub struct DocumentBuilder {
    scanner: PlaceholderScanner,
}

impl DocumentBuilder {
    pub fn new(scanner: PlaceholderScanner) -> Self {
        Self { scanner }
    }

    pub fn scanner(&self) -> &PlaceholderScanner {
        &self.scanner
    }

    /// Build a document with one paragraph per line.
    ///
    /// A trailing line break yields a trailing empty paragraph.
    pub fn build(&self, source: &str) -> Document {
        Document::from_paragraphs(source.split('\n').map(|line| self.build_paragraph(line)).collect())
    }

    /// Build the runs of a single line.
    ///
    /// The leading text run is only emitted when the first placeholder does
    /// not start the line. Gaps between placeholders and the remainder after
    /// the last one are always emitted, even when empty.
    pub fn build_paragraph(&self, line: &str) -> Paragraph {
        let spans = self.scanner.scan(line);
        if spans.is_empty() {
            return Paragraph::from_runs(vec![Run::text(line)]);
        }

        let mut runs = Vec::with_capacity(spans.len() * 2 + 1);
        let mut begin = 0;
        for (i, span) in spans.into_iter().enumerate() {
            if i > 0 || span.start > 0 {
                runs.push(Run::text(&line[begin..span.start]));
            }
            runs.push(Run::placeholder(&line[span.clone()]));
            begin = span.end;
        }
        runs.push(Run::text(&line[begin..]));

        Paragraph::from_runs(runs)
    }
}

/// Build a document using the default `{{ }}` delimiters
pub fn build_document(source: &str) -> Document {
    DocumentBuilder::default().build(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runs(source: &str) -> Vec<Vec<Run>> {
        build_document(source)
            .paragraphs()
            .iter()
            .map(|p| p.runs().to_vec())
            .collect()
    }

    #[test]
    fn test_text_and_placeholder_runs() {
        assert_eq!(
            runs("Hi {{ name }}!"),
            vec![vec![Run::text("Hi "), Run::placeholder("{{ name }}"), Run::text("!")]]
        );
    }

    #[test]
    fn test_adjacent_placeholders_get_empty_text_between() {
        assert_eq!(
            runs("{{a}}{{b}}"),
            vec![vec![
                Run::placeholder("{{a}}"),
                Run::text(""),
                Run::placeholder("{{b}}"),
                Run::text(""),
            ]]
        );
    }

    #[test]
    fn test_placeholder_at_line_start_has_no_leading_run() {
        assert_eq!(
            runs("{{ x }} tail"),
            vec![vec![Run::placeholder("{{ x }}"), Run::text(" tail")]]
        );
    }

    #[test]
    fn test_lines_without_placeholders() {
        assert_eq!(runs(""), vec![vec![Run::text("")]]);
        assert_eq!(runs("plain"), vec![vec![Run::text("plain")]]);
        assert_eq!(runs("{{ unterminated"), vec![vec![Run::text("{{ unterminated")]]);
    }

    #[test]
    fn test_paragraphs_per_line() {
        assert_eq!(runs("a\nb"), vec![vec![Run::text("a")], vec![Run::text("b")]]);
        assert_eq!(runs("a\n"), vec![vec![Run::text("a")], vec![Run::text("")]]);
        assert_eq!(
            runs("{{ a }}\n\n{{ b }}"),
            vec![
                vec![Run::placeholder("{{ a }}"), Run::text("")],
                vec![Run::text("")],
                vec![Run::placeholder("{{ b }}"), Run::text("")],
            ]
        );
    }

    #[test]
    fn test_builder_output_is_canonical() {
        let doc = build_document("{{a}}{{b}} x {{c}}\n\nlast {{d}}");
        assert!(doc.paragraphs().iter().all(Paragraph::is_normalized));
    }
}
