//! Document serializer - document back to template string

use doc_model::{Document, Run};

/// Flatten a document into its template string.
///
/// Placeholders are written as their raw keys, paragraphs are joined with
/// `\n` and trailing whitespace is trimmed from the result.
pub fn serialize_document(doc: &Document) -> String {
    let mut out = String::new();
    for (i, para) in doc.paragraphs().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for run in para.runs() {
            match run {
                Run::Text(text) => out.push_str(&text.text),
                Run::Placeholder(placeholder) => out.push_str(placeholder.raw_key()),
            }
        }
    }
    out.truncate(out.trim_end().len());
    out
}
