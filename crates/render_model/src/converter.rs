//! Convert a document to render items and rendered text

use crate::{AttributeMapping, ParagraphRender, RenderItem};
use doc_model::{Document, Node, Paragraph, Run};

/// Convert one paragraph to render items
pub fn render_paragraph(para: &Paragraph, mapping: &AttributeMapping) -> ParagraphRender {
    let items = para
        .runs()
        .iter()
        .map(|run| match run {
            Run::Text(text) => RenderItem::Text {
                id: text.id(),
                text: text.text.clone(),
            },
            Run::Placeholder(placeholder) => RenderItem::Placeholder {
                id: placeholder.id(),
                raw_key: placeholder.raw_key().to_string(),
                title: mapping.title(placeholder.raw_key()).to_string(),
            },
        })
        .collect();

    ParagraphRender {
        paragraph_id: para.id(),
        items,
    }
}

/// Convert every paragraph of a document to render items
pub fn render_items(doc: &Document, mapping: &AttributeMapping) -> Vec<ParagraphRender> {
    doc.paragraphs()
        .iter()
        .map(|para| render_paragraph(para, mapping))
        .collect()
}

/// The output text with every placeholder substituted.
///
/// Unmapped placeholders render as nothing. Paragraphs are joined by `\n`
/// and the result is not trimmed.
pub fn render_text(doc: &Document, mapping: &AttributeMapping) -> String {
    let mut out = String::new();
    for (i, para) in doc.paragraphs().iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        for run in para.runs() {
            match run {
                Run::Text(text) => out.push_str(&text.text),
                Run::Placeholder(placeholder) => out.push_str(mapping.resolve(placeholder.raw_key())),
            }
        }
    }
    out
}
