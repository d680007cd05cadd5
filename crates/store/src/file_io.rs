//! File I/O operations

use crate::{Result, StoreError};
use doc_model::Document;
use render_model::AttributeMapping;
use std::path::Path;
use template_codec::{serialize_document, DocumentBuilder};

fn ensure_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(StoreError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

/// Read a template file as a string
pub fn load_template(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    ensure_exists(path)?;
    Ok(std::fs::read_to_string(path)?)
}

/// Write a template string to a file
pub fn save_template(value: &str, path: impl AsRef<Path>) -> Result<()> {
    std::fs::write(path, value)?;
    Ok(())
}

/// Read a template file and build its document
pub fn load_document(path: impl AsRef<Path>, builder: &DocumentBuilder) -> Result<Document> {
    let source = load_template(path)?;
    Ok(builder.build(&source))
}

/// Serialize a document and write it as a template file
pub fn save_document(doc: &Document, path: impl AsRef<Path>) -> Result<()> {
    save_template(&serialize_document(doc), path)
}

/// Read an attribute mapping from a JSON file
pub fn load_mapping(path: impl AsRef<Path>) -> Result<AttributeMapping> {
    let path = path.as_ref();
    ensure_exists(path)?;
    let json = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&json)?)
}
