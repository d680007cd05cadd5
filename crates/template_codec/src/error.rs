//! Error types for template conversion

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TemplateCodecError {
    #[error("Invalid delimiters: {0}")]
    InvalidDelimiters(String),
}

pub type Result<T> = std::result::Result<T, TemplateCodecError>;
