//! Error types for document model operations

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DocModelError {
    #[error("Paragraph index out of range: {index} (document has {count})")]
    ParagraphOutOfRange { index: usize, count: usize },

    #[error("Invalid position: paragraph {paragraph}, run {run}, offset {offset}")]
    InvalidPosition {
        paragraph: usize,
        run: usize,
        offset: usize,
    },

    #[error("Invalid range: {0}")]
    InvalidRange(String),
}

pub type Result<T> = std::result::Result<T, DocModelError>;
