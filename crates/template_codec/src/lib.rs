//! Template Codec - template strings to documents and back
//!
//! [`PlaceholderScanner`] finds `{{ name }}` tags in a line,
//! [`DocumentBuilder`] turns a template string into a [`doc_model::Document`]
//! and [`serialize_document`] flattens it again.
//!
//! ```rust
//! use template_codec::{build_document, serialize_document};
//!
//! let doc = build_document("Hi {{ name }}!");
//! assert_eq!(doc.paragraphs()[0].runs().len(), 3);
//! assert_eq!(serialize_document(&doc), "Hi {{ name }}!");
//! ```

mod builder;
mod error;
mod scanner;
mod serializer;

pub use builder::{build_document, DocumentBuilder};
pub use error::{Result, TemplateCodecError};
pub use scanner::{Delimiters, PlaceholderScanner, ScanError, Span, Tag, TagKind};
pub use serializer::serialize_document;
