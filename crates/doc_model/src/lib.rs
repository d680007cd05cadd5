//! Document Model - paragraphs of text and atomic placeholder runs
//!
//! A template such as `Hi {{ name }}!` is held as a [`Document`] of
//! [`Paragraph`]s, each an ordered list of [`Run`]s. Placeholders are
//! indivisible; text around them is freely editable. Editing primitives work
//! on column [`Point`]s and keep every paragraph in canonical shape.

mod document;
mod error;
mod node;
mod node_id;
mod paragraph;
mod run;
mod selection;

pub use document::*;
pub use error::*;
pub use node::*;
pub use node_id::*;
pub use paragraph::*;
pub use run::*;
pub use selection::*;
