//! Render Model - Placeholder substitution and length accounting
//!
//! This crate resolves placeholders against an attribute mapping to produce
//! the rendered output, its length in a configurable unit, and the render
//! items the editing surface draws.

mod converter;
mod length;
mod mapping;
mod render_item;

pub use converter::*;
pub use length::*;
pub use mapping::*;
pub use render_item::*;
