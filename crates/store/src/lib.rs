//! Store - Settings persistence and template file I/O
//!
//! This crate loads and saves editor settings, template files and
//! attribute mappings.

mod error;
mod file_io;
mod settings;

pub use error::*;
pub use file_io::*;
pub use settings::*;
