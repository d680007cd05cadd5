//! Edit Engine - Commands and the editing session
//!
//! Edits are commands applied to a clone of the document and swapped in on
//! success. The engine keeps the serialized template string, the rendered
//! length and the render items in step with the document.

mod command;
mod error;
mod executor;
mod placeholder_commands;

pub use command::*;
pub use error::*;
pub use executor::*;
pub use placeholder_commands::*;
