//! Placeholder insertion

use crate::command::delete_selection;
use crate::{Command, CommandResult, EditError, Result};
use doc_model::{Document, PlaceholderRun, Selection};
use serde::{Deserialize, Serialize};

/// Insert an atomic placeholder at the selection.
///
/// A non-collapsed selection is deleted first. The caret ends up right
/// after the new placeholder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsertPlaceholder {
    pub raw_key: String,
}

impl InsertPlaceholder {
    pub fn new(raw_key: impl Into<String>) -> Self {
        Self {
            raw_key: raw_key.into(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.raw_key.is_empty() {
            return Err(EditError::InvalidCommand(
                "placeholder key is empty".to_string(),
            ));
        }
        if self.raw_key.contains(['\n', '\r']) {
            return Err(EditError::InvalidCommand(format!(
                "placeholder key {:?} contains a line break",
                self.raw_key
            )));
        }
        Ok(())
    }
}

impl Command for InsertPlaceholder {
    fn apply(&self, document: &Document, selection: &Selection) -> Result<CommandResult> {
        self.validate()?;

        let mut new_doc = document.clone();
        let at = delete_selection(&mut new_doc, selection)?;
        let caret = new_doc.insert_placeholder(at, PlaceholderRun::new(self.raw_key.as_str()))?;
        CommandResult::with_caret(new_doc, caret)
    }

    fn display_name(&self) -> &str {
        "Insert Placeholder"
    }
}
