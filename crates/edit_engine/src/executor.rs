//! Command execution engine

use crate::{Command, InsertPlaceholder, Result};
use doc_model::{Document, Position, Selection};
use render_model::{
    render_items, AttributeMapping, LengthCounter, LengthUnit, ParagraphRender,
    RenderedLengthAccountant,
};
use template_codec::{serialize_document, Delimiters, DocumentBuilder, PlaceholderScanner};

/// Default maximum rendered length
pub const DEFAULT_MAX_RENDERED_LENGTH: usize = 150;

/// Raw key inserted by the insert-placeholder action when none is given
pub const DEFAULT_PLACEHOLDER: &str = "{{ foo bar buzz }}";

/// Settings the engine runs with
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    pub max_rendered_length: usize,
    pub length_unit: LengthUnit,
    pub delimiters: Delimiters,
    pub default_placeholder: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_rendered_length: DEFAULT_MAX_RENDERED_LENGTH,
            length_unit: LengthUnit::default(),
            delimiters: Delimiters::default(),
            default_placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

type ChangeListener = Box<dyn FnMut(&str)>;

/// The editing session: owns the document and everything derived from it.
///
/// The document is built from a string once and then changed only by
/// commands. Each successful command is followed by one serialization, and
/// registered listeners receive the new string.
pub struct EditingEngine {
    document: Document,
    selection: Selection,
    mapping: AttributeMapping,
    builder: DocumentBuilder,
    accountant: RenderedLengthAccountant,
    config: EngineConfig,
    /// Serialized form of `document`, kept in step with every change
    serialized: String,
    listeners: Vec<ChangeListener>,
}

impl EditingEngine {
    /// Create an editing engine with an empty document
    pub fn new(config: EngineConfig) -> Self {
        Self::with_value(config, "")
    }

    /// Create an editing engine from a template string
    pub fn with_value(config: EngineConfig, value: &str) -> Self {
        let builder =
            DocumentBuilder::new(PlaceholderScanner::new(config.delimiters.clone()));
        let document = builder.build(value);
        let serialized = serialize_document(&document);

        Self {
            document,
            selection: Selection::default(),
            mapping: AttributeMapping::new(),
            builder,
            accountant: RenderedLengthAccountant::new(config.length_unit),
            config,
            serialized,
            listeners: Vec::new(),
        }
    }

    /// Get the current document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Get the current selection
    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Set the selection; both ends must address the current document
    pub fn set_selection(&mut self, selection: Selection) -> Result<()> {
        self.document.selection_points(&selection)?;
        self.selection = selection;
        Ok(())
    }

    /// Select the whole document
    pub fn select_all(&mut self) -> Result<()> {
        let end = self.document.position(self.document.end_point())?;
        self.selection = Selection::new(Position::start_of(0), end);
        Ok(())
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn mapping(&self) -> &AttributeMapping {
        &self.mapping
    }

    /// Replace the attribute mapping; the document is not touched
    pub fn set_mapping(&mut self, mapping: AttributeMapping) {
        self.mapping = mapping;
    }

    /// Register a listener called with the serialized string after each edit
    pub fn on_change(&mut self, listener: impl FnMut(&str) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Execute a command.
    ///
    /// On failure the document and selection are left exactly as they were.
    pub fn execute(&mut self, command: Box<dyn Command>) -> Result<()> {
        let result = command.apply(&self.document, &self.selection)?;

        self.document = result.document;
        self.selection = result.selection;
        self.serialized = serialize_document(&self.document);

        tracing::debug!(
            command = command.display_name(),
            paragraphs = self.document.paragraph_count(),
            "executed command"
        );

        for listener in self.listeners.iter_mut() {
            listener(&self.serialized);
        }
        Ok(())
    }

    /// Insert the configured default placeholder at the selection
    pub fn insert_default_placeholder(&mut self) -> Result<()> {
        let key = self.config.default_placeholder.clone();
        self.execute(Box::new(InsertPlaceholder::new(key)))
    }

    /// The serialized template string
    pub fn serialized(&self) -> &str {
        &self.serialized
    }

    /// Accept a value from outside the session.
    ///
    /// The document is rebuilt only when the value differs from the
    /// session's own last output. Returns whether a rebuild happened.
    pub fn replace_value(&mut self, value: &str) -> bool {
        if value == self.serialized {
            return false;
        }
        self.document = self.builder.build(value);
        self.selection = Selection::default();
        self.serialized = serialize_document(&self.document);
        tracing::debug!(
            paragraphs = self.document.paragraph_count(),
            "rebuilt document from external value"
        );
        true
    }

    /// Rendered length of the current document
    pub fn rendered_length(&self) -> usize {
        self.accountant.document_length(&self.document, &self.mapping)
    }

    /// Rendered length against the configured maximum
    pub fn counter(&self) -> LengthCounter {
        self.accountant
            .count(&self.document, &self.mapping, self.config.max_rendered_length)
    }

    pub fn is_over_limit(&self) -> bool {
        self.counter().is_over_limit()
    }

    /// Render items for the editing surface
    pub fn render_items(&self) -> Vec<ParagraphRender> {
        render_items(&self.document, &self.mapping)
    }
}

impl Default for EditingEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
