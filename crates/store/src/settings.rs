//! Editor settings management
//!
//! This module provides settings persistence, loading, and updating
//! for the template editor.

use crate::Result;
use edit_engine::{EngineConfig, DEFAULT_MAX_RENDERED_LENGTH, DEFAULT_PLACEHOLDER};
use render_model::LengthUnit;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use template_codec::Delimiters;

/// Template editor settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EditorSettings {
    /// Maximum rendered length before the counter reports over-limit
    pub max_rendered_length: usize,
    /// Unit used to count rendered length
    pub length_unit: LengthUnit,
    /// Tag delimiters recognized by the scanner
    pub delimiters: Delimiters,
    /// Raw key inserted by the insert-placeholder action
    pub default_placeholder: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            max_rendered_length: DEFAULT_MAX_RENDERED_LENGTH,
            length_unit: LengthUnit::Chars,
            delimiters: Delimiters::default(),
            default_placeholder: DEFAULT_PLACEHOLDER.to_string(),
        }
    }
}

impl EditorSettings {
    /// Validate the settings and turn them into an engine configuration
    pub fn engine_config(&self) -> Result<EngineConfig> {
        self.delimiters.validate()?;
        Ok(EngineConfig {
            max_rendered_length: self.max_rendered_length,
            length_unit: self.length_unit,
            delimiters: self.delimiters.clone(),
            default_placeholder: self.default_placeholder.clone(),
        })
    }
}

/// Settings manager for loading, saving, and updating editor settings
pub struct SettingsManager {
    /// Path to the settings file
    settings_path: PathBuf,
    /// Current settings (cached)
    current: EditorSettings,
}

impl SettingsManager {
    /// Create a new settings manager with the given config directory
    pub fn new(config_dir: PathBuf) -> Self {
        Self::with_path(config_dir.join("settings.json"))
    }

    /// Create a settings manager for an explicit settings file
    pub fn with_path(settings_path: PathBuf) -> Self {
        Self {
            settings_path,
            current: EditorSettings::default(),
        }
    }

    /// Get the path to the settings file
    pub fn settings_path(&self) -> &PathBuf {
        &self.settings_path
    }

    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_sync(&mut self) -> Result<&EditorSettings> {
        if self.settings_path.exists() {
            let content = std::fs::read_to_string(&self.settings_path)?;
            match serde_json::from_str::<EditorSettings>(&content) {
                Ok(settings) => {
                    self.current = settings;
                }
                Err(e) => {
                    tracing::warn!(
                        "Failed to parse settings file, using defaults: {}",
                        e
                    );
                    self.current = EditorSettings::default();
                }
            }
        } else {
            self.current = EditorSettings::default();
        }
        Ok(&self.current)
    }

    /// Save current settings to disk
    pub fn save_sync(&self) -> Result<()> {
        if let Some(parent) = self.settings_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(&self.current)?;
        std::fs::write(&self.settings_path, content)?;
        Ok(())
    }

    /// Get current settings
    pub fn get(&self) -> &EditorSettings {
        &self.current
    }

    /// Update settings and save to disk
    pub fn update_sync(&mut self, settings: EditorSettings) -> Result<()> {
        settings.delimiters.validate()?;
        self.current = settings;
        self.save_sync()
    }

    /// Reset settings to defaults and save
    pub fn reset_sync(&mut self) -> Result<&EditorSettings> {
        self.current = EditorSettings::default();
        self.save_sync()?;
        Ok(&self.current)
    }
}
