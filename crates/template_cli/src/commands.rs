//! Subcommands of `template-check`

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use edit_engine::EngineConfig;
use render_model::{render_text, AttributeMapping, LengthUnit, RenderedLengthAccountant};
use std::path::{Path, PathBuf};
use store::{load_document, load_mapping, EditorSettings, SettingsManager};
use template_codec::{DocumentBuilder, PlaceholderScanner};

#[derive(Parser)]
#[command(name = "template-check")]
#[command(about = "Parse, render and measure mustache templates")]
#[command(version)]
pub struct Cli {
    /// Editor settings file (JSON)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the document built from a template as JSON
    Parse {
        /// Template file
        file: PathBuf,
    },

    /// Print the template with every placeholder substituted
    Render {
        /// Template file
        file: PathBuf,

        /// Attribute mapping file (JSON object of raw key to value or null)
        #[arg(short, long)]
        mapping: Option<PathBuf>,
    },

    /// Print the rendered length as current/maximum
    Count {
        /// Template file
        file: PathBuf,

        /// Attribute mapping file (JSON object of raw key to value or null)
        #[arg(short, long)]
        mapping: Option<PathBuf>,

        /// Maximum rendered length (overrides settings)
        #[arg(long)]
        max: Option<usize>,

        /// Length unit (overrides settings)
        #[arg(long, value_enum)]
        unit: Option<UnitArg>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitArg {
    Chars,
    Utf16,
    Graphemes,
}

impl From<UnitArg> for LengthUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Chars => LengthUnit::Chars,
            UnitArg::Utf16 => LengthUnit::Utf16,
            UnitArg::Graphemes => LengthUnit::Graphemes,
        }
    }
}

/// What a subcommand prints, and whether the template is over its limit
#[derive(Debug)]
pub struct Report {
    pub output: String,
    pub over_limit: bool,
}

impl Report {
    fn ok(output: String) -> Self {
        Self {
            output,
            over_limit: false,
        }
    }
}

fn load_settings(path: Option<&Path>) -> Result<EngineConfig> {
    let settings = match path {
        Some(path) => {
            let mut manager = SettingsManager::with_path(path.to_path_buf());
            manager
                .load_sync()
                .with_context(|| format!("reading settings {}", path.display()))?
                .clone()
        }
        None => EditorSettings::default(),
    };
    Ok(settings.engine_config()?)
}

fn mapping_from(path: Option<&Path>) -> Result<AttributeMapping> {
    match path {
        Some(path) => {
            load_mapping(path).with_context(|| format!("reading mapping {}", path.display()))
        }
        None => Ok(AttributeMapping::new()),
    }
}

pub fn run(cli: &Cli) -> Result<Report> {
    let config = load_settings(cli.settings.as_deref())?;
    let builder = DocumentBuilder::new(PlaceholderScanner::new(config.delimiters.clone()));
    let read = |file: &Path| {
        load_document(file, &builder).with_context(|| format!("reading template {}", file.display()))
    };

    match &cli.command {
        Commands::Parse { file } => {
            let doc = read(file)?;
            tracing::info!(paragraphs = doc.paragraph_count(), "parsed template");
            Ok(Report::ok(serde_json::to_string_pretty(&doc)?))
        }
        Commands::Render { file, mapping } => {
            let doc = read(file)?;
            let mapping = mapping_from(mapping.as_deref())?;
            Ok(Report::ok(render_text(&doc, &mapping)))
        }
        Commands::Count {
            file,
            mapping,
            max,
            unit,
        } => {
            let doc = read(file)?;
            let mapping = mapping_from(mapping.as_deref())?;
            let unit = unit.map(LengthUnit::from).unwrap_or(config.length_unit);
            let maximum = max.unwrap_or(config.max_rendered_length);

            let counter = RenderedLengthAccountant::new(unit).count(&doc, &mapping, maximum);
            if counter.is_over_limit() {
                tracing::warn!(%counter, "rendered length is over the limit");
            }
            Ok(Report {
                output: counter.to_string(),
                over_limit: counter.is_over_limit(),
            })
        }
    }
}
