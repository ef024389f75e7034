// ⚙️ Configuration
// JSON file with every field optional; CLI flags override afterwards

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::emitter::{default_banner, DEFAULT_SECTION_LABEL};
use crate::locale::NumberLocale;
use crate::normalizer::DEFAULT_HEADER_TOKEN;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Field delimiter of the source spreadsheet
    pub delimiter: char,

    /// First-column value marking the title row
    pub header_token: String,

    /// Top-level key of the generated document
    pub section_label: String,

    /// Comment lines written above the section label
    pub banner: Vec<String>,

    /// Locale tag for reading worths ("de_DE", "fr"); None = process locale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,

    /// id → name table used when `use_names` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub names_file: Option<PathBuf>,

    pub use_names: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            delimiter: ';',
            header_token: DEFAULT_HEADER_TOKEN.to_string(),
            section_label: DEFAULT_SECTION_LABEL.to_string(),
            banner: default_banner(),
            locale: None,
            names_file: None,
            use_names: false,
        }
    }
}

impl Config {
    /// Load configuration from JSON file. Call `validate` once overrides are applied.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    pub fn validate(&self) -> Result<()> {
        if !self.delimiter.is_ascii() || self.delimiter == '"' || self.delimiter == '\n' {
            bail!("Delimiter {:?} must be a single ASCII character other than a quote or newline", self.delimiter);
        }
        if self.section_label.trim().is_empty() {
            bail!("Section label must not be empty");
        }
        if self.use_names && self.names_file.is_none() {
            bail!("use_names is set but no names_file is configured");
        }
        Ok(())
    }

    pub fn delimiter_byte(&self) -> u8 {
        // validate() guarantees ASCII
        self.delimiter as u8
    }

    /// Configured locale, or the process locale when none is set
    pub fn number_locale(&self) -> NumberLocale {
        match &self.locale {
            Some(tag) => NumberLocale::from_tag(tag),
            None => NumberLocale::from_env(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
