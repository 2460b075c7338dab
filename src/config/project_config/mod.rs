//! Project-level configuration support
//!
//! Loads per-project configuration from `benford.toml` or `.benfordrc.json`
//! in the working directory.
//!
//! # Configuration Format
//!
//! ```toml
//! # benford.toml
//!
//! [source]
//! delimiter = ";"
//! has_headers = true
//!
//! [defaults]
//! column = "invoice_amount"
//! format = "text"
//! no_emoji = false
//! fail_on = "strong"
//! ```


use crate::source::SourceOptions;
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, warn};

/// File names searched, in priority order
pub const CONFIG_FILE_NAMES: &[&str] = &["benford.toml", ".benfordrc.json"];

/// Project-level configuration loaded from benford.toml or similar
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ProjectConfig {
    /// How input files are read
    #[serde(default)]
    pub source: SourceConfig,

    /// Default CLI flags
    #[serde(default)]
    pub defaults: CliDefaults,
}

/// Input parsing settings
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SourceConfig {
    /// Field delimiter: a single character, or "tab"
    #[serde(default)]
    pub delimiter: Option<String>,

    /// Whether the first line holds column names (default: true)
    #[serde(default)]
    pub has_headers: Option<bool>,
}

/// Default CLI flags that can be set in project config
#[derive(Debug, Clone, Deserialize, Default)]
pub struct CliDefaults {
    /// Default output format (text, json, markdown)
    #[serde(default)]
    pub format: Option<String>,

    /// Column to analyze when --column is not given
    #[serde(default)]
    pub column: Option<String>,

    /// Disable emoji by default
    #[serde(default)]
    pub no_emoji: Option<bool>,

    /// Fail-on tier threshold for CI (strong, moderate)
    #[serde(default)]
    pub fail_on: Option<String>,
}

impl ProjectConfig {
    /// Source options from config, CLI overrides applied on top.
    ///
    /// An unparseable configured delimiter is reported and ignored.
    pub fn source_options(&self, delimiter: Option<u8>, no_headers: bool) -> SourceOptions {
        let mut options = SourceOptions::default();

        if let Some(raw) = &self.source.delimiter {
            match SourceOptions::parse_delimiter(raw) {
                Ok(d) => options.delimiter = d,
                Err(e) => warn!("Ignoring [source].delimiter in project config: {}", e),
            }
        }
        if let Some(has_headers) = self.source.has_headers {
            options.has_headers = has_headers;
        }

        if let Some(d) = delimiter {
            options.delimiter = d;
        }
        if no_headers {
            options.has_headers = false;
        }
        options
    }
}

/// Load project configuration from a directory.
///
/// Searches for configuration files in this order:
/// 1. `benford.toml`
/// 2. `.benfordrc.json`
///
/// A file that fails to parse is logged and skipped; with no usable file the
/// defaults are returned.
pub fn load_project_config(dir: &Path) -> ProjectConfig {
    // Try TOML first (preferred format)
    let toml_path = dir.join(CONFIG_FILE_NAMES[0]);
    if toml_path.exists() {
        match load_toml_config(&toml_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", toml_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", toml_path.display(), e);
            }
        }
    }

    let json_path = dir.join(CONFIG_FILE_NAMES[1]);
    if json_path.exists() {
        match load_json_config(&json_path) {
            Ok(config) => {
                debug!("Loaded project config from {}", json_path.display());
                return config;
            }
            Err(e) => {
                warn!("Failed to load {}: {}", json_path.display(), e);
            }
        }
    }

    debug!("No project config found, using defaults");
    ProjectConfig::default()
}

/// Load configuration from a TOML file
fn load_toml_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = toml::from_str(&content)?;
    Ok(config)
}

/// Load configuration from a JSON file
fn load_json_config(path: &Path) -> anyhow::Result<ProjectConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: ProjectConfig = serde_json::from_str(&content)?;
    Ok(config)
}
