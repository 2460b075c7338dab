//! Configuration module for benford
//!
//! This module handles:
//! - Project-level configuration (benford.toml)
//! - Input parsing defaults (delimiter, header row)
//! - CLI defaults

mod project_config;

pub use project_config::{
    CliDefaults,
    ProjectConfig,
    SourceConfig,
    CONFIG_FILE_NAMES,
    load_project_config,
};
