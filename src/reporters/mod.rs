//! Output reporters for Benford analysis results
//!
//! Supports multiple output formats:
//! - `text` - Terminal output with colors, emoji and a digit bar chart
//! - `json` - Machine-readable JSON
//! - `markdown` - GitHub-flavored Markdown for audit workpapers

mod json;
mod markdown;
mod text;

use crate::analysis::SeverityTier;
use crate::models::AnalysisReport;
use anyhow::{anyhow, Result};
use std::str::FromStr;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Markdown,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" | "terminal" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            _ => Err(anyhow!(
                "Unknown format '{}'. Valid formats: text, json, markdown",
                s
            )),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Markdown => write!(f, "markdown"),
        }
    }
}

/// Presentation toggles that don't change report content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub emoji: bool,
    pub color: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            emoji: true,
            color: true,
        }
    }
}

/// Render a report in the specified format
pub fn report(report: &AnalysisReport, format: OutputFormat, options: &RenderOptions) -> Result<String> {
    match format {
        OutputFormat::Text => text::render(report, options),
        OutputFormat::Json => json::render(report),
        OutputFormat::Markdown => markdown::render(report, options),
    }
}

/// Verdict marker shown before the tier headline
pub(crate) fn tier_marker(tier: SeverityTier, emoji: bool) -> &'static str {
    match (tier, emoji) {
        (SeverityTier::StrongDeviation, true) => "❌",
        (SeverityTier::ModerateDeviation, true) => "⚠️",
        (SeverityTier::NoDeviation, true) => "✅",
        (SeverityTier::StrongDeviation, false) => "[FAIL]",
        (SeverityTier::ModerateDeviation, false) => "[WARN]",
        (SeverityTier::NoDeviation, false) => "[PASS]",
    }
}
