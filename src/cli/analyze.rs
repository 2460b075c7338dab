//! Analyze command - load a column, run the Benford check, render the report
//!
//! Flags given on the command line win over `[defaults]` in benford.toml,
//! which win over built-in defaults.

use anyhow::{bail, Context, Result};
use benford::analysis::{analyze, SeverityTier};
use benford::config::{load_project_config, ProjectConfig};
use benford::models::AnalysisReport;
use benford::reporters::{self, OutputFormat, RenderOptions};
use benford::source::{Dataset, SourceOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};

/// Label used for data read from standard input
const STDIN_LABEL: &str = "<stdin>";

/// Flags for one analyze run (all optional; config and defaults fill gaps)
#[derive(Debug, Clone, Default)]
pub(crate) struct AnalyzeOptions {
    pub column: Option<String>,
    pub format: Option<String>,
    pub output: Option<PathBuf>,
    pub delimiter: Option<u8>,
    pub no_headers: bool,
    pub fail_on: Option<String>,
    pub no_emoji: bool,
}

/// Run the analyze command
pub(crate) fn run(file: &Path, opts: AnalyzeOptions) -> Result<()> {
    let config = load_project_config(Path::new("."));
    let source_options = config.source_options(opts.delimiter, opts.no_headers);

    let (label, dataset) = load_dataset(file, &source_options)?;

    let requested = opts.column.clone().or_else(|| config.defaults.column.clone());
    let column = dataset.select_column(requested.as_deref())?;
    info!("Analyzing column '{}' of {}", column, label);

    let values = dataset.column_values(column)?;
    let rows = values.len();
    let analysis = analyze(values)
        .with_context(|| format!("Cannot run Benford analysis on column '{}'", column))?;
    let report = AnalysisReport::new(label, column, rows, analysis);

    let format = resolve_format(&opts, &config)?;
    let render = RenderOptions {
        emoji: !no_emoji(&opts, &config),
        color: opts.output.is_none() && format == OutputFormat::Text && console::colors_enabled(),
    };
    let rendered = reporters::report(&report, format, &render)?;
    write_output(&rendered, opts.output.as_deref())?;

    let fail_on = opts.fail_on.or(config.defaults.fail_on);
    check_fail_threshold(fail_on.as_deref(), report.tier())
}

/// Read the dataset from a file, or stdin for `-`
fn load_dataset(file: &Path, options: &SourceOptions) -> Result<(String, Dataset)> {
    if file == Path::new("-") {
        debug!("Reading data from stdin");
        let dataset = Dataset::from_reader(std::io::stdin().lock(), options)
            .context("Failed to read data from stdin")?;
        return Ok((STDIN_LABEL.to_string(), dataset));
    }

    let dataset = Dataset::from_path(file, options)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    Ok((file.display().to_string(), dataset))
}

fn resolve_format(opts: &AnalyzeOptions, config: &ProjectConfig) -> Result<OutputFormat> {
    let raw = opts
        .format
        .as_deref()
        .or(config.defaults.format.as_deref())
        .unwrap_or("text");
    OutputFormat::from_str(raw)
}

fn no_emoji(opts: &AnalyzeOptions, config: &ProjectConfig) -> bool {
    opts.no_emoji
        || config.defaults.no_emoji.unwrap_or(false)
        || std::env::var_os("BENFORD_NO_EMOJI").is_some()
}

fn write_output(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Report written to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered.as_bytes())?;
            stdout.flush()?;
        }
    }
    Ok(())
}

/// Tier named by a `--fail-on` value
fn parse_fail_on(threshold: &str) -> Result<SeverityTier> {
    match threshold.to_lowercase().as_str() {
        "strong" => Ok(SeverityTier::StrongDeviation),
        "moderate" => Ok(SeverityTier::ModerateDeviation),
        other => bail!("Invalid fail_on '{}'. Valid values: strong, moderate", other),
    }
}

fn fail_threshold_met(fail_on: Option<&str>, tier: SeverityTier) -> Result<bool> {
    match fail_on {
        Some(threshold) => Ok(tier >= parse_fail_on(threshold)?),
        None => Ok(false),
    }
}

/// Check if fail threshold is met
fn check_fail_threshold(fail_on: Option<&str>, tier: SeverityTier) -> Result<()> {
    if fail_threshold_met(fail_on, tier)? {
        eprintln!(
            "Failing due to --fail-on={} threshold ({})",
            fail_on.unwrap_or_default(),
            tier
        );
        std::process::exit(1);
    }
    Ok(())
}
