//! CLI command definitions and handlers

mod analyze;
mod columns;
mod init;

use anyhow::Result;
use benford::source::SourceOptions;
use clap::{CommandFactory, Parser, Subcommand};
use analyze::AnalyzeOptions;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "benford")]
#[command(
    version,
    about = "Benford's Law audit tool: test whether a numeric column's leading digits look natural",
    long_about = "Extracts the leading digit (1-9) of every value in a numeric column, compares \
the observed distribution with Benford's Law using a chi-squared goodness-of-fit test \
(8 degrees of freedom) and sorts the result into an audit tier:\n\n  \
p < 0.01          strong deviation (possible red flag)\n  \
0.01 <= p < 0.05  moderate deviation (review recommended)\n  \
p >= 0.05         no significant deviation\n\n\
Blank cells, zeros and values whose magnitude is below 1 are excluded.\n\n\
Run without a subcommand to analyze a file:\n  \
benford ledger.csv",
    after_help = "\
Examples:
  benford ledger.csv                               Analyze the first numeric column
  benford analyze ledger.csv --column amount      Analyze a specific column
  benford analyze ledger.csv -f json               JSON output for scripting
  benford analyze ledger.csv -f md -o report.md    Markdown workpaper
  cat ledger.tsv | benford analyze - --delimiter tab
  benford columns ledger.csv                       List numeric columns"
)]
pub struct Cli {
    /// Data file (CSV/TSV, `-` for stdin); for `init`, the target directory
    #[arg(global = true, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Benford conformity check on one numeric column
    #[command(after_help = "\
Examples:
  benford analyze ledger.csv                                 First numeric column
  benford analyze ledger.csv --column amount                 Named column
  benford analyze ledger.csv --format json                   JSON output for scripting
  benford analyze ledger.csv --format markdown -o audit.md   Markdown report
  benford analyze ledger.csv --fail-on moderate              Exit code 1 on moderate+ deviation (CI mode)
  benford analyze export.txt --delimiter ';' --no-headers    Semicolon-separated, no header row")]
    Analyze {
        /// Column to analyze (default: first numeric column)
        #[arg(long, short = 'c')]
        column: Option<String>,

        /// Output format: text, json, markdown (or md)
        #[arg(long, short = 'f', value_parser = ["text", "json", "markdown", "md"])]
        format: Option<String>,

        /// Output file path (default: stdout)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Field delimiter: one character, or `tab`
        #[arg(long, short = 'd', value_parser = SourceOptions::parse_delimiter)]
        delimiter: Option<u8>,

        /// Treat the first line as data; columns are named column_1, column_2, ...
        #[arg(long)]
        no_headers: bool,

        /// Exit with code 1 if the deviation reaches this tier
        /// Values: strong, moderate (default: none - always exit 0)
        #[arg(long, value_parser = ["strong", "moderate"])]
        fail_on: Option<String>,

        /// Disable emoji in output (cleaner for CI logs)
        #[arg(long)]
        no_emoji: bool,
    },

    /// List the columns of a file and which ones are numeric
    Columns {
        /// Number of data rows to preview
        #[arg(long, default_value = "5")]
        preview: usize,

        /// Field delimiter: one character, or `tab`
        #[arg(long, short = 'd', value_parser = SourceOptions::parse_delimiter)]
        delimiter: Option<u8>,

        /// Treat the first line as data
        #[arg(long)]
        no_headers: bool,
    },

    /// Write an example benford.toml config file
    Init,

    /// Show version information
    Version,
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Some(Commands::Analyze {
            column,
            format,
            output,
            delimiter,
            no_headers,
            fail_on,
            no_emoji,
        }) => analyze::run(
            require_file(cli.file.as_deref())?,
            AnalyzeOptions {
                column,
                format,
                output,
                delimiter,
                no_headers,
                fail_on,
                no_emoji,
            },
        ),

        Some(Commands::Columns {
            preview,
            delimiter,
            no_headers,
        }) => columns::run(require_file(cli.file.as_deref())?, preview, delimiter, no_headers),

        Some(Commands::Init) => init::run(cli.file.as_deref().unwrap_or(Path::new("."))),

        Some(Commands::Version) => {
            println!("benford {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }

        None => {
            let Some(file) = cli.file.as_deref() else {
                Cli::command().print_help()?;
                return Ok(());
            };
            // Check if the path looks like an unknown subcommand
            check_unknown_subcommand(file)?;
            // Default: analyze with project defaults
            analyze::run(file, AnalyzeOptions::default())
        }
    }
}

fn require_file(file: Option<&Path>) -> Result<&Path> {
    file.ok_or_else(|| anyhow::anyhow!("Missing input FILE. Pass a CSV/TSV path, or '-' for stdin."))
}

/// Check if the path looks like a mistyped subcommand and bail with a helpful message
fn check_unknown_subcommand(path: &Path) -> Result<()> {
    let path_str = path.to_string_lossy();
    let looks_like_command = !path.exists()
        && path_str != "-"
        && !path_str.contains('/')
        && !path_str.contains('\\')
        && !path_str.contains('.');
    if looks_like_command {
        let known_commands = ["analyze", "columns", "init", "version"];
        anyhow::bail!(
            "Unknown command '{}'. Run 'benford --help' for available commands.\n\nDid you mean one of: {}?",
            path_str,
            known_commands.join(", ")
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_help_text_describes_tiers() {
        let cmd = Cli::command();
        let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();
        assert!(about.starts_with("Benford's Law audit tool"));
        let long_about = cmd.get_long_about().map(|s| s.to_string()).unwrap_or_default();
        assert!(long_about.contains("p < 0.01"));
        assert!(long_about.contains("benford ledger.csv"));
    }

    #[test]
    fn test_parse_analyze_flags() {
        let cli = Cli::try_parse_from([
            "benford", "analyze", "data.csv", "--column", "amount", "-f", "json", "--delimiter", "tab",
            "--fail-on", "moderate",
        ])
        .unwrap();
        assert_eq!(cli.file.as_deref(), Some(Path::new("data.csv")));
        match cli.command {
            Some(Commands::Analyze {
                column,
                format,
                delimiter,
                fail_on,
                ..
            }) => {
                assert_eq!(column.as_deref(), Some("amount"));
                assert_eq!(format.as_deref(), Some("json"));
                assert_eq!(delimiter, Some(b'\t'));
                assert_eq!(fail_on.as_deref(), Some("moderate"));
            }
            other => panic!("expected analyze, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["benford", "analyze", "x.csv", "-f", "sarif"]).is_err());
        assert!(Cli::try_parse_from(["benford", "analyze", "x.csv", "--fail-on", "low"]).is_err());
    }

    #[test]
    fn test_unknown_subcommand_detection() {
        assert!(check_unknown_subcommand(Path::new("analyse")).is_err());
        assert!(check_unknown_subcommand(Path::new("missing.csv")).is_ok());
        assert!(check_unknown_subcommand(Path::new("-")).is_ok());
    }
}
