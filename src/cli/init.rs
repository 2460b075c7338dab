//! Init command - write an example project config

use anyhow::{Context, Result};
use benford::config::CONFIG_FILE_NAMES;
use console::style;
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# benford configuration
# Flags on the command line override these values.

[source]
# Field delimiter: a single character, or "tab"
delimiter = ","

# Set to false when the first line is data, not column names
has_headers = true

[defaults]
# Column to analyze (default: first numeric column)
# column = "amount"

# Output format (text, json, markdown)
format = "text"

# Disable emoji in text and markdown output
no_emoji = false

# Exit with code 1 when the deviation reaches this tier (strong, moderate)
# fail_on = "strong"
"#;

/// Run the init command
pub(crate) fn run(path: &Path) -> Result<()> {
    let dir = path
        .canonicalize()
        .with_context(|| format!("Path does not exist: {}", path.display()))?;

    if !dir.is_dir() {
        anyhow::bail!("Path is not a directory: {}", dir.display());
    }

    let config_path = dir.join(CONFIG_FILE_NAMES[0]);
    if config_path.exists() {
        println!(
            "{} Already initialized at {}",
            style("✓").green(),
            style(config_path.display()).cyan()
        );
        return Ok(());
    }

    std::fs::write(&config_path, DEFAULT_CONFIG)
        .with_context(|| "Failed to create config file")?;
    println!(
        "{} Created {}",
        style("✓").green(),
        style(config_path.display()).cyan()
    );

    println!("\nNext steps:");
    println!("  {} List numeric columns", style("benford columns data.csv").cyan());
    println!("  {} Run analysis", style("benford analyze data.csv").cyan());

    Ok(())
}
