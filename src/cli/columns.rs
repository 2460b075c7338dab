//! Columns command - show which columns can be analyzed

use anyhow::{Context, Result};
use benford::config::load_project_config;
use benford::source::Dataset;
use console::style;
use std::collections::HashSet;
use std::path::Path;

/// Widest a preview cell may print before being cut
const MAX_CELL_WIDTH: usize = 16;

pub(crate) fn run(file: &Path, preview: usize, delimiter: Option<u8>, no_headers: bool) -> Result<()> {
    let options = load_project_config(Path::new(".")).source_options(delimiter, no_headers);
    let dataset = if file == Path::new("-") {
        Dataset::from_reader(std::io::stdin().lock(), &options).context("Failed to read data from stdin")?
    } else {
        Dataset::from_path(file, &options).with_context(|| format!("Failed to read {}", file.display()))?
    };

    let numeric: HashSet<&str> = dataset.numeric_columns().into_iter().collect();

    println!(
        "\n{} {} ({} rows)\n",
        style("Columns in").bold(),
        style(file.display()).cyan(),
        dataset.row_count()
    );
    for name in dataset.headers() {
        if numeric.contains(name.as_str()) {
            println!("  {} {}", style("✓").green(), name);
        } else {
            println!("  {} {} {}", style("·").dim(), name, style("(not numeric)").dim());
        }
    }

    if numeric.is_empty() {
        println!("\n{} No numeric columns found.", style("✗").red());
    }

    let rows = dataset.preview(preview);
    if !rows.is_empty() {
        println!("\n{}", style(format!("Preview (first {} rows)", rows.len())).bold());
        println!("  {}", render_row(dataset.headers()));
        for row in rows {
            println!("  {}", render_row(row));
        }
    }
    println!();

    Ok(())
}

fn render_row(cells: &[String]) -> String {
    cells
        .iter()
        .map(|c| format!("{:<width$}", truncate(c.trim()), width = MAX_CELL_WIDTH))
        .collect::<Vec<_>>()
        .join(" ")
        .trim_end()
        .to_string()
}

/// Char-safe truncation with an ellipsis
fn truncate(s: &str) -> String {
    if s.chars().count() > MAX_CELL_WIDTH {
        let head: String = s.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{}...", head)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short"), "short");
        assert_eq!(truncate("a very long vendor name"), "a very long v...");
        assert_eq!(truncate("ééééééééééééééééééé").chars().count(), MAX_CELL_WIDTH);
    }

    #[test]
    fn test_render_row_pads_cells() {
        let row = vec!["id".to_string(), "42".to_string()];
        let rendered = render_row(&row);
        assert!(rendered.starts_with("id "));
        assert!(rendered.ends_with("42"));
        assert_eq!(rendered.len(), MAX_CELL_WIDTH + 1 + 2);
    }
}
