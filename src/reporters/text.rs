//! Text (terminal) reporter with colors and formatting

use super::{tier_marker, RenderOptions};
use crate::analysis::SeverityTier;
use crate::models::{AnalysisReport, DigitRow};
use anyhow::Result;

/// Reset ANSI color
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[2m";

/// Width of the longest bar in the distribution chart
const CHART_WIDTH: usize = 40;

/// Tier colors (ANSI escape codes)
fn tier_color(tier: SeverityTier) -> &'static str {
    match tier {
        SeverityTier::StrongDeviation => "\x1b[31m",   // Red
        SeverityTier::ModerateDeviation => "\x1b[33m", // Yellow
        SeverityTier::NoDeviation => "\x1b[32m",       // Green
    }
}

/// ANSI codes, or empty strings when color is off
struct Palette {
    reset: &'static str,
    bold: &'static str,
    dim: &'static str,
    tier: &'static str,
}

impl Palette {
    fn new(tier: SeverityTier, color: bool) -> Self {
        if color {
            Self {
                reset: RESET,
                bold: BOLD,
                dim: DIM,
                tier: tier_color(tier),
            }
        } else {
            Self {
                reset: "",
                bold: "",
                dim: "",
                tier: "",
            }
        }
    }
}

/// Render report as formatted terminal output
pub fn render(report: &AnalysisReport, options: &RenderOptions) -> Result<String> {
    let analysis = &report.analysis;
    let summary = &analysis.summary;
    let p = Palette::new(analysis.tier, options.color);
    let (reset, bold, dim) = (p.reset, p.bold, p.dim);
    let mut out = String::new();

    // Header
    out.push_str(&format!("\n{bold}Benford's Law Analysis{reset}\n"));
    out.push_str(&format!(
        "{dim}──────────────────────────────────────{reset}\n"
    ));
    out.push_str(&format!(
        "Source: {}  Column: {bold}{}{reset}  Rows: {}  Samples: {}  Excluded: {}\n",
        report.source,
        report.column,
        report.rows,
        summary.samples,
        summary.excluded()
    ));
    if summary.excluded() > 0 {
        out.push_str(&format!(
            "{dim}  missing {}, zero {}, below 1 {}, non-finite {}{reset}\n",
            summary.missing, summary.zero, summary.sub_unit, summary.non_finite
        ));
    }
    out.push('\n');

    // Distribution table with chart
    out.push_str(&format!("{bold}DIGIT DISTRIBUTION{reset}\n"));
    out.push_str(&format!(
        "{dim}  DIGIT   COUNT  OBSERVED  EXPECTED     DIFF  (# observed, | expected){reset}\n"
    ));
    let rows = report.digit_rows();
    let scale = chart_scale(&rows);
    for row in &rows {
        out.push_str(&format!(
            "  {:>5}  {:>6}  {:>7.1}%  {:>7.1}%  {:>+6.1}%  {}\n",
            row.digit,
            row.count,
            row.observed * 100.0,
            row.expected * 100.0,
            row.difference() * 100.0,
            bar(row, scale)
        ));
    }
    out.push('\n');

    // Test result
    out.push_str(&format!("{bold}CHI-SQUARED TEST{reset}\n"));
    out.push_str(&format!(
        "  Statistic: {bold}{:.2}{reset}  p-value: {bold}{:.4}{reset}  df: {}\n\n",
        analysis.test.statistic, analysis.test.p_value, analysis.test.degrees_of_freedom
    ));

    // Verdict
    out.push_str(&format!(
        "{}{bold}{} {}{reset}\n",
        p.tier,
        tier_marker(analysis.tier, options.emoji),
        analysis.tier.headline()
    ));
    if let Some(worst) = report.largest_deviation() {
        out.push_str(&format!(
            "{dim}  Largest gap: digit {} ({:+.1} points){reset}\n",
            worst.digit,
            worst.difference() * 100.0
        ));
    }
    out.push('\n');

    // Recommendations
    out.push_str(&format!("{bold}RECOMMENDED NEXT STEPS{reset}\n"));
    for rec in analysis.recommendations {
        out.push_str(&format!("  - {}\n", rec));
    }

    Ok(out)
}

/// Characters per unit of frequency so the tallest bar fits CHART_WIDTH
fn chart_scale(rows: &[DigitRow]) -> f64 {
    let peak = rows
        .iter()
        .map(|r| r.observed.max(r.expected))
        .fold(0.0_f64, f64::max);
    if peak > 0.0 {
        CHART_WIDTH as f64 / peak
    } else {
        0.0
    }
}

/// `#` run for the observed frequency with a `|` where expected falls
fn bar(row: &DigitRow, scale: f64) -> String {
    let filled = (row.observed * scale).round() as usize;
    let marker = (row.expected * scale).round() as usize;
    let width = filled.max(marker + 1);
    (0..width)
        .map(|i| {
            if i == marker {
                '|'
            } else if i < filled {
                '#'
            } else {
                ' '
            }
        })
        .collect::<String>()
        .trim_end()
        .to_string()
}
