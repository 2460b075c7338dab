//! Markdown reporter for GitHub-flavored Markdown output
//!
//! Generates reports suitable for:
//! - Audit workpapers
//! - Pull request or ticket comments
//! - Wikis and shared documentation

use super::{tier_marker, RenderOptions};
use crate::models::AnalysisReport;
use anyhow::Result;
use chrono::Local;

/// Render report as GitHub-flavored Markdown
pub fn render(report: &AnalysisReport, options: &RenderOptions) -> Result<String> {
    let mut md = String::new();

    md.push_str(&render_header(report, options));
    md.push('\n');

    md.push_str(&render_summary(report));
    md.push('\n');

    md.push_str(&render_distribution(report));
    md.push('\n');

    md.push_str(&render_recommendations(report));
    md.push('\n');

    md.push_str(&render_footer());

    Ok(md)
}

fn render_header(report: &AnalysisReport, options: &RenderOptions) -> String {
    let tier = report.tier();
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");

    format!(
        r#"# Benford's Law Analysis: `{}`

{} **{}**

Source: `{}` | Generated: {}
"#,
        report.column,
        tier_marker(tier, options.emoji),
        tier.headline(),
        report.source,
        timestamp
    )
}

fn render_summary(report: &AnalysisReport) -> String {
    let analysis = &report.analysis;
    let summary = &analysis.summary;

    format!(
        r#"## Summary

| Metric | Value |
|--------|-------|
| **Tier** | {} |
| **Chi-squared statistic** | {:.2} |
| **p-value** | {:.4} |
| **Degrees of freedom** | {} |
| **Rows read** | {} |
| **Digit samples** | {} |
| **Excluded** | {} (missing {}, zero {}, below 1 {}, non-finite {}) |
"#,
        analysis.tier.code(),
        analysis.test.statistic,
        analysis.test.p_value,
        analysis.test.degrees_of_freedom,
        report.rows,
        summary.samples,
        summary.excluded(),
        summary.missing,
        summary.zero,
        summary.sub_unit,
        summary.non_finite
    )
}

fn render_distribution(report: &AnalysisReport) -> String {
    let mut md = String::from(
        "## Digit Distribution\n\n| Digit | Count | Observed | Expected | Difference |\n|------:|------:|---------:|---------:|-----------:|\n",
    );
    for row in report.digit_rows() {
        md.push_str(&format!(
            "| {} | {} | {:.1}% | {:.1}% | {:+.1}% |\n",
            row.digit,
            row.count,
            row.observed * 100.0,
            row.expected * 100.0,
            row.difference() * 100.0
        ));
    }
    md
}

fn render_recommendations(report: &AnalysisReport) -> String {
    let mut md = String::from("## Recommended Next Steps\n\n");
    for rec in report.analysis.recommendations {
        md.push_str(&format!("- {}\n", rec));
    }
    md
}

fn render_footer() -> String {
    format!(
        "---\n\n*Generated by benford {} (p < 0.01 strong, p < 0.05 moderate)*\n",
        env!("CARGO_PKG_VERSION")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::{report_from_counts, test_report};

    #[test]
    fn test_markdown_sections() {
        let md = render(&test_report(), &RenderOptions::default()).unwrap();
        assert!(md.starts_with("# Benford's Law Analysis: `amount`"));
        assert!(md.contains("## Summary"));
        assert!(md.contains("| **Tier** | NO_DEVIATION |"));
        assert!(md.contains("## Digit Distribution"));
        assert!(md.contains("## Recommended Next Steps"));
        assert!(md.contains("Source: `ledger.csv`"));
    }

    #[test]
    fn test_markdown_has_nine_digit_rows() {
        let md = render(&report_from_counts([10; 9]), &RenderOptions::default()).unwrap();
        let table_rows = md
            .lines()
            .filter(|l| l.starts_with("| ") && l.ends_with("% |"))
            .count();
        assert_eq!(table_rows, 9);
        assert!(md.contains("STRONG_DEVIATION"));
    }

    #[test]
    fn test_markdown_no_emoji() {
        let options = RenderOptions {
            emoji: false,
            color: true,
        };
        let md = render(&report_from_counts([10; 9]), &options).unwrap();
        assert!(md.contains("[FAIL] **Strong evidence"));
        assert!(!md.contains('❌'));
    }
}
