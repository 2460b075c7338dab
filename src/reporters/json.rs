//! JSON reporter
//!
//! Outputs the full AnalysisReport as pretty-printed JSON.
//! Useful for machine consumption, piping to jq, or further processing.

use crate::models::AnalysisReport;
use anyhow::Result;

/// Render report as JSON
pub fn render(report: &AnalysisReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporters::tests::{report_from_counts, test_report};

    #[test]
    fn test_json_render_valid() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let parsed: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed["tier"], "no_deviation");
        assert_eq!(parsed["column"], "amount");
        assert_eq!(parsed["observed"]["total"], 100);
        assert_eq!(parsed["summary"]["missing"], 1);
        assert_eq!(parsed["summary"]["zero"], 1);
        assert_eq!(parsed["summary"]["sub_unit"], 1);
    }

    #[test]
    fn test_json_strong_deviation() {
        let report = report_from_counts([10; 9]);
        let parsed: serde_json::Value =
            serde_json::from_str(&render(&report).expect("render JSON")).expect("parse JSON");
        assert_eq!(parsed["tier"], "strong_deviation");
        assert!(parsed["p_value"].as_f64().expect("p_value") < 0.01);
        assert!(parsed["recommendations"][0]
            .as_str()
            .expect("recommendation")
            .contains("manipulation"));
    }
}
