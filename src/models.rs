//! Report models shared by the CLI and reporters
//!
//! An [`AnalysisReport`] pairs the core [`Analysis`] with where the data came
//! from, so every output format can name the file and column it describes.

use crate::analysis::{Analysis, Digit, SeverityTier};
use serde::Serialize;

/// Everything a reporter needs to render one column's result
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// File path, or `<stdin>`
    pub source: String,
    pub column: String,
    /// Data rows read from the source (before any exclusion)
    pub rows: usize,
    #[serde(flatten)]
    pub analysis: Analysis,
}

/// One line of the observed-vs-expected comparison
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DigitRow {
    pub digit: Digit,
    pub count: u64,
    pub observed: f64,
    pub expected: f64,
}

impl DigitRow {
    /// Observed minus expected frequency
    pub fn difference(&self) -> f64 {
        self.observed - self.expected
    }
}

impl AnalysisReport {
    pub fn new(source: impl Into<String>, column: impl Into<String>, rows: usize, analysis: Analysis) -> Self {
        Self {
            source: source.into(),
            column: column.into(),
            rows,
            analysis,
        }
    }

    pub fn tier(&self) -> SeverityTier {
        self.analysis.tier
    }

    /// Per-digit comparison rows, digit 1 first
    pub fn digit_rows(&self) -> Vec<DigitRow> {
        let observed = &self.analysis.observed;
        let expected = &self.analysis.expected;
        Digit::ALL
            .iter()
            .map(|&digit| DigitRow {
                digit,
                count: observed.count(digit),
                observed: observed.frequency(digit),
                expected: expected.frequency(digit),
            })
            .collect()
    }

    /// Largest absolute gap between observed and expected frequency
    pub fn largest_deviation(&self) -> Option<DigitRow> {
        self.digit_rows().into_iter().max_by(|a, b| {
            a.difference()
                .abs()
                .partial_cmp(&b.difference().abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    }
}
