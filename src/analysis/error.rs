//! Errors raised by the analysis core

use thiserror::Error;

/// Errors that can occur while analyzing a column
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error(
        "Insufficient data: {values_seen} value(s) supplied but none has a leading digit 1-9 \
(blank, zero and sub-unit values are excluded)"
    )]
    InsufficientData { values_seen: usize },

    #[error("Invalid p-value {0}: expected a finite number in [0, 1]")]
    InvalidPValue(f64),
}

pub type AnalysisResult<T> = Result<T, AnalysisError>;
