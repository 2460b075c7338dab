//! Severity tiers for a goodness-of-fit p-value

use super::error::{AnalysisError, AnalysisResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Below this p-value the deviation is strong
pub const STRONG_DEVIATION_BELOW: f64 = 0.01;
/// Below this p-value (and at or above the strong bound) the deviation is moderate
pub const MODERATE_DEVIATION_BELOW: f64 = 0.05;

/// A probability known to be finite and within `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct PValue(f64);

impl PValue {
    pub fn new(value: f64) -> AnalysisResult<Self> {
        if value.is_finite() && (0.0..=1.0).contains(&value) {
            Ok(PValue(value))
        } else {
            Err(AnalysisError::InvalidPValue(value))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

/// How far a column departs from Benford's Law.
///
/// Ordered from least to most severe, so `tier >= threshold` reads naturally.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SeverityTier {
    NoDeviation,
    ModerateDeviation,
    StrongDeviation,
}

const STRONG_RECOMMENDATIONS: &[&str] = &[
    "Investigate the data source for potential manipulation or errors.",
    "Re-perform the analysis on sub-populations or by business unit.",
    "Trace the specific transactions that drive the skew in first digits.",
];

const MODERATE_RECOMMENDATIONS: &[&str] = &[
    "Review data inputs and aggregation logic for potential bias.",
    "Consider segmenting the data and rerunning the analysis.",
    "Follow up with business unit owners for clarification.",
];

const NO_DEVIATION_RECOMMENDATIONS: &[&str] = &[
    "No immediate concern, but document this test as part of your audit file.",
    "Consider rerunning this test periodically for trend detection.",
    "No further action is required for this column.",
];

impl SeverityTier {
    /// One-line verdict for display
    pub fn headline(&self) -> &'static str {
        match self {
            SeverityTier::StrongDeviation => {
                "Strong evidence of deviation from Benford's Law (possible red flag)."
            }
            SeverityTier::ModerateDeviation => {
                "Moderate deviation from Benford's Law (review recommended)."
            }
            SeverityTier::NoDeviation => {
                "No significant deviation from Benford's Law (no red flags)."
            }
        }
    }

    /// Suggested next steps for an auditor
    pub fn recommendations(&self) -> &'static [&'static str] {
        match self {
            SeverityTier::StrongDeviation => STRONG_RECOMMENDATIONS,
            SeverityTier::ModerateDeviation => MODERATE_RECOMMENDATIONS,
            SeverityTier::NoDeviation => NO_DEVIATION_RECOMMENDATIONS,
        }
    }

    /// Upper-case identifier, e.g. `STRONG_DEVIATION`
    pub fn code(&self) -> &'static str {
        match self {
            SeverityTier::StrongDeviation => "STRONG_DEVIATION",
            SeverityTier::ModerateDeviation => "MODERATE_DEVIATION",
            SeverityTier::NoDeviation => "NO_DEVIATION",
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeverityTier::StrongDeviation => write!(f, "strong deviation"),
            SeverityTier::ModerateDeviation => write!(f, "moderate deviation"),
            SeverityTier::NoDeviation => write!(f, "no deviation"),
        }
    }
}

/// Map a p-value onto its tier. Checks run strictest first.
pub fn classify(p_value: PValue) -> SeverityTier {
    let p = p_value.get();
    if p < STRONG_DEVIATION_BELOW {
        SeverityTier::StrongDeviation
    } else if p < MODERATE_DEVIATION_BELOW {
        SeverityTier::ModerateDeviation
    } else {
        SeverityTier::NoDeviation
    }
}
