//! Benford's Law conformity analysis
//!
//! The pipeline runs strictly forward, each stage producing an immutable
//! value for the next:
//!
//! ```text
//! values ──► digits ──► ObservedDistribution ──► GoodnessOfFit ──► SeverityTier
//!            (1-9)      vs ExpectedDistribution    (χ², 8 df)       + recommendations
//! ```
//!
//! # Tiers
//!
//! - p < 0.01: strong deviation
//! - 0.01 ≤ p < 0.05: moderate deviation
//! - p ≥ 0.05: no significant deviation
//!
//! # Example
//!
//! ```rust
//! use benford::analysis::{analyze, SeverityTier};
//!
//! let values = [Some(123.0), Some(18.5), None, Some(0.0), Some(-2.0)];
//! let analysis = analyze(values).unwrap();
//! assert_eq!(analysis.observed.total(), 3);
//! assert_eq!(analysis.summary.excluded(), 2);
//! assert!(analysis.tier >= SeverityTier::NoDeviation);
//! ```

pub mod chi_squared;
pub mod digits;
pub mod distribution;
mod error;
pub mod severity;

pub use chi_squared::{GoodnessOfFit, DEGREES_OF_FREEDOM};
pub use digits::{extract_digits, leading_digit, Digit, ExtractionSummary};
pub use distribution::{ExpectedDistribution, ObservedDistribution};
pub use error::{AnalysisError, AnalysisResult};
pub use severity::{classify, PValue, SeverityTier};

use serde::Serialize;
use tracing::debug;

/// Full result of analyzing one column
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Analysis {
    pub observed: ObservedDistribution,
    pub expected: ExpectedDistribution,
    #[serde(flatten)]
    pub test: GoodnessOfFit,
    pub tier: SeverityTier,
    pub recommendations: &'static [&'static str],
    pub summary: ExtractionSummary,
}

/// Run the Benford conformity check over one column of values.
///
/// `None` marks a missing cell. Fails with
/// [`AnalysisError::InsufficientData`] when no value has a leading digit.
pub fn analyze<I>(values: I) -> AnalysisResult<Analysis>
where
    I: IntoIterator<Item = Option<f64>>,
{
    let (digits, summary) = extract_digits(values);
    if digits.is_empty() {
        return Err(AnalysisError::InsufficientData {
            values_seen: summary.values_seen,
        });
    }

    let observed = ObservedDistribution::from_digits(&digits)?;
    let expected = ExpectedDistribution::benford();
    let test = chi_squared::evaluate(&observed, expected);
    let tier = classify(PValue::new(test.p_value)?);

    debug!(
        "Benford test: {} samples ({} excluded), chi2={:.4}, p={:.6}, tier={}",
        summary.samples,
        summary.excluded(),
        test.statistic,
        test.p_value,
        tier
    );

    Ok(Analysis {
        observed,
        expected: *expected,
        test,
        tier,
        recommendations: tier.recommendations(),
        summary,
    })
}
