//! Observed and expected leading-digit distributions

use super::digits::Digit;
use super::error::{AnalysisError, AnalysisResult};
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Digit counts from one column. Always built from at least one sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedDistribution {
    counts: [u64; 9],
    total: u64,
}

impl ObservedDistribution {
    /// Tally a sequence of digit samples.
    pub fn from_digits(digits: &[Digit]) -> AnalysisResult<Self> {
        let mut counts = [0u64; 9];
        for digit in digits {
            counts[digit.index()] += 1;
        }
        Self::from_counts(counts)
    }

    /// Build from precomputed counts, index 0 holding digit 1.
    pub fn from_counts(counts: [u64; 9]) -> AnalysisResult<Self> {
        let total: u64 = counts.iter().sum();
        if total == 0 {
            return Err(AnalysisError::InsufficientData { values_seen: 0 });
        }
        Ok(Self { counts, total })
    }

    pub fn count(&self, digit: Digit) -> u64 {
        self.counts[digit.index()]
    }

    pub fn counts(&self) -> &[u64; 9] {
        &self.counts
    }

    /// Number of digit samples (not input rows)
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn frequency(&self, digit: Digit) -> f64 {
        self.count(digit) as f64 / self.total as f64
    }

    pub fn frequencies(&self) -> [f64; 9] {
        Digit::ALL.map(|d| self.frequency(d))
    }
}

impl Serialize for ObservedDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let counts: BTreeMap<u8, u64> = Digit::ALL.iter().map(|d| (d.get(), self.count(*d))).collect();
        let frequencies: BTreeMap<u8, f64> =
            Digit::ALL.iter().map(|d| (d.get(), self.frequency(*d))).collect();

        let mut state = serializer.serialize_struct("ObservedDistribution", 3)?;
        state.serialize_field("total", &self.total)?;
        state.serialize_field("counts", &counts)?;
        state.serialize_field("frequencies", &frequencies)?;
        state.end()
    }
}

/// Theoretical Benford frequencies, `log10(1 + 1/d)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpectedDistribution {
    frequencies: [f64; 9],
}

impl ExpectedDistribution {
    /// The process-wide Benford table.
    pub fn benford() -> &'static ExpectedDistribution {
        static BENFORD: OnceLock<ExpectedDistribution> = OnceLock::new();
        BENFORD.get_or_init(|| ExpectedDistribution {
            frequencies: Digit::ALL.map(|d| (1.0 + 1.0 / f64::from(d.get())).log10()),
        })
    }

    pub fn frequency(&self, digit: Digit) -> f64 {
        self.frequencies[digit.index()]
    }

    pub fn frequencies(&self) -> &[f64; 9] {
        &self.frequencies
    }

    /// Expected counts for a sample of `total` digits
    pub fn expected_counts(&self, total: u64) -> [f64; 9] {
        self.frequencies.map(|f| f * total as f64)
    }
}

impl Serialize for ExpectedDistribution {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let frequencies: BTreeMap<u8, f64> =
            Digit::ALL.iter().map(|d| (d.get(), self.frequency(*d))).collect();
        frequencies.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits(values: &[u8]) -> Vec<Digit> {
        values.iter().map(|&v| Digit::new(v).unwrap()).collect()
    }

    #[test]
    fn test_benford_values() {
        let expected = ExpectedDistribution::benford();
        for d in Digit::ALL {
            let formula = (1.0 + 1.0 / f64::from(d.get())).log10();
            assert!((expected.frequency(d) - formula).abs() < 1e-15);
        }
        assert!((expected.frequency(Digit::ALL[0]) - 0.30103).abs() < 1e-5);
        assert!((expected.frequency(Digit::ALL[8]) - 0.04576).abs() < 1e-5);
    }

    #[test]
    fn test_benford_sums_to_one() {
        let sum: f64 = ExpectedDistribution::benford().frequencies().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_benford_monotonic() {
        let freqs = ExpectedDistribution::benford().frequencies();
        assert!(freqs.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_benford_is_shared() {
        assert!(std::ptr::eq(
            ExpectedDistribution::benford(),
            ExpectedDistribution::benford()
        ));
    }

    #[test]
    fn test_observed_hundreds_scenario() {
        let observed = ObservedDistribution::from_digits(&digits(&[1, 1, 1, 1, 2, 3, 1, 1])).unwrap();
        assert_eq!(observed.total(), 8);
        assert_eq!(observed.counts(), &[6, 1, 1, 0, 0, 0, 0, 0, 0]);
        assert!((observed.frequency(Digit::ALL[0]) - 0.75).abs() < 1e-12);
        assert!((observed.frequency(Digit::ALL[1]) - 0.125).abs() < 1e-12);
        assert!((observed.frequency(Digit::ALL[2]) - 0.125).abs() < 1e-12);
        assert_eq!(observed.frequency(Digit::ALL[8]), 0.0);
    }

    #[test]
    fn test_observed_frequencies_sum_to_one() {
        let observed = ObservedDistribution::from_digits(&digits(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 1, 1, 7])).unwrap();
        let sum: f64 = observed.frequencies().iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_observed_requires_samples() {
        assert_eq!(
            ObservedDistribution::from_digits(&[]),
            Err(AnalysisError::InsufficientData { values_seen: 0 })
        );
        assert!(ObservedDistribution::from_counts([0; 9]).is_err());
    }

    #[test]
    fn test_expected_counts_scale() {
        let counts = ExpectedDistribution::benford().expected_counts(8);
        let sum: f64 = counts.iter().sum();
        assert!((sum - 8.0).abs() < 1e-9);
        assert!((counts[0] - 8.0 * 2.0f64.log10()).abs() < 1e-12);
    }

    #[test]
    fn test_serialized_keys_are_digits() {
        let observed = ObservedDistribution::from_counts([2, 1, 0, 0, 0, 0, 0, 0, 1]).unwrap();
        let json = serde_json::to_value(&observed).unwrap();
        assert_eq!(json["total"], 4);
        assert_eq!(json["counts"]["1"], 2);
        assert_eq!(json["counts"]["5"], 0);
        assert_eq!(json["frequencies"]["9"], 0.25);

        let expected = serde_json::to_value(ExpectedDistribution::benford()).unwrap();
        assert_eq!(expected.as_object().unwrap().len(), 9);
    }
}
