//! Leading-digit extraction
//!
//! A value contributes a sample only when the integer part of its magnitude
//! is at least 1. Blanks, exact zeros, non-finite values and values whose
//! magnitude truncates to zero (`0.5`, `-0.03`) are dropped and counted in
//! [`ExtractionSummary`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A leading decimal digit, always in `1..=9`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    /// All nine digits in ascending order
    pub const ALL: [Digit; 9] = [
        Digit(1),
        Digit(2),
        Digit(3),
        Digit(4),
        Digit(5),
        Digit(6),
        Digit(7),
        Digit(8),
        Digit(9),
    ];

    pub fn new(value: u8) -> Option<Self> {
        (1..=9).contains(&value).then_some(Digit(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Zero-based slot for per-digit arrays
    pub(crate) fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl TryFrom<u8> for Digit {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Digit::new(value).ok_or_else(|| format!("{} is not a leading digit (1-9)", value))
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Why a raw value produced no digit sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exclusion {
    /// Blank or null cell
    Missing,
    /// Exactly zero
    Zero,
    /// Nonzero but |x| < 1, so the integer part is 0
    SubUnit,
    /// NaN or infinite
    NonFinite,
}

/// Tallies of what happened to each input value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    pub values_seen: usize,
    pub samples: usize,
    pub missing: usize,
    pub zero: usize,
    pub sub_unit: usize,
    pub non_finite: usize,
}

impl ExtractionSummary {
    pub fn excluded(&self) -> usize {
        self.missing + self.zero + self.sub_unit + self.non_finite
    }

    fn record(&mut self, exclusion: Exclusion) {
        match exclusion {
            Exclusion::Missing => self.missing += 1,
            Exclusion::Zero => self.zero += 1,
            Exclusion::SubUnit => self.sub_unit += 1,
            Exclusion::NonFinite => self.non_finite += 1,
        }
    }
}

/// Classify a single cell: either its leading digit or the reason it has none.
pub fn inspect(value: Option<f64>) -> Result<Digit, Exclusion> {
    let Some(value) = value else {
        return Err(Exclusion::Missing);
    };
    if !value.is_finite() {
        return Err(Exclusion::NonFinite);
    }
    if value == 0.0 {
        return Err(Exclusion::Zero);
    }
    leading_digit(value).ok_or(Exclusion::SubUnit)
}

/// Leading digit of one value, if it has one.
///
/// The integer part of `|value|` is rendered and its first character read;
/// zero, sub-unit and non-finite values yield `None`.
pub fn leading_digit(value: f64) -> Option<Digit> {
    // Display for f64 never switches to exponent notation, so a truncated
    // value renders as its plain integer digits ("0", "123", "1000000...").
    let rendered = value.abs().trunc().to_string();
    rendered
        .bytes()
        .next()
        .and_then(|b| Digit::new(b.wrapping_sub(b'0')))
}

/// Extract the leading digit of every usable value.
///
/// Output order follows input order; the result is never longer than the input.
pub fn extract_digits<I>(values: I) -> (Vec<Digit>, ExtractionSummary)
where
    I: IntoIterator<Item = Option<f64>>,
{
    let mut summary = ExtractionSummary::default();
    let mut digits = Vec::new();

    for value in values {
        summary.values_seen += 1;
        match inspect(value) {
            Ok(digit) => digits.push(digit),
            Err(exclusion) => summary.record(exclusion),
        }
    }

    summary.samples = digits.len();
    (digits, summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digits_of(values: &[f64]) -> Vec<u8> {
        let (digits, _) = extract_digits(values.iter().copied().map(Some));
        digits.into_iter().map(Digit::get).collect()
    }

    #[test]
    fn test_hundreds_scenario() {
        let values = [100.0, 150.0, 123.0, 199.0, 250.0, 300.0, 111.0, 120.0];
        assert_eq!(digits_of(&values), vec![1, 1, 1, 1, 2, 3, 1, 1]);
    }

    #[test]
    fn test_sign_is_ignored() {
        let (digits, summary) = extract_digits([Some(-45.0), Some(67.0), Some(-12.0)]);
        let digits: Vec<u8> = digits.into_iter().map(Digit::get).collect();
        assert_eq!(digits, vec![4, 6, 1]);
        assert_eq!(summary.samples, 3);
    }

    #[test]
    fn test_sub_unit_values_are_excluded() {
        let (digits, summary) = extract_digits([Some(0.5), Some(0.03), Some(5.0)]);
        assert_eq!(digits, vec![Digit::new(5).unwrap()]);
        assert_eq!(summary.sub_unit, 2);
        assert_eq!(summary.samples, 1);
    }

    #[test]
    fn test_fractional_values_truncate() {
        assert_eq!(digits_of(&[9.99, 1.5, 42.7, -3.2]), vec![9, 1, 4, 3]);
    }

    #[test]
    fn test_zero_missing_and_non_finite() {
        let (digits, summary) = extract_digits([
            Some(0.0),
            Some(-0.0),
            None,
            Some(f64::NAN),
            Some(f64::INFINITY),
            Some(f64::NEG_INFINITY),
            Some(7.0),
        ]);
        assert_eq!(digits.len(), 1);
        assert_eq!(summary.values_seen, 7);
        assert_eq!(summary.zero, 2);
        assert_eq!(summary.missing, 1);
        assert_eq!(summary.non_finite, 3);
        assert_eq!(summary.excluded(), 6);
    }

    #[test]
    fn test_large_magnitudes() {
        assert_eq!(leading_digit(1e20).map(Digit::get), Some(1));
        assert_eq!(leading_digit(8.5e15).map(Digit::get), Some(8));
        assert_eq!(leading_digit(f64::MAX).map(Digit::get), Some(1));
    }

    #[test]
    fn test_leading_digit_without_one() {
        assert_eq!(leading_digit(0.0), None);
        assert_eq!(leading_digit(0.75), None);
        assert_eq!(leading_digit(f64::NAN), None);
        assert_eq!(leading_digit(f64::INFINITY), None);
        assert_eq!(leading_digit(-305.2).map(Digit::get), Some(3));
    }

    #[test]
    fn test_inspect_reasons() {
        assert_eq!(inspect(None), Err(Exclusion::Missing));
        assert_eq!(inspect(Some(0.0)), Err(Exclusion::Zero));
        assert_eq!(inspect(Some(-0.999)), Err(Exclusion::SubUnit));
        assert_eq!(inspect(Some(f64::NAN)), Err(Exclusion::NonFinite));
        assert_eq!(inspect(Some(1.0)), Ok(Digit::new(1).unwrap()));
    }

    #[test]
    fn test_digit_bounds() {
        assert!(Digit::new(0).is_none());
        assert!(Digit::new(10).is_none());
        assert_eq!(Digit::ALL.len(), 9);
        assert_eq!(Digit::ALL[8].index(), 8);
        assert!(Digit::try_from(0u8).is_err());
    }
}
