//! Pearson chi-squared goodness-of-fit against the Benford table
//!
//! The p-value is the upper tail of the chi-squared distribution,
//! `Q(k/2, x/2)` where `Q` is the regularized upper incomplete gamma
//! function. `Q` is evaluated with the power series for `x < a + 1` and a
//! modified Lentz continued fraction otherwise.

use super::distribution::{ExpectedDistribution, ObservedDistribution};
use serde::Serialize;

/// Nine digit categories minus one constraint (counts sum to the total)
pub const DEGREES_OF_FREEDOM: u32 = 8;

const MAX_ITERATIONS: usize = 500;
const EPSILON: f64 = 1e-15;
const TINY: f64 = 1e-300;

/// Outcome of one goodness-of-fit test
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoodnessOfFit {
    #[serde(rename = "chi2_statistic")]
    pub statistic: f64,
    pub p_value: f64,
    pub degrees_of_freedom: u32,
}

/// Test observed digit counts against expected frequencies scaled to the
/// observed total. `ObservedDistribution` is never empty, so every expected
/// count is positive.
pub fn evaluate(observed: &ObservedDistribution, expected: &ExpectedDistribution) -> GoodnessOfFit {
    let observed_counts = observed.counts().map(|c| c as f64);
    let expected_counts = expected.expected_counts(observed.total());
    let statistic = pearson_statistic(&observed_counts, &expected_counts);
    let p_value = chi_squared_sf(statistic, DEGREES_OF_FREEDOM);

    GoodnessOfFit {
        statistic,
        p_value,
        degrees_of_freedom: DEGREES_OF_FREEDOM,
    }
}

/// `Σ (O - E)² / E`. Every expected count must be positive.
pub fn pearson_statistic(observed: &[f64], expected: &[f64]) -> f64 {
    debug_assert_eq!(observed.len(), expected.len());
    observed
        .iter()
        .zip(expected)
        .map(|(o, e)| (o - e).powi(2) / e)
        .sum()
}

/// Survival function `P(X > x)` of the chi-squared distribution.
pub fn chi_squared_sf(x: f64, degrees_of_freedom: u32) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    let a = f64::from(degrees_of_freedom) / 2.0;
    regularized_upper_gamma(a, x / 2.0).clamp(0.0, 1.0)
}

/// `Q(a, x) = Γ(a, x) / Γ(a)` for `a > 0`, `x >= 0`.
fn regularized_upper_gamma(a: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 1.0;
    }
    if x < a + 1.0 {
        1.0 - lower_gamma_series(a, x)
    } else {
        upper_gamma_continued_fraction(a, x)
    }
}

/// `exp(-x) x^a / Γ(a)`, the common prefactor of both expansions
fn gamma_prefactor(a: f64, x: f64) -> f64 {
    (-x + a * x.ln() - ln_gamma(a)).exp()
}

fn lower_gamma_series(a: f64, x: f64) -> f64 {
    let mut ap = a;
    let mut term = 1.0 / a;
    let mut sum = term;
    for _ in 0..MAX_ITERATIONS {
        ap += 1.0;
        term *= x / ap;
        sum += term;
        if term.abs() < sum.abs() * EPSILON {
            break;
        }
    }
    sum * gamma_prefactor(a, x)
}

fn upper_gamma_continued_fraction(a: f64, x: f64) -> f64 {
    let mut b = x + 1.0 - a;
    let mut c = 1.0 / TINY;
    let mut d = 1.0 / b;
    let mut h = d;
    for i in 1..=MAX_ITERATIONS {
        let i = i as f64;
        let an = -i * (i - a);
        b += 2.0;
        d = an * d + b;
        if d.abs() < TINY {
            d = TINY;
        }
        c = b + an / c;
        if c.abs() < TINY {
            c = TINY;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;
        if (delta - 1.0).abs() < EPSILON {
            break;
        }
    }
    gamma_prefactor(a, x) * h
}

/// Lanczos approximation (g = 7, n = 9)
fn ln_gamma(x: f64) -> f64 {
    const G: f64 = 7.0;
    const COEFFICIENTS: [f64; 9] = [
        0.999_999_999_999_809_9,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_1,
        -176.615_029_162_140_6,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if x < 0.5 {
        // Reflection: Γ(x) Γ(1 - x) = π / sin(πx)
        let pi = std::f64::consts::PI;
        return (pi / (pi * x).sin()).ln() - ln_gamma(1.0 - x);
    }

    let x = x - 1.0;
    let t = x + G + 0.5;
    let series = COEFFICIENTS[1..]
        .iter()
        .enumerate()
        .fold(COEFFICIENTS[0], |acc, (i, c)| acc + c / (x + i as f64 + 1.0));
    0.5 * (2.0 * std::f64::consts::PI).ln() + (x + 0.5) * t.ln() - t + series.ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Closed form for even degrees of freedom: e^{-y} Σ_{i<k/2} y^i / i!
    fn sf_even_df(x: f64, df: u32) -> f64 {
        let y = x / 2.0;
        let mut term = 1.0;
        let mut sum = 1.0;
        for i in 1..(df / 2) {
            term *= y / f64::from(i);
            sum += term;
        }
        (-y).exp() * sum
    }

    #[test]
    fn test_ln_gamma_known_values() {
        assert!(ln_gamma(1.0).abs() < 1e-12);
        assert!(ln_gamma(2.0).abs() < 1e-12);
        assert!((ln_gamma(4.0) - 6.0f64.ln()).abs() < 1e-12);
        assert!((ln_gamma(0.5) - std::f64::consts::PI.sqrt().ln()).abs() < 1e-12);
    }

    #[test]
    fn test_matches_closed_form_for_eight_df() {
        for x in [0.1, 1.0, 3.5, 7.3, 8.0, 9.0, 12.0, 15.5, 20.0, 35.0, 60.0] {
            let got = chi_squared_sf(x, 8);
            let want = sf_even_df(x, 8);
            assert!(
                (got - want).abs() < 1e-10,
                "x={x}: got {got}, want {want}"
            );
        }
    }

    #[test]
    fn test_critical_values() {
        assert!((chi_squared_sf(15.507_313_055_865_453, 8) - 0.05).abs() < 1e-9);
        assert!((chi_squared_sf(20.090_235_029_663_233, 8) - 0.01).abs() < 1e-9);
    }

    #[test]
    fn test_tail_bounds() {
        assert_eq!(chi_squared_sf(0.0, 8), 1.0);
        let far = chi_squared_sf(100.0, 8);
        assert!(far > 0.0 && far < 1e-16);
        assert_eq!(chi_squared_sf(1e6, 8), 0.0);
    }

    #[test]
    fn test_odd_degrees_of_freedom() {
        // P(X > 3.841459) = 0.05 for one degree of freedom
        assert!((chi_squared_sf(3.841_458_820_694_124, 1) - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_pearson_zero_when_equal() {
        let expected = ExpectedDistribution::benford().expected_counts(1000);
        assert_eq!(pearson_statistic(&expected, &expected), 0.0);
        assert_eq!(chi_squared_sf(0.0, DEGREES_OF_FREEDOM), 1.0);
    }

    #[test]
    fn test_evaluate_hundreds_scenario() {
        let observed = ObservedDistribution::from_counts([6, 1, 1, 0, 0, 0, 0, 0, 0]).unwrap();
        let result = evaluate(&observed, ExpectedDistribution::benford());
        assert!((result.statistic - 8.659_025_972_857_965).abs() < 1e-9);
        assert!((result.p_value - 0.371_871_242_079_038_93).abs() < 1e-9);
        assert_eq!(result.degrees_of_freedom, 8);
    }

    #[test]
    fn test_evaluate_large_benford_sample() {
        let expected = ExpectedDistribution::benford();
        let counts = expected.expected_counts(1_000_000).map(|c| c.round() as u64);
        let observed = ObservedDistribution::from_counts(counts).unwrap();
        let result = evaluate(&observed, expected);
        assert!(result.statistic < 0.01);
        assert!(result.p_value > 0.999);
    }

    #[test]
    fn test_evaluate_single_sample() {
        let observed = ObservedDistribution::from_counts([0, 0, 0, 0, 1, 0, 0, 0, 0]).unwrap();
        let result = evaluate(&observed, ExpectedDistribution::benford());
        assert!((result.statistic - 11.629_253_136_513_338).abs() < 1e-9);
        assert!(result.p_value.is_finite() && result.p_value > 0.0 && result.p_value < 1.0);
    }

    #[test]
    fn test_evaluate_uniform_is_extreme() {
        let observed = ObservedDistribution::from_counts([10; 9]).unwrap();
        let result = evaluate(&observed, ExpectedDistribution::benford());
        assert!((result.statistic - 36.152_846_362_096_206).abs() < 1e-9);
        assert!((result.p_value - 1.646_411_501_301_986e-5).abs() < 1e-12);
        assert!(result.p_value.is_finite());
    }
}
