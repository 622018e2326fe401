// Numeric primitives for significance testing
//
// Thin wrappers over the statistics stack so the tests never reimplement
// distribution math themselves:
// - statrs' Statistics for f64 means
// - aprender's ttest_ind (Welch variant) for two-sample p-values
// - statrs' OrderStatistics for the quartiles behind outlier filtering
// - statrs' Binomial for the binomial cumulative distribution function
//
// Samples stay in f64 end to end. aprender works in f32, so values are
// centered on the pooled mean before they are narrowed for the t-test.

use anyhow::{Context, Result};
use statrs::distribution::{Binomial, DiscreteCDF};
use statrs::statistics::{Data, OrderStatistics, Statistics};

/// Tukey fence multiplier applied to the interquartile range
pub const TUKEY_FENCE: f64 = 1.5;

/// Result of a two-sample Welch t-test
#[derive(Debug, Clone, Copy)]
pub struct WelchTTest {
    /// t-statistic value
    pub statistic: f64,

    /// p-value (two-tailed) - probability that a difference at least this
    /// extreme in either direction is due to chance
    pub pvalue: f64,

    /// Welch-Satterthwaite degrees of freedom
    pub df: f64,
}

/// Reject samples containing NaN or infinities before they reach the
/// statistics stack
fn ensure_finite(sample: &[f64], label: &str) -> Result<()> {
    if let Some(position) = sample.iter().position(|value| !value.is_finite()) {
        anyhow::bail!(
            "{} sample contains a non-finite value at index {}",
            label,
            position
        );
    }
    Ok(())
}

/// Arithmetic mean of a sample
pub fn mean(sample: &[f64]) -> Result<f64> {
    if sample.is_empty() {
        anyhow::bail!("Cannot compute the mean of an empty sample");
    }

    let value = sample.iter().mean();
    if !value.is_finite() {
        anyhow::bail!("Mean of {} values is not finite", sample.len());
    }
    Ok(value)
}

fn is_constant(sample: &[f64]) -> bool {
    sample.windows(2).all(|pair| pair[0] == pair[1])
}

/// Shift a sample by `center` and narrow it to the precision aprender uses
fn centered_f32(sample: &[f64], center: f64, label: &str) -> Result<Vec<f32>> {
    let centered: Vec<f32> = sample
        .iter()
        .map(|value| (value - center) as f32)
        .collect();
    if centered.iter().any(|value| !value.is_finite()) {
        anyhow::bail!("{} sample is out of range for the t-test", label);
    }
    Ok(centered)
}

/// Compare two samples using Welch's independent t-test
///
/// Uses aprender's `ttest_ind()` with the unequal variance assumption, so the
/// degrees of freedom follow the Welch-Satterthwaite equation and the p-value
/// is two-sided. The test is shift invariant, so both samples are centered on
/// their pooled mean first; large offsets do not lose the difference to f32
/// rounding.
///
/// Two constant samples with different means have a zero standard error: the
/// statistic is infinite and the p-value is exactly 0.
///
/// # Example
/// ```
/// use sigdiff::statistics::welch_ttest;
///
/// let tested = [25.0, 27.0, 26.0, 28.0, 25.0];
/// let control = [10.0, 12.0, 11.0, 13.0, 10.0];
///
/// let result = welch_ttest(&tested, &control).unwrap();
/// assert!(result.pvalue < 0.05);
/// ```
pub fn welch_ttest(tested: &[f64], control: &[f64]) -> Result<WelchTTest> {
    if tested.len() < 2 || control.len() < 2 {
        anyhow::bail!(
            "Need at least 2 values per sample for a t-test (tested={}, control={})",
            tested.len(),
            control.len()
        );
    }

    ensure_finite(tested, "tested")?;
    ensure_finite(control, "control")?;

    let diff = mean(tested)? - mean(control)?;
    if is_constant(tested) && is_constant(control) {
        if diff == 0.0 {
            anyhow::bail!("t-test is undefined for two identical constant samples");
        }
        return Ok(WelchTTest {
            statistic: diff.signum() * f64::INFINITY,
            pvalue: 0.0,
            df: (tested.len() + control.len() - 2) as f64,
        });
    }

    let center = tested.iter().chain(control.iter()).mean();
    let tested_centered = centered_f32(tested, center, "tested")?;
    let control_centered = centered_f32(control, center, "control")?;

    let ttest_result =
        aprender::stats::hypothesis::ttest_ind(&tested_centered, &control_centered, false)
            .context("Failed to compute t-test")?;

    if ttest_result.statistic.is_nan() || !ttest_result.pvalue.is_finite() {
        anyhow::bail!(
            "t-test produced a non-finite result (statistic={}, p={}, df={})",
            ttest_result.statistic,
            ttest_result.pvalue,
            ttest_result.df
        );
    }

    Ok(WelchTTest {
        statistic: f64::from(ttest_result.statistic),
        pvalue: f64::from(ttest_result.pvalue),
        df: f64::from(ttest_result.df),
    })
}

/// Remove outliers using Tukey's fences
///
/// Values outside `[Q1 - 1.5*IQR, Q3 + 1.5*IQR]` are dropped. The input is
/// left untouched; surviving values keep their original order.
pub fn filter_outliers(sample: &[f64]) -> Result<Vec<f64>> {
    if sample.is_empty() {
        return Ok(Vec::new());
    }
    ensure_finite(sample, "filtered")?;

    let mut data = Data::new(sample.to_vec());
    let q1 = data.lower_quartile();
    let q3 = data.upper_quartile();
    if !q1.is_finite() || !q3.is_finite() {
        anyhow::bail!("Failed to compute quartiles (q1={}, q3={})", q1, q3);
    }

    let iqr = q3 - q1;
    let lower = q1 - TUKEY_FENCE * iqr;
    let upper = q3 + TUKEY_FENCE * iqr;

    Ok(sample
        .iter()
        .copied()
        .filter(|value| (lower..=upper).contains(value))
        .collect())
}

/// Binomial cumulative distribution function
///
/// Returns `P(X <= successes)` for `X ~ Binomial(trials, probability)`.
pub fn binomial_cdf(probability: f64, trials: u64, successes: u64) -> Result<f64> {
    let binomial = Binomial::new(probability, trials).map_err(|e| {
        anyhow::anyhow!(
            "Invalid binomial distribution (p={}, n={}): {}",
            probability,
            trials,
            e
        )
    })?;

    Ok(binomial.cdf(successes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_basic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap(), 3.0);
        assert_eq!(mean(&[10.0; 5]).unwrap(), 10.0);
    }

    #[test]
    fn test_mean_empty() {
        assert!(mean(&[]).is_err());
    }

    #[test]
    fn test_mean_keeps_f64_precision() {
        // 100_000_001 is not representable as f32
        assert_eq!(mean(&[100_000_001.0; 4]).unwrap(), 100_000_001.0);
        let m = mean(&[0.1, 0.2, 0.1, 0.2, 0.1]).unwrap();
        assert!((m - 0.14).abs() < 1e-12);
    }

    #[test]
    fn test_welch_ttest_significant_difference() {
        let tested = vec![25.0, 27.0, 26.0, 28.0, 25.0];
        let control = vec![10.0, 12.0, 11.0, 13.0, 10.0];

        let result = welch_ttest(&tested, &control).unwrap();

        assert!(
            result.pvalue < 0.05,
            "p-value {} should be < 0.05",
            result.pvalue
        );
        assert!(result.statistic > 0.0);
    }

    #[test]
    fn test_welch_ttest_no_difference() {
        let tested = vec![11.0, 13.0, 10.0, 12.0, 11.0];
        let control = vec![10.0, 12.0, 11.0, 13.0, 10.0];

        let result = welch_ttest(&tested, &control).unwrap();

        assert!(
            result.pvalue >= 0.05,
            "p-value {} should be >= 0.05",
            result.pvalue
        );
    }

    #[test]
    fn test_welch_ttest_insufficient_samples() {
        assert!(welch_ttest(&[10.0], &[12.0, 13.0]).is_err());
        assert!(welch_ttest(&[10.0, 11.0], &[]).is_err());
    }

    #[test]
    fn test_welch_ttest_constant_samples_with_different_means() {
        let result = welch_ttest(&[1.0; 20], &[0.0; 20]).unwrap();
        assert_eq!(result.pvalue, 0.0);
        assert_eq!(result.statistic, f64::INFINITY);
        assert_eq!(result.df, 38.0);

        let result = welch_ttest(&[0.0; 3], &[5.0; 4]).unwrap();
        assert_eq!(result.pvalue, 0.0);
        assert_eq!(result.statistic, f64::NEG_INFINITY);
        assert_eq!(result.df, 5.0);
    }

    #[test]
    fn test_welch_ttest_constant_decimal_samples() {
        // Repeated sums of 0.1 must not leave a spurious nonzero variance
        let result = welch_ttest(&[0.1; 7], &[0.3; 5]).unwrap();
        assert_eq!(result.pvalue, 0.0);
        assert!(result.statistic < 0.0);
    }

    #[test]
    fn test_welch_ttest_identical_constant_samples_is_undefined() {
        assert!(welch_ttest(&[4.0; 5], &[4.0; 5]).is_err());
    }

    #[test]
    fn test_welch_ttest_large_offset() {
        // Both samples collapse together in f32 without centering
        let tested: Vec<f64> = (0..30).map(|i| 100_000_003.0 + (i % 3) as f64).collect();
        let control: Vec<f64> = (0..30).map(|i| 100_000_000.0 + (i % 3) as f64).collect();

        let result = welch_ttest(&tested, &control).unwrap();
        assert!(result.pvalue < 0.001, "p-value {}", result.pvalue);
        assert!(result.statistic > 0.0);
    }

    #[test]
    fn test_filter_outliers_drops_spike() {
        let sample = vec![10.0, 11.0, 10.0, 12.0, 11.0, 10.0, 500.0];
        let filtered = filter_outliers(&sample).unwrap();

        assert!(!filtered.contains(&500.0));
        assert_eq!(filtered, vec![10.0, 11.0, 10.0, 12.0, 11.0, 10.0]);
        // Input is never mutated
        assert_eq!(sample.len(), 7);
    }

    #[test]
    fn test_filter_outliers_keeps_stable_sample() {
        let sample = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(filter_outliers(&sample).unwrap(), sample);
    }

    #[test]
    fn test_non_finite_values_rejected() {
        assert!(welch_ttest(&[1.0, f64::NAN], &[1.0, 2.0]).is_err());
        assert!(welch_ttest(&[1.0, 2.0], &[f64::INFINITY, 2.0]).is_err());
        assert!(filter_outliers(&[1.0, f64::NAN, 3.0]).is_err());
    }

    #[test]
    fn test_filter_outliers_empty() {
        assert!(filter_outliers(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_binomial_cdf_fair_coin() {
        // P(X <= 1) for 2 fair flips = 3/4
        let cdf = binomial_cdf(0.5, 2, 1).unwrap();
        assert!((cdf - 0.75).abs() < 1e-9);

        // All successes covers the whole distribution
        let cdf = binomial_cdf(0.3, 6, 6).unwrap();
        assert!((cdf - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_binomial_cdf_invalid_probability() {
        assert!(binomial_cdf(1.5, 4, 2).is_err());
    }
}
