// Ntile representation test (disproportionate tail representation)
//
// Pools both samples, sorts them, and looks at one tail of the combined
// distribution. If tested values show up in that tail noticeably more (or
// less) often than their share of the pool predicts, a two-tailed binomial
// test decides whether the imbalance is significant.
//
// Sign convention for ntile:
// - positive: upper tail (largest values)
// - negative: lower tail (smallest values)
// - magnitude: tail fraction, e.g. 0.05 = top/bottom 5%

use crate::error::{Result, SignificanceError};
use crate::finding::{Finding, TestKind};
use crate::options::TestOptions;
use crate::significance::SignificanceTest;
use crate::statistics::binomial_cdf;

/// Significance test on how often tested values land in a tail of the pool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NtileRepresentationTest {
    ntile: f64,
}

/// A pooled value, labelled with the sample it came from
#[derive(Debug, Clone, Copy)]
struct Labelled {
    value: f64,
    is_tested: bool,
}

impl NtileRepresentationTest {
    /// Create a test for the given signed tail fraction
    ///
    /// # Errors
    /// `InvalidArgument` if `ntile` is zero, not finite, or `|ntile| > 1`.
    ///
    /// # Example
    /// ```
    /// use sigdiff::NtileRepresentationTest;
    ///
    /// assert!(NtileRepresentationTest::new(0.5).is_ok());
    /// assert!(NtileRepresentationTest::new(-0.05).is_ok());
    /// assert!(NtileRepresentationTest::new(0.0).is_err());
    /// assert!(NtileRepresentationTest::new(1.5).is_err());
    /// ```
    pub fn new(ntile: f64) -> Result<Self> {
        if !ntile.is_finite() {
            return Err(SignificanceError::InvalidArgument(format!(
                "ntile must be finite, got {}",
                ntile
            )));
        }

        if ntile == 0.0 {
            return Err(SignificanceError::InvalidArgument(
                "ntile must not be 0".to_string(),
            ));
        }

        if ntile.abs() > 1.0 {
            return Err(SignificanceError::InvalidArgument(format!(
                "ntile magnitude must not exceed 1, got {}",
                ntile
            )));
        }

        Ok(Self { ntile })
    }

    pub fn ntile(&self) -> f64 {
        self.ntile
    }

    /// True when the test looks at the largest values of the pool
    pub fn is_upper_tail(&self) -> bool {
        self.ntile > 0.0
    }

    /// Merge both samples, sort ascending (stable), and put the tail of
    /// interest first
    fn pooled_tail_first(&self, tested: &[f64], control: &[f64]) -> Vec<Labelled> {
        let mut pool: Vec<Labelled> = tested
            .iter()
            .map(|&value| Labelled {
                value,
                is_tested: true,
            })
            .chain(control.iter().map(|&value| Labelled {
                value,
                is_tested: false,
            }))
            .collect();

        // Stable sort; total_cmp keeps NaN from breaking the ordering
        pool.sort_by(|a, b| a.value.total_cmp(&b.value));

        if self.is_upper_tail() {
            pool.reverse();
        }

        pool
    }
}

impl SignificanceTest for NtileRepresentationTest {
    fn test(
        &self,
        tested: &[f64],
        control: &[f64],
        options: &TestOptions,
    ) -> Result<Option<Finding>> {
        options.validate()?;

        if tested.is_empty() || control.is_empty() {
            return Ok(None);
        }

        let pool = self.pooled_tail_first(tested, control);

        // Share of tested values anywhere in the pool
        let p0 = tested.len() as f64 / pool.len() as f64;

        let n = (pool.len() as f64 * self.ntile.abs()).ceil() as usize;
        if n == 0 {
            return Ok(None);
        }

        // The tail slice holds one element more than the nominal ntile count,
        // clamped to the pool size
        let slice = &pool[..(n + 1).min(pool.len())];
        let num_observed = slice.iter().filter(|item| item.is_tested).count();
        let num_expected = (p0 * slice.len() as f64).floor();
        if num_expected == 0.0 {
            tracing::trace!(
                "Ntile {} declined: expected count is zero (slice={})",
                self.ntile,
                slice.len()
            );
            return Ok(None);
        }

        let proportion = num_observed as f64 / num_expected;
        if proportion == 1.0 {
            return Ok(None);
        }

        // Two-tailed binomial test: slice membership as Bernoulli(p0) trials
        let mut cdf = binomial_cdf(p0, slice.len() as u64, num_observed as u64)?;
        if cdf > 0.5 {
            cdf = 1.0 - cdf;
        }
        let p_value = 2.0 * cdf;

        if p_value >= options.alpha {
            tracing::trace!(
                "Ntile {} declined: observed={}, expected={}, p={} >= alpha={}",
                self.ntile,
                num_observed,
                num_expected,
                p_value,
                options.alpha
            );
            return Ok(None);
        }

        tracing::debug!(
            "Ntile representation detected: ntile={}, observed={}, expected={}, p={}",
            self.ntile,
            num_observed,
            num_expected,
            p_value
        );
        Ok(Some(Finding::new(proportion, p_value, self.kind())))
    }

    fn kind(&self) -> TestKind {
        TestKind::NtileRepresentation { ntile: self.ntile }
    }
}
