// Mean difference test (Welch's two-sample t-test)
//
// Detects a statistically significant difference between the arithmetic
// means of the tested and control samples. Optionally filters outliers from
// both samples first so single spikes cannot drive the verdict.

use crate::error::Result;
use crate::finding::{Finding, TestKind};
use crate::options::TestOptions;
use crate::significance::SignificanceTest;
use crate::statistics::{filter_outliers, mean, welch_ttest};
use std::borrow::Cow;

/// Significance test on the difference of sample means
///
/// # Example
/// ```
/// use sigdiff::{MeanDifferenceTest, SignificanceTest, TestOptions};
///
/// let tested = [10.0, 10.0, 10.0, 10.0, 10.0];
/// let control = [1.0, 2.0, 3.0, 4.0, 5.0];
///
/// let finding = MeanDifferenceTest::new()
///     .test(&tested, &control, &TestOptions::default())
///     .unwrap()
///     .expect("means differ significantly");
/// assert_eq!(finding.magnitude(), 7.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeanDifferenceTest {
    filtering_outliers: bool,
}

impl MeanDifferenceTest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same test, but both samples go through Tukey outlier filtering first
    pub fn with_outlier_filtering() -> Self {
        Self {
            filtering_outliers: true,
        }
    }

    pub fn is_filtering_outliers(&self) -> bool {
        self.filtering_outliers
    }

    fn prepare<'a>(&self, sample: &'a [f64]) -> Result<Cow<'a, [f64]>> {
        if self.filtering_outliers {
            Ok(Cow::Owned(filter_outliers(sample)?))
        } else {
            Ok(Cow::Borrowed(sample))
        }
    }
}

impl SignificanceTest for MeanDifferenceTest {
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

        let tested = self.prepare(tested)?;
        let control = self.prepare(control)?;

        let diff = mean(&tested)? - mean(&control)?;
        if diff == 0.0 {
            tracing::debug!("Mean difference test declined: means are identical");
            return Ok(None);
        }

        // The means differ. Is the difference statistically significant?
        let ttest = welch_ttest(&tested, &control)?;
        let p_value = ttest.pvalue;
        if p_value >= options.alpha {
            tracing::debug!(
                "Mean difference test declined: diff={}, p={} >= alpha={}",
                diff,
                p_value,
                options.alpha
            );
            return Ok(None);
        }

        tracing::debug!(
            "Mean difference detected: diff={}, t={}, df={}, p={}",
            diff,
            ttest.statistic,
            ttest.df,
            p_value
        );
        Ok(Some(Finding::new(diff, p_value, self.kind())))
    }

    fn kind(&self) -> TestKind {
        TestKind::MeanDifference {
            filtering_outliers: self.filtering_outliers,
        }
    }
}
