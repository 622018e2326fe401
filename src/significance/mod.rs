// Significance tests over a tested and a control sample
//
// Each test answers one question about the two samples and either returns a
// Finding (the difference is statistically significant) or declines with
// Ok(None). Declining is the normal outcome, not an error.
//
// Tests:
// - MeanDifferenceTest: Welch's t-test on the arithmetic means
// - NtileRepresentationTest: binomial test on how often tested values land in
//   a tail of the pooled, sorted samples
//
// Configuration errors are caught when a test is constructed, so a test value
// that exists is always runnable.

mod mean_difference;
mod ntile;

pub use mean_difference::MeanDifferenceTest;
pub use ntile::NtileRepresentationTest;

use crate::error::Result;
use crate::finding::{Finding, TestKind};
use crate::options::TestOptions;

/// A statistical test comparing a tested sample against a control sample
pub trait SignificanceTest {
    /// Run the test
    ///
    /// Returns `Ok(Some(finding))` only when the p-value is strictly below
    /// `options.alpha`. Inputs are never mutated.
    fn test(
        &self,
        tested: &[f64],
        control: &[f64],
        options: &TestOptions,
    ) -> Result<Option<Finding>>;

    /// Handle describing this test, stored in every finding it produces
    fn kind(&self) -> TestKind;

    /// Human-readable explanation of what a finding from this test means
    fn explanation(&self) -> String {
        self.kind().explanation()
    }
}
