//! sigdiff - Explainable statistical difference detection
//!
//! This library decides whether a "tested" sample differs from a "control"
//! sample in a way that is unlikely to be due to chance, and explains the
//! difference in human-readable terms.
//!
//! Two tests are provided:
//! - [`MeanDifferenceTest`]: Welch's two-sample t-test on the means
//! - [`NtileRepresentationTest`]: binomial test on how often tested values
//!   land in the upper or lower tail of the pooled samples
//!
//! [`find_statistically_significant_difference`] runs the full battery and
//! returns every significant [`Finding`]; [`assess_difference`] wraps the same
//! findings in a verdict with text and JSON reports.
//!
//! # Example
//!
//! ```
//! use sigdiff::{find_statistically_significant_difference, TestOptions};
//!
//! let tested = [10.0, 10.0, 10.0, 10.0, 10.0];
//! let control = [1.0, 2.0, 3.0, 4.0, 5.0];
//!
//! let findings =
//!     find_statistically_significant_difference(&tested, &control, &TestOptions::default())
//!         .unwrap();
//! for finding in &findings {
//!     println!("{}", finding);
//! }
//! ```

pub mod error;
pub mod finding;
pub mod json_output;
pub mod options;
pub mod orchestrator;
pub mod significance;
pub mod statistics;

pub use error::{Result, SignificanceError};
pub use finding::{Finding, TestKind};
pub use options::{TestOptions, DEFAULT_ALPHA};
pub use orchestrator::{
    assess_difference, find_statistically_significant_difference, DifferenceAssessment,
    DifferenceVerdict, MIN_SAMPLE_SIZE, NTILE_CANDIDATES,
};
pub use significance::{MeanDifferenceTest, NtileRepresentationTest, SignificanceTest};
