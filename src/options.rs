// Options shared by every significance test
//
// A single threshold (alpha) decides whether a p-value counts as significant.
// The same value is used for the whole of one test invocation.

use crate::error::{Result, SignificanceError};
use serde::{Deserialize, Serialize};

/// Default significance level (95% confidence)
pub const DEFAULT_ALPHA: f64 = 0.05;

/// Options for running significance tests
///
/// # Example
/// ```
/// use sigdiff::TestOptions;
///
/// let options = TestOptions::default();
/// assert_eq!(options.alpha, 0.05); // 95% confidence
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "fuzz", derive(arbitrary::Arbitrary))]
#[serde(default)]
pub struct TestOptions {
    /// Significance level for hypothesis testing
    ///
    /// A finding is only reported when its p-value is strictly below alpha.
    /// - 0.05 (default): 95% confidence level
    /// - 0.01: 99% confidence level, fewer false positives
    /// - 0.10: 90% confidence level, fewer false negatives
    pub alpha: f64,
}

impl Default for TestOptions {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
        }
    }
}

impl TestOptions {
    /// Create options with an explicit significance level
    pub fn with_alpha(alpha: f64) -> Result<Self> {
        let options = Self { alpha };
        options.validate()?;
        Ok(options)
    }

    /// Create a strict configuration (fewer false positives, more false negatives)
    pub fn strict() -> Self {
        Self { alpha: 0.01 }
    }

    /// Create a permissive configuration (more false positives, fewer false negatives)
    pub fn permissive() -> Self {
        Self { alpha: 0.10 }
    }

    /// Confidence level in percent implied by alpha
    pub fn confidence_percent(&self) -> f64 {
        (1.0 - self.alpha) * 100.0
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 || self.alpha > 1.0 {
            return Err(SignificanceError::InvalidArgument(format!(
                "alpha must be in (0, 1], got {}",
                self.alpha
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = TestOptions::default();
        assert_eq!(options.alpha, 0.05);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        assert_eq!(TestOptions::strict().alpha, 0.01);
        assert_eq!(TestOptions::permissive().alpha, 0.10);
        assert!(TestOptions::strict().validate().is_ok());
        assert!(TestOptions::permissive().validate().is_ok());
    }

    #[test]
    fn test_with_alpha_rejects_out_of_range() {
        assert!(matches!(
            TestOptions::with_alpha(0.0),
            Err(SignificanceError::InvalidArgument(_))
        ));
        assert!(TestOptions::with_alpha(1.5).is_err());
        assert!(TestOptions::with_alpha(-0.05).is_err());
        assert!(TestOptions::with_alpha(f64::NAN).is_err());
        assert!(TestOptions::with_alpha(1.0).is_ok());
    }

    #[test]
    fn test_confidence_percent() {
        let options = TestOptions::default();
        assert!((options.confidence_percent() - 95.0).abs() < 1e-9);
    }

    #[test]
    fn test_deserialize_missing_alpha_uses_default() {
        let options: TestOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(options, TestOptions::default());

        let options: TestOptions = serde_json::from_str(r#"{"alpha": 0.01}"#).unwrap();
        assert_eq!(options.alpha, 0.01);
    }
}
