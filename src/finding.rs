//! Findings emitted by significance tests
//!
//! A [`Finding`] records one detected, statistically significant difference.
//! It carries a [`TestKind`], a small copyable handle describing the test that
//! produced it, which is only ever used to explain the finding.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity and configuration of the test that produced a finding
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "test", rename_all = "snake_case")]
pub enum TestKind {
    /// Difference between the arithmetic means of the two samples
    MeanDifference { filtering_outliers: bool },

    /// Disproportionate representation of the tested sample in a tail
    NtileRepresentation { ntile: f64 },
}

impl TestKind {
    /// Stable identifier for reports and JSON output
    pub fn name(&self) -> &'static str {
        match self {
            TestKind::MeanDifference { .. } => "mean_difference",
            TestKind::NtileRepresentation { .. } => "ntile_representation",
        }
    }

    /// Human-readable explanation of what a finding from this test means
    pub fn explanation(&self) -> String {
        match *self {
            TestKind::MeanDifference { filtering_outliers } => {
                let mut text = String::from(
                    "The tested population's average is different from the control population's \
                     average, and this difference cannot be explained by mere chance.",
                );
                if filtering_outliers {
                    text.push_str(
                        " Outliers were filtered out of both populations before comparing.",
                    );
                }
                text
            }
            TestKind::NtileRepresentation { ntile } => ntile_explanation(
                ntile,
                "over-represented",
                " (under-represented when the magnitude is below 1)",
            ),
        }
    }

    /// Value of the magnitude that means "no difference" for this test
    pub fn neutral_magnitude(&self) -> f64 {
        match self {
            TestKind::MeanDifference { .. } => 0.0,
            TestKind::NtileRepresentation { .. } => 1.0,
        }
    }
}

fn ntile_explanation(ntile: f64, representation: &str, note: &str) -> String {
    let tail = if ntile > 0.0 { "upper" } else { "lower" };
    let percent = (ntile.abs() * 100.0).ceil() as u32;
    format!(
        "The tested population is {} in the {} {}% of the combined population{}, and this \
         cannot be explained by mere chance.",
        representation, tail, percent, note
    )
}

/// A detected statistically significant difference
///
/// - `magnitude`: mean difference (tested minus control) for mean tests, or
///   the observed/expected representation ratio for ntile tests
/// - `p_value`: two-tailed p-value, always strictly below the alpha in effect
///   when the finding was created
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    magnitude: f64,
    p_value: f64,
    source: TestKind,
}

impl Finding {
    pub(crate) fn new(magnitude: f64, p_value: f64, source: TestKind) -> Self {
        debug_assert!((0.0..=1.0).contains(&p_value));
        debug_assert!(magnitude != source.neutral_magnitude());
        Self {
            magnitude,
            p_value,
            source,
        }
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    /// The test that produced this finding
    pub fn source(&self) -> TestKind {
        self.source
    }

    /// Explanation of this finding
    ///
    /// Ntile findings name the actual direction: a magnitude below 1 means the
    /// tested population is under-represented in the tail.
    pub fn explanation(&self) -> String {
        match self.source {
            TestKind::NtileRepresentation { ntile } => {
                let representation = if self.is_increase() {
                    "over-represented"
                } else {
                    "under-represented"
                };
                ntile_explanation(ntile, representation, "")
            }
            TestKind::MeanDifference { .. } => self.source.explanation(),
        }
    }

    /// Whether the tested sample sits above the control (mean test) or is
    /// over-represented in the tail (ntile test)
    pub fn is_increase(&self) -> bool {
        self.magnitude > self.source.neutral_magnitude()
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (magnitude={:.4}, p={:.4})",
            self.explanation(),
            self.magnitude,
            self.p_value
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mean_difference_explanation() {
        let plain = TestKind::MeanDifference {
            filtering_outliers: false,
        };
        assert!(plain.explanation().contains("average is different"));
        assert!(!plain.explanation().contains("Outliers"));

        let filtered = TestKind::MeanDifference {
            filtering_outliers: true,
        };
        assert!(filtered.explanation().contains("Outliers were filtered"));
    }

    #[test]
    fn test_ntile_explanation_tail_and_percent() {
        let upper = TestKind::NtileRepresentation { ntile: 0.05 };
        assert!(upper.explanation().contains("upper 5%"));

        let lower = TestKind::NtileRepresentation { ntile: -0.25 };
        assert!(lower.explanation().contains("lower 25%"));
    }

    #[test]
    fn test_finding_accessors() {
        let finding = Finding::new(
            6.0,
            0.001,
            TestKind::MeanDifference {
                filtering_outliers: false,
            },
        );
        assert_eq!(finding.magnitude(), 6.0);
        assert_eq!(finding.p_value(), 0.001);
        assert!(finding.is_increase());
        assert_eq!(finding.explanation(), finding.source().explanation());
    }

    #[test]
    fn test_finding_display() {
        let finding = Finding::new(0.5, 0.02, TestKind::NtileRepresentation { ntile: -0.1 });
        let text = finding.to_string();
        assert!(text.contains("lower 10%"));
        assert!(text.contains("magnitude=0.5000"));
        assert!(text.contains("p=0.0200"));
        assert!(!finding.is_increase());
    }

    #[test]
    fn test_finding_explanation_names_direction() {
        let source = TestKind::NtileRepresentation { ntile: 0.25 };

        let over = Finding::new(2.0, 0.01, source);
        assert!(over.explanation().contains("is over-represented in the upper 25%"));
        assert!(!over.explanation().contains("under-represented"));

        let under = Finding::new(0.2, 0.01, source);
        assert!(under.explanation().contains("is under-represented in the upper 25%"));
        assert!(!under.explanation().contains("over-represented"));

        // The test-level text covers both directions
        assert!(source.explanation().contains("over-represented"));
        assert!(source.explanation().contains("under-represented when"));
    }

    #[test]
    fn test_finding_serializes_source() {
        let finding = Finding::new(2.0, 0.01, TestKind::NtileRepresentation { ntile: 0.25 });
        let json = serde_json::to_string(&finding).unwrap();
        assert!(json.contains(r#""test":"ntile_representation""#));

        let back: Finding = serde_json::from_str(&json).unwrap();
        assert_eq!(back, finding);
    }
}
