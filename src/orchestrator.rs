// Runs the fixed battery of significance tests over one pair of samples
//
// Policy:
// 1. Mean difference test (default configuration)
// 2. Ntile representation tests over NTILE_CANDIDATES, in order, stopping at
//    the first ntile that yields a finding
//
// The result holds the broadest mean-shift signal plus at most one tail
// signal, so it never contains more than two findings.

use crate::error::Result;
use crate::finding::{Finding, TestKind};
use crate::options::TestOptions;
use crate::significance::{MeanDifferenceTest, NtileRepresentationTest, SignificanceTest};

/// Ntiles tried by the orchestrator, in evaluation order
///
/// Upper tails from broadest to narrowest, then lower tails the same way.
pub const NTILE_CANDIDATES: [f64; 8] = [0.5, 0.25, 0.10, 0.05, -0.5, -0.25, -0.10, -0.05];

/// Smallest sample size the assessment runs the battery on
///
/// The mean test needs two values per sample to estimate a variance.
pub const MIN_SAMPLE_SIZE: usize = 2;

/// Find all statistically significant differences between two samples
///
/// Findings are returned in evaluation order: the mean difference finding (if
/// any) first, then at most one ntile finding.
///
/// # Example
/// ```
/// use sigdiff::{find_statistically_significant_difference, TestOptions};
///
/// let tested = [10.0, 10.0, 10.0, 10.0, 10.0];
/// let control = [1.0, 2.0, 3.0, 4.0, 5.0];
///
/// let findings =
///     find_statistically_significant_difference(&tested, &control, &TestOptions::default())
///         .unwrap();
/// assert_eq!(findings.len(), 2);
/// assert_eq!(findings[0].magnitude(), 7.0);
/// assert!(findings[1].magnitude() > 1.0);
/// ```
pub fn find_statistically_significant_difference(
    tested: &[f64],
    control: &[f64],
    options: &TestOptions,
) -> Result<Vec<Finding>> {
    options.validate()?;

    let mut findings = Vec::new();

    if let Some(finding) = MeanDifferenceTest::new().test(tested, control, options)? {
        findings.push(finding);
    }

    for &ntile in NTILE_CANDIDATES.iter() {
        let test = NtileRepresentationTest::new(ntile)?;
        if let Some(finding) = test.test(tested, control, options)? {
            findings.push(finding);
            break;
        }
    }

    tracing::debug!(
        "Significance battery finished: tested={}, control={}, findings={}",
        tested.len(),
        control.len(),
        findings.len()
    );

    Ok(findings)
}

/// Overall verdict for a tested/control comparison
#[derive(Debug, Clone, PartialEq)]
pub enum DifferenceVerdict {
    /// No statistically significant difference detected
    NoDifference,

    /// At least one test found a statistically significant difference
    Difference {
        /// Tests that produced findings, in evaluation order
        sources: Vec<TestKind>,
    },

    /// A sample is too small for the battery to run
    InsufficientData { reason: String },
}

/// Detailed assessment of a tested/control comparison
#[derive(Debug, Clone)]
pub struct DifferenceAssessment {
    /// Final verdict
    pub verdict: DifferenceVerdict,

    /// Findings in evaluation order
    pub findings: Vec<Finding>,

    pub tested_size: usize,
    pub control_size: usize,

    /// Options used for assessment
    pub options: TestOptions,
}

impl DifferenceAssessment {
    /// Generate human-readable report
    pub fn to_report_string(&self) -> String {
        let mut report = String::new();

        match &self.verdict {
            DifferenceVerdict::NoDifference => {
                report.push_str("✅ NO SIGNIFICANT DIFFERENCE DETECTED\n\n");
            }
            DifferenceVerdict::Difference { sources } => {
                report.push_str(&format!(
                    "❌ SIGNIFICANT DIFFERENCE DETECTED ({} findings)\n\n",
                    sources.len()
                ));
            }
            DifferenceVerdict::InsufficientData { reason } => {
                report.push_str("⚠️  INSUFFICIENT DATA\n\n");
                report.push_str(&format!("Reason: {}\n", reason));
            }
        }

        report.push_str(&format!(
            "Sample sizes: tested={}, control={}\n",
            self.tested_size, self.control_size
        ));
        report.push_str(&format!(
            "Significance level: {} ({}% confidence)\n",
            self.options.alpha,
            self.options.confidence_percent()
        ));

        if !self.findings.is_empty() {
            report.push_str("\n📊 Findings:\n");
            for finding in &self.findings {
                report.push_str(&format!(
                    "  {} (magnitude={:.4}, p={:.4})\n    {}\n",
                    finding.source().name(),
                    finding.magnitude(),
                    finding.p_value(),
                    finding.explanation()
                ));
            }
        }

        report
    }
}

/// Assess two samples and wrap the findings in a verdict
///
/// Samples with fewer than [`MIN_SAMPLE_SIZE`] values yield an
/// `InsufficientData` verdict without running the battery.
///
/// # Example
/// ```
/// use sigdiff::{assess_difference, DifferenceVerdict, TestOptions};
///
/// let assessment =
///     assess_difference(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0], &TestOptions::default()).unwrap();
/// assert_eq!(assessment.verdict, DifferenceVerdict::NoDifference);
/// ```
pub fn assess_difference(
    tested: &[f64],
    control: &[f64],
    options: &TestOptions,
) -> Result<DifferenceAssessment> {
    options.validate()?;

    if tested.len() < MIN_SAMPLE_SIZE || control.len() < MIN_SAMPLE_SIZE {
        tracing::debug!(
            "Assessment skipped: tested={}, control={}",
            tested.len(),
            control.len()
        );
        return Ok(DifferenceAssessment {
            verdict: DifferenceVerdict::InsufficientData {
                reason: format!(
                    "Both samples need at least {} values (tested={}, control={})",
                    MIN_SAMPLE_SIZE,
                    tested.len(),
                    control.len()
                ),
            },
            findings: Vec::new(),
            tested_size: tested.len(),
            control_size: control.len(),
            options: *options,
        });
    }

    let findings = find_statistically_significant_difference(tested, control, options)?;

    let verdict = if findings.is_empty() {
        DifferenceVerdict::NoDifference
    } else {
        DifferenceVerdict::Difference {
            sources: findings.iter().map(Finding::source).collect(),
        }
    };

    Ok(DifferenceAssessment {
        verdict,
        findings,
        tested_size: tested.len(),
        control_size: control.len(),
        options: *options,
    })
}
