//! JSON output format for difference assessments

use crate::error::Result;
use crate::finding::TestKind;
use crate::orchestrator::{DifferenceAssessment, DifferenceVerdict};
use anyhow::Context;
use serde::{Deserialize, Serialize};

/// A single finding
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonFinding {
    /// Test identifier (e.g., "mean_difference", "ntile_representation")
    pub test: String,
    /// Signed tail fraction, only present for ntile tests
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ntile: Option<f64>,
    /// Mean difference or representation ratio
    pub magnitude: f64,
    pub p_value: f64,
    pub explanation: String,
}

/// Complete assessment output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonAssessment {
    pub version: String,
    /// "no_difference", "difference" or "insufficient_data"
    pub verdict: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub alpha: f64,
    pub tested_size: usize,
    pub control_size: usize,
    pub findings: Vec<JsonFinding>,
}

impl From<&DifferenceAssessment> for JsonAssessment {
    fn from(assessment: &DifferenceAssessment) -> Self {
        let (verdict, reason) = match &assessment.verdict {
            DifferenceVerdict::NoDifference => ("no_difference", None),
            DifferenceVerdict::Difference { .. } => ("difference", None),
            DifferenceVerdict::InsufficientData { reason } => {
                ("insufficient_data", Some(reason.clone()))
            }
        };

        let findings = assessment
            .findings
            .iter()
            .map(|finding| {
                let source = finding.source();
                JsonFinding {
                    test: source.name().to_string(),
                    ntile: match source {
                        TestKind::NtileRepresentation { ntile } => Some(ntile),
                        TestKind::MeanDifference { .. } => None,
                    },
                    magnitude: finding.magnitude(),
                    p_value: finding.p_value(),
                    explanation: finding.explanation(),
                }
            })
            .collect();

        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            verdict: verdict.to_string(),
            reason,
            alpha: assessment.options.alpha,
            tested_size: assessment.tested_size,
            control_size: assessment.control_size,
            findings,
        }
    }
}

impl DifferenceAssessment {
    /// Serialize the assessment as pretty-printed JSON
    pub fn to_json(&self) -> Result<String> {
        let json = JsonAssessment::from(self);
        let text =
            serde_json::to_string_pretty(&json).context("Failed to serialize assessment")?;
        Ok(text)
    }
}
