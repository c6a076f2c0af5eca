use serde::{Deserialize, Serialize};

use super::super::findings::Severity;
use super::ValidationResult;

/// Readiness tier shown to the plan author.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ReadinessTier {
    /// First matching tier wins.
    pub fn classify(percentage: f64, error_count: usize) -> Self {
        if percentage >= 90.0 && error_count == 0 {
            ReadinessTier::Excellent
        } else if percentage >= 75.0 && error_count <= 2 {
            ReadinessTier::Good
        } else if percentage >= 50.0 && error_count <= 5 {
            ReadinessTier::Fair
        } else {
            ReadinessTier::Poor
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            ReadinessTier::Excellent => "excellent",
            ReadinessTier::Good => "good",
            ReadinessTier::Fair => "fair",
            ReadinessTier::Poor => "poor",
        }
    }

    fn message(self) -> &'static str {
        match self {
            ReadinessTier::Excellent => {
                "Excellent work: your business plan is complete and ready to share."
            }
            ReadinessTier::Good => {
                "Good progress: the plan is solid and needs only minor improvements."
            }
            ReadinessTier::Fair => "The plan is taking shape but several sections need more work.",
            ReadinessTier::Poor => {
                "The plan is still incomplete; focus on the required information first."
            }
        }
    }

    fn steps(self) -> &'static [&'static str] {
        match self {
            ReadinessTier::Excellent => &[
                "Export the plan and share it with mentors or investors",
                "Prepare a short pitch based on the executive summary",
            ],
            ReadinessTier::Good => &[
                "Strengthen the sections with the lowest completeness",
                "Add concrete figures to the financial projections",
            ],
            ReadinessTier::Fair => &[
                "Complete the remaining required fields",
                "Expand short answers with specific details",
                "Review the market and financial sections",
            ],
            ReadinessTier::Poor => &[
                "Start with the required fields in each section",
                "Describe the problem, the solution, and the target market",
                "Save your progress and come back to refine the plan",
            ],
        }
    }
}

/// Presentation summary derived from a validation result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanSummary {
    pub status: ReadinessTier,
    pub message: String,
    pub next_steps: Vec<String>,
}

pub fn summarize(result: &ValidationResult) -> PlanSummary {
    let error_count = result
        .errors
        .iter()
        .filter(|finding| finding.severity == Severity::Error)
        .count();
    let warning_count = result.warnings.len();
    let suggestion_count = result.suggestions.len();
    let status = ReadinessTier::classify(result.percentage, error_count);

    let mut next_steps = Vec::new();
    if error_count > 0 {
        next_steps.push(format!(
            "Fix {error_count} critical {}",
            plural(error_count, "error", "errors")
        ));
    }
    next_steps.extend(status.steps().iter().map(|step| step.to_string()));
    if warning_count > 0 {
        next_steps.push(format!(
            "Review {warning_count} {}",
            plural(warning_count, "warning", "warnings")
        ));
    }
    if suggestion_count > 0 {
        next_steps.push(format!(
            "Consider {suggestion_count} improvement {}",
            plural(suggestion_count, "suggestion", "suggestions")
        ));
    }

    PlanSummary {
        status,
        message: status.message().to_string(),
        next_steps,
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}
