mod aggregate;
mod readiness;
mod rules;
mod weights;

#[cfg(test)]
mod tests;

pub use readiness::{summarize, PlanSummary, ReadinessTier};
pub use weights::{
    DomainBonus, FillTier, LengthTier, MagnitudeTier, MultiselectWeights, NumericWeights,
    ScoringWeights, SelectionTier, TableWeights, TextWeights, TopicKeywords, WeightsError,
};

use serde::{Deserialize, Serialize};

use super::findings::{Finding, Suggestion};
use super::submission::{FieldValue, Submission};
use super::template::{Field, Section, SectionId, Template, TemplateId};

/// Stateless validator that applies the scoring weights to a submission.
#[derive(Debug, Clone, Default)]
pub struct PlanValidator {
    weights: ScoringWeights,
}

impl PlanValidator {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn validate_field(&self, field: &Field, value: Option<&FieldValue>) -> FieldOutcome {
        rules::validate_field(field, value, &self.weights)
    }

    pub fn score_section(&self, section: &Section, submission: &Submission) -> SectionOutcome {
        aggregate::score_section(section, submission, &self.weights)
    }

    /// Score every section of `template`. Fails only when the submission
    /// carries a key the template does not declare.
    pub fn validate(
        &self,
        template: &Template,
        submission: &Submission,
    ) -> Result<ValidationResult, SubmissionError> {
        aggregate::validate_plan(template, submission, &self.weights)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("submission references field '{field_id}' which template '{template_id}' does not declare")]
    UnknownField {
        template_id: TemplateId,
        field_id: String,
    },
}

/// Validation and scoring result for a single field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldOutcome {
    pub is_valid: bool,
    pub score: u32,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub suggestions: Vec<Suggestion>,
    /// Whether a non-empty value was accepted; drives section completeness.
    #[serde(skip)]
    pub answered: bool,
}

impl FieldOutcome {
    pub(crate) fn unanswered() -> Self {
        Self {
            is_valid: true,
            score: 0,
            errors: Vec::new(),
            warnings: Vec::new(),
            suggestions: Vec::new(),
            answered: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionScore {
    pub section_id: SectionId,
    pub score: u32,
    pub max_score: u32,
    /// Quality: achieved score over attainable score.
    pub percentage: f64,
    /// Presence: share of fields with an accepted answer.
    pub completeness: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionOutcome {
    #[serde(flatten)]
    pub score: SectionScore,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub suggestions: Vec<Suggestion>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    pub score: u32,
    pub max_score: u32,
    pub percentage: f64,
    pub errors: Vec<Finding>,
    pub warnings: Vec<Finding>,
    pub suggestions: Vec<Suggestion>,
    pub section_scores: Vec<SectionScore>,
}

impl ValidationResult {
    pub fn summary(&self) -> PlanSummary {
        summarize(self)
    }
}
