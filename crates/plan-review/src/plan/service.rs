use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::catalog::{CatalogError, TemplateCatalog};
use super::scoring::{
    summarize, PlanSummary, PlanValidator, ScoringWeights, SubmissionError, ValidationResult,
};
use super::submission::Submission;
use super::template::{Template, TemplateDescriptor, TemplateId};

/// Reviewed plan as returned to the form layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanReview {
    pub template_id: TemplateId,
    pub result: ValidationResult,
    pub summary: PlanSummary,
}

/// Service composing the template catalog and the validator.
pub struct PlanReviewService<C> {
    catalog: Arc<C>,
    validator: Arc<PlanValidator>,
}

impl<C> PlanReviewService<C>
where
    C: TemplateCatalog + 'static,
{
    pub fn new(catalog: Arc<C>, weights: ScoringWeights) -> Self {
        Self {
            catalog,
            validator: Arc::new(PlanValidator::new(weights)),
        }
    }

    pub fn validator(&self) -> &PlanValidator {
        &self.validator
    }

    pub fn templates(&self) -> Result<Vec<TemplateDescriptor>, ReviewServiceError> {
        Ok(self.catalog.list()?)
    }

    pub fn template(&self, template_id: &TemplateId) -> Result<Template, ReviewServiceError> {
        self.catalog
            .fetch(template_id)?
            .ok_or_else(|| ReviewServiceError::TemplateNotFound(template_id.clone()))
    }

    /// Review a submission against a catalog template.
    pub fn review(
        &self,
        template_id: &TemplateId,
        submission: &Submission,
    ) -> Result<PlanReview, ReviewServiceError> {
        let template = self.template(template_id)?;
        Ok(self.review_with(&template, submission)?)
    }

    /// Review a submission against a caller-supplied template.
    pub fn review_with(
        &self,
        template: &Template,
        submission: &Submission,
    ) -> Result<PlanReview, SubmissionError> {
        debug!(
            template_id = %template.id(),
            answered = submission.len(),
            "reviewing plan submission"
        );

        let result = self.validator.validate(template, submission).map_err(|err| {
            warn!(template_id = %template.id(), error = %err, "submission rejected");
            err
        })?;
        let summary = summarize(&result);

        info!(
            template_id = %template.id(),
            score = result.score,
            max_score = result.max_score,
            percentage = result.percentage,
            errors = result.errors.len(),
            status = summary.status.label(),
            "plan reviewed"
        );

        Ok(PlanReview {
            template_id: template.id().clone(),
            result,
            summary,
        })
    }
}

/// Error raised by the review service.
#[derive(Debug, thiserror::Error)]
pub enum ReviewServiceError {
    #[error("template '{0}' not found")]
    TemplateNotFound(TemplateId),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}
