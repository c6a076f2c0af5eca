//! Business plan validation and scoring.
//!
//! Templates describe the plan document, submissions carry the author's
//! answers, and the scoring pipeline turns the pair into findings, per-section
//! scores, and a readiness summary.

pub mod catalog;
pub mod findings;
pub mod import;
pub mod router;
pub mod scoring;
pub mod service;
pub mod standard;
pub mod submission;
pub mod template;

#[cfg(test)]
mod tests;

pub use catalog::{load_template, load_templates_from_dir, CatalogError, TemplateCatalog};
pub use findings::{Finding, Priority, Severity, Suggestion};
pub use import::{table_from_csv, ImportError};
pub use router::{plan_router, AdhocReviewRequest};
pub use scoring::{
    summarize, FieldOutcome, PlanSummary, PlanValidator, ReadinessTier, ScoringWeights,
    SectionOutcome, SectionScore, SubmissionError, ValidationResult, WeightsError,
};
pub use service::{PlanReview, PlanReviewService, ReviewServiceError};
pub use standard::{standard_business_plan, STANDARD_TEMPLATE_ID};
pub use submission::{CellValue, FieldValue, Submission, TableValue};
pub use template::{
    Field, FieldId, FieldKind, FieldPattern, NumericRules, Section, SectionId, Template,
    TemplateDescriptor, TemplateError, TemplateId, TextRules,
};
