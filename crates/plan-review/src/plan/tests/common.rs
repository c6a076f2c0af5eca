use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::plan::catalog::{CatalogError, TemplateCatalog};
use crate::plan::scoring::ScoringWeights;
use crate::plan::service::PlanReviewService;
use crate::plan::submission::Submission;
use crate::plan::template::{
    Field, FieldKind, NumericRules, Section, Template, TemplateDescriptor, TemplateId, TextRules,
};

pub(super) const PITCH_TEXT: &str = "Our business serves local customers with fresh bread \
    every morning and grows revenue through a loyal neighbourhood subscription base.";

pub(super) fn pitch_template() -> Template {
    Template::new(
        TemplateId("pitch".to_string()),
        "Pitch",
        vec![Section::new(
            "plan",
            "Plan",
            vec![
                Field::new("text", FieldKind::textarea(TextRules::min_length(50))).required(),
                Field::new("num", FieldKind::number(NumericRules::at_least(0.0))).required(),
            ],
        )],
    )
    .expect("template is well formed")
}

pub(super) fn strong_submission() -> Submission {
    Submission::new()
        .with("text", PITCH_TEXT)
        .with("num", 15_000_i64)
}

#[derive(Default)]
pub(super) struct MemoryCatalog {
    templates: Mutex<BTreeMap<TemplateId, Template>>,
}

impl MemoryCatalog {
    pub(super) fn with(templates: Vec<Template>) -> Self {
        let catalog = Self::default();
        {
            let mut guard = catalog.templates.lock().expect("catalog mutex poisoned");
            for template in templates {
                guard.insert(template.id().clone(), template);
            }
        }
        catalog
    }
}

impl TemplateCatalog for MemoryCatalog {
    fn fetch(&self, id: &TemplateId) -> Result<Option<Template>, CatalogError> {
        let guard = self.templates.lock().expect("catalog mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<TemplateDescriptor>, CatalogError> {
        let guard = self.templates.lock().expect("catalog mutex poisoned");
        Ok(guard.values().map(Template::descriptor).collect())
    }
}

pub(super) struct UnavailableCatalog;

impl TemplateCatalog for UnavailableCatalog {
    fn fetch(&self, _id: &TemplateId) -> Result<Option<Template>, CatalogError> {
        Err(CatalogError::Unavailable("catalog offline".to_string()))
    }

    fn list(&self) -> Result<Vec<TemplateDescriptor>, CatalogError> {
        Err(CatalogError::Unavailable("catalog offline".to_string()))
    }
}

pub(super) fn build_service() -> PlanReviewService<MemoryCatalog> {
    PlanReviewService::new(
        Arc::new(MemoryCatalog::with(vec![pitch_template()])),
        ScoringWeights::default(),
    )
}

pub(super) fn offline_service() -> PlanReviewService<UnavailableCatalog> {
    PlanReviewService::new(Arc::new(UnavailableCatalog), ScoringWeights::default())
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
