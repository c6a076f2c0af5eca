use metrics_exporter_prometheus::PrometheusHandle;
use plan_review::error::AppError;
use plan_review::plan::{
    load_templates_from_dir, standard_business_plan, CatalogError, ScoringWeights, Template,
    TemplateCatalog, TemplateDescriptor, TemplateId, WeightsError,
};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, RwLock};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Template catalog held in memory for the lifetime of the process.
#[derive(Default, Clone)]
pub(crate) struct InMemoryTemplateCatalog {
    templates: Arc<RwLock<BTreeMap<TemplateId, Template>>>,
}

impl InMemoryTemplateCatalog {
    /// Standard template plus every template found in `template_dir`.
    pub(crate) fn seeded(template_dir: Option<&Path>) -> Result<Self, AppError> {
        let catalog = Self::default();
        catalog.insert(standard_business_plan()?)?;

        if let Some(dir) = template_dir {
            let templates = load_templates_from_dir(dir)?;
            info!(dir = %dir.display(), count = templates.len(), "loaded plan templates");
            for template in templates {
                catalog.insert(template)?;
            }
        }

        Ok(catalog)
    }

    pub(crate) fn insert(&self, template: Template) -> Result<(), CatalogError> {
        let mut guard = self.templates.write().map_err(|_| poisoned())?;
        if guard.contains_key(template.id()) {
            return Err(CatalogError::DuplicateTemplate(template.id().clone()));
        }
        guard.insert(template.id().clone(), template);
        Ok(())
    }
}

impl TemplateCatalog for InMemoryTemplateCatalog {
    fn fetch(&self, id: &TemplateId) -> Result<Option<Template>, CatalogError> {
        let guard = self.templates.read().map_err(|_| poisoned())?;
        Ok(guard.get(id).cloned())
    }

    fn list(&self) -> Result<Vec<TemplateDescriptor>, CatalogError> {
        let guard = self.templates.read().map_err(|_| poisoned())?;
        Ok(guard.values().map(Template::descriptor).collect())
    }
}

fn poisoned() -> CatalogError {
    CatalogError::Unavailable("template catalog lock poisoned".to_string())
}

/// Built-in weights unless a weights file is configured.
pub(crate) fn load_weights(path: Option<&Path>) -> Result<ScoringWeights, WeightsError> {
    match path {
        Some(path) => {
            let weights = ScoringWeights::from_path(path)?;
            info!(path = %path.display(), "loaded scoring weights");
            Ok(weights)
        }
        None => Ok(ScoringWeights::default()),
    }
}

/// Parses `FIELD_ID=PATH` table arguments.
pub(crate) fn parse_table_arg(raw: &str) -> Result<(String, PathBuf), String> {
    match raw.split_once('=') {
        Some((field_id, path)) if !field_id.trim().is_empty() && !path.trim().is_empty() => {
            Ok((field_id.trim().to_string(), PathBuf::from(path.trim())))
        }
        _ => Err(format!("expected FIELD_ID=PATH, got '{raw}'")),
    }
}
