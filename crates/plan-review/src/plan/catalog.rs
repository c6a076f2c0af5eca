use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use super::template::{Template, TemplateDescriptor, TemplateId};

/// Source of templates; the catalog editor owns the real implementation.
pub trait TemplateCatalog: Send + Sync {
    fn fetch(&self, id: &TemplateId) -> Result<Option<Template>, CatalogError>;
    fn list(&self) -> Result<Vec<TemplateDescriptor>, CatalogError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("unable to read template source {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("template file {} is invalid: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("template '{0}' is defined more than once")]
    DuplicateTemplate(TemplateId),
    #[error("template catalog unavailable: {0}")]
    Unavailable(String),
}

/// Load every `*.json` template in `dir`, in file name order.
pub fn load_templates_from_dir(dir: impl AsRef<Path>) -> Result<Vec<Template>, CatalogError> {
    let dir = dir.as_ref();
    let io_error = |source| CatalogError::Io {
        path: dir.to_path_buf(),
        source,
    };

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(io_error)? {
        let path = entry.map_err(io_error)?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut seen = BTreeSet::new();
    let mut templates = Vec::with_capacity(paths.len());
    for path in paths {
        let template = load_template(&path)?;
        if !seen.insert(template.id().clone()) {
            return Err(CatalogError::DuplicateTemplate(template.id().clone()));
        }
        templates.push(template);
    }

    Ok(templates)
}

pub fn load_template(path: &Path) -> Result<Template, CatalogError> {
    let raw = fs::read(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&raw).map_err(|source| CatalogError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
