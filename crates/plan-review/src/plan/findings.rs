use serde::{Deserialize, Serialize};

use super::template::{FieldId, SectionId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// Error or warning raised while validating a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Finding {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_id: Option<FieldId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<SectionId>,
    pub message: String,
    pub severity: Severity,
}

impl Finding {
    pub fn error(field_id: &FieldId, message: impl Into<String>) -> Self {
        Self::new(field_id, message, Severity::Error)
    }

    pub fn warning(field_id: &FieldId, message: impl Into<String>) -> Self {
        Self::new(field_id, message, Severity::Warning)
    }

    fn new(field_id: &FieldId, message: impl Into<String>, severity: Severity) -> Self {
        Self {
            field_id: Some(field_id.clone()),
            section_id: None,
            message: message.into(),
            severity,
        }
    }

    pub(crate) fn in_section(mut self, section_id: &SectionId) -> Self {
        self.section_id = Some(section_id.clone());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Advisory note; never affects validity or score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_id: Option<FieldId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<SectionId>,
    pub message: String,
    pub priority: Priority,
}

impl Suggestion {
    pub fn new(field_id: &FieldId, message: impl Into<String>, priority: Priority) -> Self {
        Self {
            field_id: Some(field_id.clone()),
            section_id: None,
            message: message.into(),
            priority,
        }
    }

    pub(crate) fn in_section(mut self, section_id: &SectionId) -> Self {
        self.section_id = Some(section_id.clone());
        self
    }
}
