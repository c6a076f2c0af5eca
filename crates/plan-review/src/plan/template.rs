use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier wrapper for catalog templates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub String);

/// Identifier wrapper for template sections.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SectionId(pub String);

/// Field identifier; doubles as the key into submission data.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub String);

macro_rules! id_display {
    ($($ty:ty),*) => {
        $(
            impl $ty {
                pub fn as_str(&self) -> &str {
                    &self.0
                }
            }

            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(&self.0)
                }
            }
        )*
    };
}

id_display!(TemplateId, SectionId, FieldId);

/// Structural problems that make a template unusable for scoring.
#[derive(Debug, thiserror::Error)]
pub enum TemplateError {
    #[error("template id must not be empty")]
    MissingTemplateId,
    #[error("field '{field_id}' appears in section '{first}' and section '{second}'")]
    DuplicateFieldId {
        field_id: FieldId,
        first: SectionId,
        second: SectionId,
    },
    #[error("section '{0}' is declared more than once")]
    DuplicateSectionId(SectionId),
    #[error("section '{0}' contains a field with an empty id")]
    EmptyFieldId(SectionId),
}

/// Immutable document schema: ordered sections of typed fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "TemplateDocument")]
pub struct Template {
    id: TemplateId,
    name: String,
    sections: Vec<Section>,
}

#[derive(Deserialize)]
struct TemplateDocument {
    id: TemplateId,
    name: String,
    #[serde(default)]
    sections: Vec<Section>,
}

impl TryFrom<TemplateDocument> for Template {
    type Error = TemplateError;

    fn try_from(document: TemplateDocument) -> Result<Self, Self::Error> {
        Template::new(document.id, document.name, document.sections)
    }
}

impl Template {
    /// Build a template, rejecting duplicate section or field ids.
    pub fn new(
        id: TemplateId,
        name: impl Into<String>,
        sections: Vec<Section>,
    ) -> Result<Self, TemplateError> {
        if id.0.trim().is_empty() {
            return Err(TemplateError::MissingTemplateId);
        }

        let mut seen_sections = BTreeSet::new();
        let mut seen_fields: BTreeMap<&FieldId, &SectionId> = BTreeMap::new();
        for section in &sections {
            if !seen_sections.insert(&section.id) {
                return Err(TemplateError::DuplicateSectionId(section.id.clone()));
            }
            for field in &section.fields {
                if field.id.0.trim().is_empty() {
                    return Err(TemplateError::EmptyFieldId(section.id.clone()));
                }
                if let Some(first) = seen_fields.insert(&field.id, &section.id) {
                    return Err(TemplateError::DuplicateFieldId {
                        field_id: field.id.clone(),
                        first: first.clone(),
                        second: section.id.clone(),
                    });
                }
            }
        }

        Ok(Self {
            id,
            name: name.into(),
            sections,
        })
    }

    pub fn id(&self) -> &TemplateId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.sections.iter().flat_map(|section| section.fields.iter())
    }

    pub fn field(&self, id: &str) -> Option<&Field> {
        self.fields().find(|field| field.id.as_str() == id)
    }

    pub fn field_count(&self) -> usize {
        self.sections.iter().map(|section| section.fields.len()).sum()
    }

    pub fn descriptor(&self) -> TemplateDescriptor {
        TemplateDescriptor {
            id: self.id.clone(),
            name: self.name.clone(),
            section_count: self.sections.len(),
            field_count: self.field_count(),
        }
    }
}

/// Listing entry for catalog browsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateDescriptor {
    pub id: TemplateId,
    pub name: String,
    pub section_count: usize,
    pub field_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: SectionId,
    pub title: String,
    #[serde(default)]
    pub fields: Vec<Field>,
}

impl Section {
    pub fn new(id: &str, title: &str, fields: Vec<Field>) -> Self {
        Self {
            id: SectionId(id.to_string()),
            title: title.to_string(),
            fields,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    pub id: FieldId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(flatten)]
    pub kind: FieldKind,
}

impl Field {
    pub fn new(id: &str, kind: FieldKind) -> Self {
        Self {
            id: FieldId(id.to_string()),
            label: None,
            required: false,
            kind,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn labelled(mut self, label: &str) -> Self {
        self.label = Some(label.to_string());
        self
    }

    /// Human-facing name used in messages; falls back to the id.
    pub fn label(&self) -> &str {
        self.label.as_deref().unwrap_or(self.id.as_str())
    }
}

/// Field type with the constraints that apply to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    Text {
        #[serde(default)]
        validation: TextRules,
    },
    Textarea {
        #[serde(default)]
        validation: TextRules,
    },
    Number {
        #[serde(default)]
        validation: NumericRules,
    },
    Currency {
        #[serde(default)]
        validation: NumericRules,
    },
    Date,
    Select {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        options: Vec<String>,
    },
    Multiselect {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        options: Vec<String>,
    },
    Table {
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        columns: Vec<String>,
    },
    Chart,
}

impl FieldKind {
    pub fn text(validation: TextRules) -> Self {
        Self::Text { validation }
    }

    pub fn textarea(validation: TextRules) -> Self {
        Self::Textarea { validation }
    }

    pub fn number(validation: NumericRules) -> Self {
        Self::Number { validation }
    }

    pub fn currency(validation: NumericRules) -> Self {
        Self::Currency { validation }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            FieldKind::Text { .. } => "text",
            FieldKind::Textarea { .. } => "textarea",
            FieldKind::Number { .. } => "number",
            FieldKind::Currency { .. } => "currency",
            FieldKind::Date => "date",
            FieldKind::Select { .. } => "select",
            FieldKind::Multiselect { .. } => "multiselect",
            FieldKind::Table { .. } => "table",
            FieldKind::Chart => "chart",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<FieldPattern>,
}

impl TextRules {
    pub fn min_length(min: usize) -> Self {
        Self {
            min_length: Some(min),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct NumericRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl NumericRules {
    pub fn at_least(min: f64) -> Self {
        Self {
            min: Some(min),
            max: None,
        }
    }
}

/// Compiled regular expression carried as its source string on the wire.
#[derive(Debug, Clone)]
pub struct FieldPattern(Regex);

impl FieldPattern {
    pub fn new(source: &str) -> Result<Self, regex::Error> {
        Regex::new(source).map(Self)
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.0.is_match(text)
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl PartialEq for FieldPattern {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Serialize for FieldPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldPattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let source = String::deserialize(deserializer)?;
        FieldPattern::new(&source).map_err(serde::de::Error::custom)
    }
}
