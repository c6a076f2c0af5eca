use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::template::FieldId;

/// Answers collected by the form layer, keyed by field id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Submission(BTreeMap<String, FieldValue>);

impl Submission {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field_id: &str, value: impl Into<FieldValue>) -> Self {
        self.insert(field_id, value);
        self
    }

    pub fn insert(&mut self, field_id: &str, value: impl Into<FieldValue>) {
        self.0.insert(field_id.to_string(), value.into());
    }

    pub fn get(&self, field_id: &FieldId) -> Option<&FieldValue> {
        self.0.get(field_id.as_str())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, FieldValue)> for Submission {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Raw answer shape; which shapes are acceptable depends on the field type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<String>),
    Table(TableValue),
    /// Any other JSON shape; every field type rejects it as an invalid value.
    Other(serde_json::Value),
}

impl FieldValue {
    /// Empty means "not answered": null, blank text, no selections, no rows.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Bool(_) | FieldValue::Number(_) => false,
            FieldValue::Text(text) => text.trim().is_empty(),
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Table(table) => table.rows.is_empty(),
            FieldValue::Other(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            FieldValue::Text(text) => Some(Cow::Borrowed(text.as_str())),
            FieldValue::Number(value) => Some(Cow::Owned(value.to_string())),
            _ => None,
        }
    }

    /// Numeric reading of the value; tolerates thousands separators and currency symbols.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(value) if value.is_finite() => Some(*value),
            FieldValue::Text(text) => parse_amount(text),
            _ => None,
        }
    }

    pub fn as_selection(&self) -> Option<Vec<&str>> {
        match self {
            FieldValue::List(items) => Some(items.iter().map(String::as_str).collect()),
            FieldValue::Text(text) => Some(vec![text.as_str()]),
            _ => None,
        }
    }

    pub fn as_table(&self) -> Option<&TableValue> {
        match self {
            FieldValue::Table(table) => Some(table),
            _ => None,
        }
    }
}

fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, ',' | '$' | '€' | '£' | ' ' | '_'))
        .collect();
    cleaned.parse::<f64>().ok().filter(|value| value.is_finite())
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<Vec<&str>> for FieldValue {
    fn from(value: Vec<&str>) -> Self {
        FieldValue::List(value.into_iter().map(str::to_string).collect())
    }
}

impl From<TableValue> for FieldValue {
    fn from(value: TableValue) -> Self {
        FieldValue::Table(value)
    }
}

/// Tabular answer, e.g. a financial projection grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableValue {
    #[serde(default)]
    pub headers: Vec<String>,
    pub rows: Vec<BTreeMap<String, CellValue>>,
}

impl TableValue {
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|header| header.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn with_row(mut self, cells: &[(&str, CellValue)]) -> Self {
        self.rows.push(
            cells
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
        );
        self
    }

    /// Columns used for fill accounting: declared headers, else every key seen in the rows.
    pub fn columns(&self) -> Vec<&str> {
        if !self.headers.is_empty() {
            return self.headers.iter().map(String::as_str).collect();
        }

        let mut keys: Vec<&str> = self
            .rows
            .iter()
            .flat_map(|row| row.keys().map(String::as_str))
            .collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Cell under `column`, falling back to a key that differs only in case or padding.
    fn cell<'a>(row: &'a BTreeMap<String, CellValue>, column: &str) -> Option<&'a CellValue> {
        row.get(column).or_else(|| {
            let wanted = column.trim().to_lowercase();
            row.iter()
                .find(|(key, _)| key.trim().to_lowercase() == wanted)
                .map(|(_, cell)| cell)
        })
    }

    /// Returns `(filled, total)` cell counts across all rows.
    pub fn fill_counts(&self) -> (u64, u64) {
        let columns = self.columns();
        let total = (self.rows.len() * columns.len()) as u64;
        let filled = self
            .rows
            .iter()
            .map(|row| {
                columns
                    .iter()
                    .filter(|column| Self::cell(row, column).is_some_and(|cell| !cell.is_empty()))
                    .count() as u64
            })
            .sum();
        (filled, total)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Null => true,
            CellValue::Text(text) => text.trim().is_empty(),
            CellValue::Bool(_) | CellValue::Number(_) => false,
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}
