use crate::plan::scoring::PlanValidator;
use crate::plan::submission::{CellValue, FieldValue, TableValue};
use crate::plan::template::{
    Field, FieldKind, NumericRules, Section, Template, TemplateId, TextRules,
};

const BUSINESS_SENTENCE: &str = "Our business serves local customers with fresh bread. ";

pub(super) fn validator() -> PlanValidator {
    PlanValidator::default()
}

/// Prose of exactly `len` characters that mentions generic business terms.
pub(super) fn business_text(len: usize) -> String {
    BUSINESS_SENTENCE
        .repeat(len / BUSINESS_SENTENCE.len() + 1)
        .chars()
        .take(len)
        .collect()
}

/// Text of exactly `len` characters with no recognisable keywords.
pub(super) fn plain_text(len: usize) -> String {
    "a".repeat(len)
}

pub(super) fn summary_field(rules: TextRules) -> Field {
    Field::new("summary", FieldKind::textarea(rules)).labelled("Summary")
}

pub(super) fn number_field(id: &str, rules: NumericRules) -> Field {
    Field::new(id, FieldKind::number(rules))
}

pub(super) fn table_field() -> Field {
    Field::new(
        "projection",
        FieldKind::Table {
            columns: vec!["value".to_string()],
        },
    )
    .labelled("Projection")
}

/// Single-column table with `total` rows of which the first `filled` carry data.
pub(super) fn table_with_fill(filled: usize, total: usize) -> FieldValue {
    let mut table = TableValue::new(&["value"]);
    for index in 0..total {
        let cell = if index < filled {
            CellValue::Number(index as f64)
        } else {
            CellValue::Null
        };
        table = table.with_row(&[("value", cell)]);
    }
    FieldValue::Table(table)
}

/// One section holding a required textarea and a required non-negative number.
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
