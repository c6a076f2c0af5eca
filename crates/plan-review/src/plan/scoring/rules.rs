use chrono::{DateTime, NaiveDate};

use super::super::findings::{Finding, Priority, Suggestion};
use super::super::submission::FieldValue;
use super::super::template::{Field, FieldKind, NumericRules, TextRules};
use super::weights::{magnitude_points, ScoringWeights};
use super::FieldOutcome;

/// Score one field. Never fails: every problem with the value becomes a finding.
pub(crate) fn validate_field(
    field: &Field,
    value: Option<&FieldValue>,
    weights: &ScoringWeights,
) -> FieldOutcome {
    let Some(value) = value.filter(|value| !value.is_empty()) else {
        if field.required {
            return FieldCheck::new(field).fail(format!("{} is required", field.label()));
        }
        return FieldOutcome::unanswered();
    };

    let check = FieldCheck::new(field);
    let check = match &field.kind {
        FieldKind::Text { validation } | FieldKind::Textarea { validation } => {
            score_text(check, validation, value, weights)
        }
        FieldKind::Number { validation } | FieldKind::Currency { validation } => {
            score_number(check, validation, value, weights)
        }
        FieldKind::Table { .. } => score_table(check, value, weights),
        FieldKind::Multiselect { .. } => score_multiselect(check, value, weights),
        FieldKind::Select { options } => score_select(check, options, value, weights),
        FieldKind::Date => score_date(check, value, weights),
        FieldKind::Chart => Ok(check.award(weights.default_score)),
    };

    match check {
        Ok(check) => check.finish(weights.field_max_score),
        Err(outcome) => outcome,
    }
}

/// Accumulates findings and points for one answered field.
struct FieldCheck<'a> {
    field: &'a Field,
    score: u32,
    warnings: Vec<Finding>,
    suggestions: Vec<Suggestion>,
}

/// Early exit carrying an invalid outcome.
type Checked<'a> = Result<FieldCheck<'a>, FieldOutcome>;

impl<'a> FieldCheck<'a> {
    fn new(field: &'a Field) -> Self {
        Self {
            field,
            score: 0,
            warnings: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    fn award(mut self, points: u32) -> Self {
        self.score = self.score.saturating_add(points);
        self
    }

    fn warn(&mut self, message: String) {
        self.warnings.push(Finding::warning(&self.field.id, message));
    }

    fn suggest(&mut self, message: String, priority: Priority) {
        self.suggestions
            .push(Suggestion::new(&self.field.id, message, priority));
    }

    /// Hard failure: the field is invalid and scores nothing.
    fn fail(self, message: String) -> FieldOutcome {
        FieldOutcome {
            is_valid: false,
            score: 0,
            errors: vec![Finding::error(&self.field.id, message)],
            warnings: self.warnings,
            suggestions: self.suggestions,
            answered: false,
        }
    }

    fn invalid_value(self) -> FieldOutcome {
        let message = format!(
            "{} has an invalid value for a {} field",
            self.field.label(),
            self.field.kind.label()
        );
        self.fail(message)
    }

    fn finish(self, max_score: u32) -> FieldOutcome {
        FieldOutcome {
            is_valid: true,
            score: self.score.min(max_score),
            errors: Vec::new(),
            warnings: self.warnings,
            suggestions: self.suggestions,
            answered: true,
        }
    }
}

fn score_text<'a>(
    mut check: FieldCheck<'a>,
    rules: &TextRules,
    value: &FieldValue,
    weights: &ScoringWeights,
) -> Checked<'a> {
    let Some(text) = value.as_text() else {
        return Err(check.invalid_value());
    };
    let label = check.field.label().to_string();
    let length = text.chars().count();

    if let Some(min) = rules.min_length {
        if length < min {
            return Err(check.fail(format!(
                "{label} must be at least {min} characters (currently {length})"
            )));
        }
    }
    if let Some(max) = rules.max_length {
        if length > max {
            check.warn(format!(
                "{label} exceeds the recommended {max} characters (currently {length})"
            ));
        }
    }
    if let Some(pattern) = &rules.pattern {
        if !pattern.is_match(&text) {
            check.warn(format!("{label} does not match the expected format"));
        }
    }

    let tiers = &weights.text.length_tiers;
    let length_points: u32 = tiers
        .iter()
        .filter(|tier| length >= tier.min_chars)
        .map(|tier| tier.points)
        .sum();
    if let Some(shortest) = tiers.iter().map(|tier| tier.min_chars).min() {
        if length < shortest {
            check.suggest(
                format!("Expand {label} to at least {shortest} characters with concrete details"),
                Priority::Medium,
            );
        }
    }

    let lowered = text.to_lowercase();
    let mentions_domain = weights
        .text
        .keywords_for(check.field.id.as_str())
        .iter()
        .any(|keyword| lowered.contains(&keyword.to_lowercase()));
    let keyword_points = if mentions_domain {
        weights.text.keyword_bonus
    } else {
        check.suggest(
            format!("Use specific business terms in {label}"),
            Priority::Low,
        );
        0
    };

    Ok(check
        .award(weights.text.base)
        .award(length_points)
        .award(keyword_points))
}

fn score_number<'a>(
    mut check: FieldCheck<'a>,
    rules: &NumericRules,
    value: &FieldValue,
    weights: &ScoringWeights,
) -> Checked<'a> {
    let Some(number) = value.as_number() else {
        return Err(check.invalid_value());
    };
    let label = check.field.label().to_string();

    if let Some(min) = rules.min {
        if number < min {
            return Err(check.fail(format!("{label} must be at least {min}")));
        }
    }
    if let Some(max) = rules.max {
        if number > max {
            check.warn(format!("{label} is above the expected maximum of {max}"));
        }
    }

    let numeric = &weights.numeric;
    let domain_points = numeric
        .domain_bonus_for(check.field.id.as_str())
        .map(|bonus| magnitude_points(&bonus.tiers, number))
        .unwrap_or(0);

    Ok(check
        .award(numeric.base)
        .award(magnitude_points(&numeric.magnitude_tiers, number))
        .award(domain_points))
}

/// A table with rows but no filled cell fails when required; an optional one counts as unanswered.
fn score_table<'a>(
    mut check: FieldCheck<'a>,
    value: &FieldValue,
    weights: &ScoringWeights,
) -> Checked<'a> {
    let Some(table) = value.as_table() else {
        return Err(check.invalid_value());
    };
    let label = check.field.label().to_string();

    let (filled, total) = table.fill_counts();
    if filled == 0 {
        if check.field.required {
            return Err(check.fail(format!("{label} has rows but no data")));
        }
        return Err(FieldOutcome::unanswered());
    }

    let tier_points = weights
        .table
        .fill_tiers
        .iter()
        .filter(|tier| filled * 100 >= total * u64::from(tier.min_percent))
        .max_by_key(|tier| tier.min_percent)
        .map(|tier| tier.points);
    let points = match tier_points {
        Some(points) => points,
        None => {
            let percent = (filled * 100) / total;
            check.warn(format!(
                "{label} is only {percent}% complete; fill in the remaining cells"
            ));
            0
        }
    };

    Ok(check.award(weights.table.base).award(points))
}

fn score_multiselect<'a>(
    check: FieldCheck<'a>,
    value: &FieldValue,
    weights: &ScoringWeights,
) -> Checked<'a> {
    let Some(selected) = value.as_selection() else {
        return Err(check.invalid_value());
    };

    let multiselect = &weights.multiselect;
    let tier_points: u32 = multiselect
        .selection_tiers
        .iter()
        .filter(|tier| selected.len() >= tier.min_selected)
        .map(|tier| tier.points)
        .sum();

    Ok(check.award(multiselect.base).award(tier_points))
}

fn score_select<'a>(
    mut check: FieldCheck<'a>,
    options: &[String],
    value: &FieldValue,
    weights: &ScoringWeights,
) -> Checked<'a> {
    if let Some(choice) = value.as_text() {
        let offered = options.iter().any(|option| option.as_str() == choice.as_ref());
        if !options.is_empty() && !offered {
            let message = format!("{} is not one of the available options", check.field.label());
            check.warn(message);
        }
    }
    Ok(check.award(weights.default_score))
}

fn score_date<'a>(
    mut check: FieldCheck<'a>,
    value: &FieldValue,
    weights: &ScoringWeights,
) -> Checked<'a> {
    if let FieldValue::Text(raw) = value {
        if parse_date(raw).is_none() {
            let message = format!("{} is not a valid date (YYYY-MM-DD)", check.field.label());
            check.warn(message);
        }
    }
    Ok(check.award(weights.default_score))
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(trimmed)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
