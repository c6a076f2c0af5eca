use super::super::findings::Severity;
use super::super::submission::Submission;
use super::super::template::{Section, Template};
use super::weights::ScoringWeights;
use super::{rules, SectionOutcome, SectionScore, SubmissionError, ValidationResult};

pub(crate) fn score_section(
    section: &Section,
    submission: &Submission,
    weights: &ScoringWeights,
) -> SectionOutcome {
    let mut score = 0u32;
    let mut completed = 0usize;
    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut suggestions = Vec::new();

    for field in &section.fields {
        let outcome = rules::validate_field(field, submission.get(&field.id), weights);
        score = score.saturating_add(outcome.score);
        if outcome.is_valid && outcome.answered {
            completed += 1;
        }
        errors.extend(
            outcome
                .errors
                .into_iter()
                .map(|finding| finding.in_section(&section.id)),
        );
        warnings.extend(
            outcome
                .warnings
                .into_iter()
                .map(|finding| finding.in_section(&section.id)),
        );
        suggestions.extend(
            outcome
                .suggestions
                .into_iter()
                .map(|suggestion| suggestion.in_section(&section.id)),
        );
    }

    let field_count = section.fields.len();
    let max_score = u32::try_from(field_count)
        .map_or(u32::MAX, |count| weights.field_max_score.saturating_mul(count));

    SectionOutcome {
        score: SectionScore {
            section_id: section.id.clone(),
            score,
            max_score,
            percentage: percent(score as usize, max_score as usize),
            completeness: percent(completed, field_count),
        },
        errors,
        warnings,
        suggestions,
    }
}

pub(crate) fn validate_plan(
    template: &Template,
    submission: &Submission,
    weights: &ScoringWeights,
) -> Result<ValidationResult, SubmissionError> {
    if let Some(unknown) = submission
        .keys()
        .find(|key| template.field(key).is_none())
    {
        return Err(SubmissionError::UnknownField {
            template_id: template.id().clone(),
            field_id: unknown.to_string(),
        });
    }

    let mut result = ValidationResult::default();
    for section in template.sections() {
        let outcome = score_section(section, submission, weights);
        result.score = result.score.saturating_add(outcome.score.score);
        result.max_score = result.max_score.saturating_add(outcome.score.max_score);
        result.errors.extend(outcome.errors);
        result.warnings.extend(outcome.warnings);
        result.suggestions.extend(outcome.suggestions);
        result.section_scores.push(outcome.score);
    }

    result.percentage = percent(result.score as usize, result.max_score as usize);
    result.is_valid = !result
        .errors
        .iter()
        .any(|finding| finding.severity == Severity::Error);
    Ok(result)
}

/// `100 * part / whole`, or zero when there is nothing to measure against.
pub(crate) fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    100.0 * part as f64 / whole as f64
}
