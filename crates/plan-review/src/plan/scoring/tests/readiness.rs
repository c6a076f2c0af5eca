use crate::plan::findings::{Finding, Priority, Suggestion};
use crate::plan::scoring::{summarize, ReadinessTier, ValidationResult};
use crate::plan::template::FieldId;

fn result_with(
    percentage: f64,
    errors: usize,
    warnings: usize,
    suggestions: usize,
) -> ValidationResult {
    let field = FieldId("summary".to_string());
    ValidationResult {
        is_valid: errors == 0,
        percentage,
        errors: (0..errors)
            .map(|_| Finding::error(&field, "Summary is required"))
            .collect(),
        warnings: (0..warnings)
            .map(|_| Finding::warning(&field, "Summary does not match the expected format"))
            .collect(),
        suggestions: (0..suggestions)
            .map(|_| {
                Suggestion::new(
                    &field,
                    "Use specific business terms in Summary",
                    Priority::Low,
                )
            })
            .collect(),
        ..ValidationResult::default()
    }
}

#[test]
fn tier_boundaries() {
    let cases = [
        (90.0, 0, ReadinessTier::Excellent),
        (100.0, 0, ReadinessTier::Excellent),
        (90.0, 1, ReadinessTier::Good),
        (89.99, 0, ReadinessTier::Good),
        (75.0, 2, ReadinessTier::Good),
        (75.0, 3, ReadinessTier::Fair),
        (74.9, 0, ReadinessTier::Fair),
        (50.0, 5, ReadinessTier::Fair),
        (50.0, 6, ReadinessTier::Poor),
        (49.9, 0, ReadinessTier::Poor),
        (95.0, 6, ReadinessTier::Poor),
    ];

    for (percentage, errors, expected) in cases {
        assert_eq!(
            ReadinessTier::classify(percentage, errors),
            expected,
            "{percentage}% with {errors} errors"
        );
    }
}

#[test]
fn errors_lead_the_next_steps() {
    let summary = summarize(&result_with(80.0, 2, 1, 0));

    assert_eq!(summary.status, ReadinessTier::Good);
    assert_eq!(summary.next_steps.first().map(String::as_str), Some("Fix 2 critical errors"));
    assert_eq!(summary.next_steps.last().map(String::as_str), Some("Review 1 warning"));
    assert_eq!(summary.next_steps.len(), 4);
}

#[test]
fn excellent_plan_has_no_remediation_steps() {
    let summary = summarize(&result_with(96.0, 0, 0, 0));

    assert_eq!(summary.status, ReadinessTier::Excellent);
    assert!(summary.message.starts_with("Excellent"));
    assert!(summary.next_steps.iter().all(|step| !step.starts_with("Fix")));
    assert_eq!(summary.next_steps.len(), 2);
}

#[test]
fn counts_are_pluralised() {
    let summary = summarize(&result_with(40.0, 1, 0, 3));

    assert_eq!(summary.status, ReadinessTier::Poor);
    assert_eq!(summary.next_steps[0], "Fix 1 critical error");
    assert_eq!(
        summary.next_steps.last().map(String::as_str),
        Some("Consider 3 improvement suggestions")
    );
}

#[test]
fn summary_serializes_lowercase_status() {
    let summary = summarize(&result_with(60.0, 0, 0, 0));

    let payload = serde_json::to_value(&summary).expect("summary serializes");

    assert_eq!(payload["status"], "fair");
    assert!(payload["nextSteps"].as_array().is_some_and(|steps| steps.len() == 3));
}
