use crate::infra::{load_weights, parse_table_arg, InMemoryTemplateCatalog};
use chrono::{DateTime, Utc};
use clap::Args;
use plan_review::config::AppConfig;
use plan_review::error::AppError;
use plan_review::plan::{
    load_template, table_from_csv, FieldValue, PlanReview, PlanReviewService, ReviewServiceError,
    Submission, Template, TemplateCatalog, TemplateId, STANDARD_TEMPLATE_ID,
};
use serde::Serialize;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ValidateArgs {
    /// Submission JSON file: an object keyed by field id
    #[arg(long)]
    pub(crate) submission: PathBuf,
    /// Template JSON file, or `standard` for the built-in template (default)
    #[arg(long)]
    pub(crate) template: Option<String>,
    /// Attach a CSV file as a table answer, as FIELD_ID=PATH (repeatable)
    #[arg(long = "table", value_parser = parse_table_arg)]
    pub(crate) tables: Vec<(String, PathBuf)>,
    /// Scoring weights JSON file (overrides APP_SCORING_WEIGHTS)
    #[arg(long)]
    pub(crate) weights: Option<PathBuf>,
    /// Print the review as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct TemplatesArgs {
    /// Print the full definition of one template
    #[arg(long)]
    pub(crate) show: Option<String>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Print the review as JSON
    #[arg(long)]
    pub(crate) json: bool,
}

/// JSON envelope for reviews produced outside the HTTP service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ReviewReport<'a> {
    evaluated_at: DateTime<Utc>,
    #[serde(flatten)]
    review: &'a PlanReview,
}

pub(crate) fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let ValidateArgs {
        submission,
        template,
        tables,
        weights,
        json,
    } = args;

    let config = AppConfig::load()?;
    let service = review_service(&config, weights.as_deref())?;

    let template = match template.as_deref() {
        None | Some("standard") => {
            service.template(&TemplateId(STANDARD_TEMPLATE_ID.to_string()))?
        }
        Some(path) => load_template(Path::new(path))?,
    };

    let mut submission = read_submission(&submission)?;
    for (field_id, path) in tables {
        let table = table_from_csv(File::open(&path)?)?;
        submission.insert(&field_id, FieldValue::Table(table));
    }

    let review = service
        .review_with(&template, &submission)
        .map_err(ReviewServiceError::from)?;
    print_review(&template, &review, json)
}

pub(crate) fn run_templates(args: TemplatesArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let catalog = InMemoryTemplateCatalog::seeded(config.catalog.template_dir.as_deref())?;

    if let Some(id) = args.show {
        let template_id = TemplateId(id);
        let template = catalog
            .fetch(&template_id)?
            .ok_or(ReviewServiceError::TemplateNotFound(template_id))?;
        println!("{}", serde_json::to_string_pretty(&template)?);
        return Ok(());
    }

    println!("Available plan templates");
    for descriptor in catalog.list()? {
        println!(
            "- {} ({}): {} sections, {} fields",
            descriptor.id, descriptor.name, descriptor.section_count, descriptor.field_count
        );
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let catalog = InMemoryTemplateCatalog::seeded(None)?;
    let service = PlanReviewService::new(Arc::new(catalog), Default::default());
    let template = service.template(&TemplateId(STANDARD_TEMPLATE_ID.to_string()))?;

    let submission = demo_submission()?;
    let review = service
        .review_with(&template, &submission)
        .map_err(ReviewServiceError::from)?;

    if !args.json {
        println!("Business plan review demo");
        println!("Sample plan: a neighbourhood bakery reviewed against '{}'\n", template.name());
    }
    print_review(&template, &review, args.json)
}

fn review_service(
    config: &AppConfig,
    weights_override: Option<&Path>,
) -> Result<PlanReviewService<InMemoryTemplateCatalog>, AppError> {
    let weights_path = weights_override.or(config.scoring.weights_path.as_deref());
    let weights = load_weights(weights_path)?;
    let catalog = InMemoryTemplateCatalog::seeded(config.catalog.template_dir.as_deref())?;
    Ok(PlanReviewService::new(Arc::new(catalog), weights))
}

fn read_submission(path: &Path) -> Result<Submission, AppError> {
    let raw = fs::read(path)?;
    Ok(serde_json::from_slice(&raw)?)
}

const DEMO_PROJECTION: &str = "\
year,revenue,costs,profit
2025,18000,12500,5500
2026,32000,21000,11000
2027,45000,,
";

fn demo_submission() -> Result<Submission, AppError> {
    let projection = table_from_csv(DEMO_PROJECTION.as_bytes())?;

    Ok(Submission::new()
        .with("business_name", "Pan de Barrio")
        .with(
            "executive_summary",
            "Pan de Barrio is a small bakery business that sells fresh bread and pastries to \
             families in the neighbourhood, with a morning delivery service for regular customers.",
        )
        .with("launch_date", "2025-09-01")
        .with(
            "problem_statement",
            "Families in the district have no bakery within walking distance and need fresh bread.",
        )
        .with(
            "solution_description",
            "A bakery with a delivery platform and weekly subscription for fresh product.",
        )
        .with("business_stage", "prototype")
        .with("target_market", "Local families.")
        .with("customer_segments", vec!["families", "students"])
        .with("team_size", 2_i64)
        .with("initial_investment", "$8,500")
        .with("expected_revenue", 18_000_i64)
        .with("financial_projection", FieldValue::Table(projection)))
}

fn print_review(template: &Template, review: &PlanReview, json: bool) -> Result<(), AppError> {
    if json {
        let report = ReviewReport {
            evaluated_at: Utc::now(),
            review,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    render_review(template, review);
    Ok(())
}

fn render_review(template: &Template, review: &PlanReview) {
    let result = &review.result;
    let summary = &review.summary;

    println!("Plan review: {} ({})", template.name(), template.id());
    println!(
        "Status: {} | score {}/{} ({:.1}%) | {}",
        summary.status.label().to_uppercase(),
        result.score,
        result.max_score,
        result.percentage,
        if result.is_valid { "valid" } else { "invalid" }
    );
    println!("{}", summary.message);

    println!("\nSections");
    for (section, score) in template.sections().iter().zip(&result.section_scores) {
        println!(
            "- {}: {}/{} ({:.1}%), {:.0}% complete",
            section.title, score.score, score.max_score, score.percentage, score.completeness
        );
    }

    if !result.errors.is_empty() {
        println!("\nErrors");
        for finding in &result.errors {
            println!("- {}", finding.message);
        }
    }
    if !result.warnings.is_empty() {
        println!("\nWarnings");
        for finding in &result.warnings {
            println!("- {}", finding.message);
        }
    }
    if !result.suggestions.is_empty() {
        println!("\nSuggestions");
        for suggestion in &result.suggestions {
            println!("- [{:?}] {}", suggestion.priority, suggestion.message);
        }
    }

    println!("\nNext steps");
    for (index, step) in summary.next_steps.iter().enumerate() {
        println!("{}. {}", index + 1, step);
    }
}
