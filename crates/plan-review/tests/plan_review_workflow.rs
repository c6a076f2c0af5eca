//! End-to-end plan review scenarios driven through the public validator,
//! service facade, and HTTP router.

mod common {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use plan_review::plan::{
        standard_business_plan, CatalogError, PlanReviewService, ScoringWeights, Template,
        TemplateCatalog, TemplateDescriptor, TemplateId,
    };

    pub(super) struct StaticCatalog {
        templates: BTreeMap<TemplateId, Template>,
    }

    impl StaticCatalog {
        pub(super) fn standard() -> Self {
            let template = standard_business_plan().expect("standard template builds");
            let mut templates = BTreeMap::new();
            templates.insert(template.id().clone(), template);
            Self { templates }
        }
    }

    impl TemplateCatalog for StaticCatalog {
        fn fetch(&self, id: &TemplateId) -> Result<Option<Template>, CatalogError> {
            Ok(self.templates.get(id).cloned())
        }

        fn list(&self) -> Result<Vec<TemplateDescriptor>, CatalogError> {
            Ok(self.templates.values().map(Template::descriptor).collect())
        }
    }

    pub(super) fn service() -> Arc<PlanReviewService<StaticCatalog>> {
        Arc::new(PlanReviewService::new(
            Arc::new(StaticCatalog::standard()),
            ScoringWeights::default(),
        ))
    }

    pub(super) const PROJECTION_CSV: &str = "\
year,revenue,costs,profit
2025,18000,12500,5500
2026,32000,21000,11000
";
}

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use plan_review::plan::{
    plan_router, table_from_csv, FieldValue, PlanValidator, ReadinessTier, ScoringWeights,
    Submission, TemplateId, STANDARD_TEMPLATE_ID,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use common::*;

fn strong_plan() -> Submission {
    let projection = table_from_csv(PROJECTION_CSV.as_bytes()).expect("csv imports");

    Submission::new()
        .with("business_name", "Pan de Casa")
        .with(
            "executive_summary",
            "Pan de Casa is a neighbourhood bakery business selling fresh bread to local \
             customers, with a delivery service and a subscription product for regular families.",
        )
        .with("launch_date", "2025-09-01")
        .with(
            "problem_statement",
            "Families in the district face a daily challenge: there is no bakery within walking \
             distance, and the need for fresh, affordable bread is not met by the supermarkets.",
        )
        .with(
            "solution_description",
            "A small bakery with a delivery platform: customers subscribe to a weekly bread \
             service and receive a fresh product every morning, with clear benefit over supermarkets.",
        )
        .with("business_stage", "launched")
        .with(
            "target_market",
            "Our market is the four thousand households of the district; the first customer \
             segment is young families, and competition is limited to two supermarkets.",
        )
        .with(
            "customer_segments",
            vec!["families", "students", "young professionals", "small businesses", "tourists"],
        )
        .with(
            "market_competitors",
            "Two supermarkets sell industrial bread; no artisan product is available in the market.",
        )
        .with("team_size", 5_i64)
        .with(
            "team_experience",
            "The founders ran a catering business for three years and know the local customer base well.",
        )
        .with("initial_investment", 60_000_i64)
        .with("expected_revenue", 32_000_i64)
        .with("financial_projection", FieldValue::Table(projection))
        .with("revenue_chart", "line")
}

/// Select, date, and chart answers earn a flat default score, so a fully
/// answered standard plan lands in the good tier rather than excellent.
#[test]
fn complete_plan_is_good() {
    let template = standard_business_plan_template();

    let result = PlanValidator::new(ScoringWeights::default())
        .validate(&template, &strong_plan())
        .expect("known fields");

    assert!(result.is_valid, "unexpected errors: {:?}", result.errors);
    assert_eq!(result.score, 120);
    assert_eq!(result.max_score, 150);
    assert_eq!(result.summary().status, ReadinessTier::Good);
    assert!(result
        .section_scores
        .iter()
        .all(|section| section.completeness == 100.0));
}

#[test]
fn empty_plan_lists_every_required_field() {
    let template = standard_business_plan_template();

    let result = PlanValidator::default()
        .validate(&template, &Submission::new())
        .expect("known fields");

    let required = template.fields().filter(|field| field.required).count();
    assert_eq!(result.errors.len(), required);
    assert_eq!(result.score, 0);
    let summary = result.summary();
    assert_eq!(summary.status, ReadinessTier::Poor);
    assert_eq!(
        summary.next_steps[0],
        format!("Fix {required} critical errors")
    );
}

#[tokio::test]
async fn router_reviews_standard_plan() {
    let router = plan_router(service());
    let body = serde_json::to_vec(&strong_plan()).expect("submission serializes");

    let response = router
        .oneshot(
            Request::post(format!("/api/v1/templates/{STANDARD_TEMPLATE_ID}/reviews"))
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json(response).await;
    assert_eq!(payload["templateId"], STANDARD_TEMPLATE_ID);
    assert_eq!(payload["summary"]["status"], "good");
    assert_eq!(payload["result"]["percentage"], 80.0);
    assert_eq!(
        payload["result"]["sectionScores"]
            .as_array()
            .map(|sections| sections.len()),
        Some(5)
    );
}

#[tokio::test]
async fn router_rejects_unknown_template_and_fields() {
    let router = plan_router(service());

    let missing = router
        .clone()
        .oneshot(json_post("/api/v1/templates/lean-canvas/reviews", json!({})))
        .await
        .expect("route executes");
    let unknown_field = router
        .oneshot(json_post(
            &format!("/api/v1/templates/{STANDARD_TEMPLATE_ID}/reviews"),
            json!({"business_name": "Pan de Casa", "favourite_colour": "blue"}),
        ))
        .await
        .expect("route executes");

    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    assert_eq!(unknown_field.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn adhoc_validation_rejects_malformed_templates() {
    let router = plan_router(service());

    let response = router
        .oneshot(json_post(
            "/api/v1/plans/validate",
            json!({
                "template": {
                    "id": "dup",
                    "name": "Duplicate",
                    "sections": [
                        {"id": "a", "title": "A", "fields": [{"id": "name", "type": "text"}]},
                        {"id": "b", "title": "B", "fields": [{"id": "name", "type": "text"}]}
                    ]
                },
                "submission": {}
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

fn standard_business_plan_template() -> plan_review::plan::Template {
    service()
        .template(&TemplateId(STANDARD_TEMPLATE_ID.to_string()))
        .expect("standard template available")
}

fn json_post(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
        .expect("request builds")
}

async fn read_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
