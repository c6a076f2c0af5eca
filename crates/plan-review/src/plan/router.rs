use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::catalog::TemplateCatalog;
use super::service::{PlanReviewService, ReviewServiceError};
use super::submission::Submission;
use super::template::{Template, TemplateId};

/// Router builder exposing template browsing and plan review endpoints.
pub fn plan_router<C>(service: Arc<PlanReviewService<C>>) -> Router
where
    C: TemplateCatalog + 'static,
{
    Router::new()
        .route("/api/v1/templates", get(list_handler::<C>))
        .route("/api/v1/templates/:template_id", get(template_handler::<C>))
        .route(
            "/api/v1/templates/:template_id/reviews",
            post(review_handler::<C>),
        )
        .route("/api/v1/plans/validate", post(adhoc_handler::<C>))
        .with_state(service)
}

/// Body for validating against a template the caller supplies inline.
#[derive(Debug, Deserialize)]
pub struct AdhocReviewRequest {
    pub template: Template,
    #[serde(default)]
    pub submission: Submission,
}

pub(crate) async fn list_handler<C>(State(service): State<Arc<PlanReviewService<C>>>) -> Response
where
    C: TemplateCatalog + 'static,
{
    match service.templates() {
        Ok(templates) => (StatusCode::OK, axum::Json(templates)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn template_handler<C>(
    State(service): State<Arc<PlanReviewService<C>>>,
    Path(template_id): Path<String>,
) -> Response
where
    C: TemplateCatalog + 'static,
{
    match service.template(&TemplateId(template_id)) {
        Ok(template) => (StatusCode::OK, axum::Json(template)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn review_handler<C>(
    State(service): State<Arc<PlanReviewService<C>>>,
    Path(template_id): Path<String>,
    axum::Json(submission): axum::Json<Submission>,
) -> Response
where
    C: TemplateCatalog + 'static,
{
    match service.review(&TemplateId(template_id), &submission) {
        Ok(review) => (StatusCode::OK, axum::Json(review)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn adhoc_handler<C>(
    State(service): State<Arc<PlanReviewService<C>>>,
    axum::Json(request): axum::Json<AdhocReviewRequest>,
) -> Response
where
    C: TemplateCatalog + 'static,
{
    match service.review_with(&request.template, &request.submission) {
        Ok(review) => (StatusCode::OK, axum::Json(review)).into_response(),
        Err(err) => error_response(ReviewServiceError::Submission(err)),
    }
}

fn error_response(err: ReviewServiceError) -> Response {
    let status = match &err {
        ReviewServiceError::TemplateNotFound(_) => StatusCode::NOT_FOUND,
        ReviewServiceError::Submission(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ReviewServiceError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({
        "error": err.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
