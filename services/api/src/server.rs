use crate::cli::ServeArgs;
use crate::infra::{load_weights, AppState, InMemoryTemplateCatalog};
use crate::routes::with_plan_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use plan_review::config::AppConfig;
use plan_review::error::AppError;
use plan_review::plan::PlanReviewService;
use plan_review::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let weights = load_weights(config.scoring.weights_path.as_deref())?;
    let catalog = InMemoryTemplateCatalog::seeded(config.catalog.template_dir.as_deref())?;
    let review_service = Arc::new(PlanReviewService::new(Arc::new(catalog), weights));

    let app = with_plan_routes(review_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "plan review service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
