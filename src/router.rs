use crate::config::AppConfig;
use crate::handlers::{
    dashboard::get_dashboard_summary,
    expenses::{create_expense, get_expenses},
    fee_records::{create_fee_record, get_fee_record, get_fee_records},
    fee_structures::{create_fee_structure, get_fee_structure, get_fee_structures},
    health::health_check,
    payments::{create_payment, get_payments},
    students::{create_student, get_student, get_students},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Resource routes, mounted under `/api`
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/students", get(get_students).post(create_student))
        .route("/students/:student_id", get(get_student))
        .route(
            "/fee-structures",
            get(get_fee_structures).post(create_fee_structure),
        )
        .route("/fee-structures/:fee_structure_id", get(get_fee_structure))
        .route(
            "/student-fee-records",
            get(get_fee_records).post(create_fee_record),
        )
        .route("/student-fee-records/:record_id", get(get_fee_record))
        .route("/payments", get(get_payments).post(create_payment))
        .route("/expenses", get(get_expenses).post(create_expense))
        .route("/dashboard/summary", get(get_dashboard_summary))
}

/// Create application router with all routes and middleware
pub fn create_router(state: AppState, config: &AppConfig) -> Router {
    let router = Router::new()
        .route("/health", get(health_check))
        .nest("/api", api_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()));

    // the recorder is process global, so tests building many routers skip it
    #[cfg(not(test))]
    let router = {
        let (prometheus_layer, metric_handle) = axum_prometheus::PrometheusMetricLayer::pair();
        router
            .route("/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer)
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(config.request_timeout()))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
