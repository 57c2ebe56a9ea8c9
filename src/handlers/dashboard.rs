use axum::{extract::State, http::StatusCode, response::Json};
use common::DashboardSummary;
use compute::DashboardComputer;
use tracing::{debug, instrument};

use crate::error::{ledger_error, HandlerError};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Totals over students, fees, payments and expenses
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    responses(
        (status = 200, description = "Dashboard summary", body = ApiResponse<DashboardSummary>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "dashboard"
)]
#[instrument(skip(state))]
pub async fn get_dashboard_summary(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<DashboardSummary>>), HandlerError> {
    let summary = DashboardComputer::new()
        .compute_summary(&state.db)
        .await
        .map_err(ledger_error)?;

    debug!("Dashboard summary: {:?}", summary);
    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(summary, "Dashboard summary computed successfully")),
    ))
}
