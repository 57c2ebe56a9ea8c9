use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{DateTime, NaiveDate, Utc};
use common::{CreateFeeRecordRequest, FeeRecordFilter};
use compute::fee_records;
use model::entities::student_fee_record::{self, FeeStatus};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use crate::error::{ledger_error, HandlerError, JsonBody};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Response structure for student fee record operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeeRecordResponse {
    pub id: i32,
    pub student_id: i32,
    pub fee_structure_id: i32,
    #[schema(value_type = String, example = "50000")]
    pub amount_due: Decimal,
    #[schema(value_type = String, example = "20000")]
    pub amount_paid: Decimal,
    /// Always derived from the two amounts
    pub status: FeeStatus,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<student_fee_record::Model> for FeeRecordResponse {
    fn from(model: student_fee_record::Model) -> Self {
        Self {
            id: model.id,
            student_id: model.student_id,
            fee_structure_id: model.fee_structure_id,
            amount_due: model.amount_due,
            amount_paid: model.amount_paid,
            status: model.status,
            due_date: model.due_date,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// Assign a fee structure to a student
#[utoipa::path(
    post,
    path = "/api/student-fee-records",
    request_body = CreateFeeRecordRequest,
    responses(
        (status = 201, description = "Fee record created successfully", body = ApiResponse<FeeRecordResponse>),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 404, description = "Student or fee structure not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "student-fee-records"
)]
#[instrument(skip(state))]
pub async fn create_fee_record(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateFeeRecordRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FeeRecordResponse>>), HandlerError> {
    debug!(
        "Assigning fee structure {} to student {}",
        request.fee_structure_id, request.student_id
    );

    let created = fee_records::create_fee_record(&state.db, request)
        .await
        .map_err(ledger_error)?;

    info!("Successfully created fee record with ID: {}", created.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            FeeRecordResponse::from(created),
            "Fee record created successfully",
        )),
    ))
}

/// List fee records, optionally by student and/or status
#[utoipa::path(
    get,
    path = "/api/student-fee-records",
    params(FeeRecordFilter),
    responses(
        (status = 200, description = "Matching fee records", body = ApiResponse<Vec<FeeRecordResponse>>),
        (status = 400, description = "Invalid filter"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "student-fee-records"
)]
#[instrument(skip(state))]
pub async fn get_fee_records(
    State(state): State<AppState>,
    Valid(Query(filter)): Valid<Query<FeeRecordFilter>>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<FeeRecordResponse>>>), HandlerError> {
    let records = fee_records::list_fee_records(&state.db, &filter)
        .await
        .map_err(ledger_error)?;

    let responses: Vec<FeeRecordResponse> =
        records.into_iter().map(FeeRecordResponse::from).collect();
    info!("Successfully fetched {} fee records", responses.len());
    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(responses, "Fee records retrieved successfully")),
    ))
}

/// Get a fee record by ID
#[utoipa::path(
    get,
    path = "/api/student-fee-records/{record_id}",
    params(
        ("record_id" = i32, Path, description = "Fee record ID")
    ),
    responses(
        (status = 200, description = "Fee record details", body = ApiResponse<FeeRecordResponse>),
        (status = 404, description = "Fee record not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "student-fee-records"
)]
#[instrument(skip(state))]
pub async fn get_fee_record(
    Path(record_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<FeeRecordResponse>>), HandlerError> {
    let record = fee_records::get_fee_record(&state.db, record_id)
        .await
        .map_err(ledger_error)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(
            FeeRecordResponse::from(record),
            "Fee record retrieved successfully",
        )),
    ))
}
