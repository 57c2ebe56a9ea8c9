use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::{DateTime, Utc};
use common::CreateFeeStructureRequest;
use compute::fee_structures;
use model::entities::fee_structure::{self, FeeType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use crate::error::{ledger_error, HandlerError, JsonBody};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Response structure for fee structure operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FeeStructureResponse {
    pub id: i32,
    pub name: String,
    pub fee_type: FeeType,
    #[schema(value_type = String, example = "50000")]
    pub amount: Decimal,
    /// e.g. "2024-25"
    pub academic_year: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<fee_structure::Model> for FeeStructureResponse {
    fn from(model: fee_structure::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            fee_type: model.fee_type,
            amount: model.amount,
            academic_year: model.academic_year,
            description: model.description,
            created_at: model.created_at,
        }
    }
}

/// Define a new fee structure
#[utoipa::path(
    post,
    path = "/api/fee-structures",
    request_body = CreateFeeStructureRequest,
    responses(
        (status = 201, description = "Fee structure created successfully", body = ApiResponse<FeeStructureResponse>),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "fee-structures"
)]
#[instrument(skip(state))]
pub async fn create_fee_structure(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateFeeStructureRequest>,
) -> Result<(StatusCode, Json<ApiResponse<FeeStructureResponse>>), HandlerError> {
    debug!("Creating fee structure: {} ({:?})", request.name, request.fee_type);

    let created = fee_structures::create_fee_structure(&state.db, request)
        .await
        .map_err(ledger_error)?;

    info!("Successfully created fee structure with ID: {}", created.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            FeeStructureResponse::from(created),
            "Fee structure created successfully",
        )),
    ))
}

/// List all fee structures
#[utoipa::path(
    get,
    path = "/api/fee-structures",
    responses(
        (status = 200, description = "List of all fee structures", body = ApiResponse<Vec<FeeStructureResponse>>),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "fee-structures"
)]
#[instrument(skip(state))]
pub async fn get_fee_structures(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<FeeStructureResponse>>>), HandlerError> {
    let structures = fee_structures::list_fee_structures(&state.db)
        .await
        .map_err(ledger_error)?;

    let responses: Vec<FeeStructureResponse> =
        structures.into_iter().map(FeeStructureResponse::from).collect();
    info!("Successfully fetched {} fee structures", responses.len());
    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(responses, "Fee structures retrieved successfully")),
    ))
}

/// Get a fee structure by ID
#[utoipa::path(
    get,
    path = "/api/fee-structures/{fee_structure_id}",
    params(
        ("fee_structure_id" = i32, Path, description = "Fee structure ID")
    ),
    responses(
        (status = 200, description = "Fee structure details", body = ApiResponse<FeeStructureResponse>),
        (status = 404, description = "Fee structure not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "fee-structures"
)]
#[instrument(skip(state))]
pub async fn get_fee_structure(
    Path(fee_structure_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<FeeStructureResponse>>), HandlerError> {
    let structure = fee_structures::get_fee_structure(&state.db, fee_structure_id)
        .await
        .map_err(ledger_error)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(
            FeeStructureResponse::from(structure),
            "Fee structure retrieved successfully",
        )),
    ))
}
