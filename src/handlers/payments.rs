use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{DateTime, NaiveDate, Utc};
use common::{CreatePaymentRequest, PaymentFilter};
use compute::payments;
use model::entities::payment::{self, PaymentMethod};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use crate::error::{ledger_error, HandlerError, JsonBody};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Response structure for payment operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub id: i32,
    pub student_id: i32,
    /// Fee record the payment was credited to; absent for general payments
    pub student_fee_record_id: Option<i32>,
    pub fee_structure_id: Option<i32>,
    #[schema(value_type = String, example = "20000")]
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<payment::Model> for PaymentResponse {
    fn from(model: payment::Model) -> Self {
        Self {
            id: model.id,
            student_id: model.student_id,
            student_fee_record_id: model.student_fee_record_id,
            fee_structure_id: model.fee_structure_id,
            amount: model.amount,
            payment_date: model.payment_date,
            payment_method: model.payment_method,
            transaction_id: model.transaction_id,
            notes: model.notes,
            created_at: model.created_at,
        }
    }
}

/// Record a payment, crediting the referenced fee record if any
#[utoipa::path(
    post,
    path = "/api/payments",
    request_body = CreatePaymentRequest,
    responses(
        (status = 201, description = "Payment recorded successfully", body = ApiResponse<PaymentResponse>),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 404, description = "Student, fee structure or fee record not found", body = ErrorResponse),
        (status = 409, description = "Payment exceeds the outstanding balance", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "payments"
)]
#[instrument(skip(state))]
pub async fn create_payment(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreatePaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentResponse>>), HandlerError> {
    debug!(
        "Recording payment of {} from student {} against fee record {:?}",
        request.amount, request.student_id, request.student_fee_record_id
    );

    let created = payments::create_payment(&state.db, request)
        .await
        .map_err(ledger_error)?;

    info!("Successfully recorded payment with ID: {}", created.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            PaymentResponse::from(created),
            "Payment recorded successfully",
        )),
    ))
}

/// List payments, optionally for one student
#[utoipa::path(
    get,
    path = "/api/payments",
    params(PaymentFilter),
    responses(
        (status = 200, description = "Matching payments", body = ApiResponse<Vec<PaymentResponse>>),
        (status = 400, description = "Invalid filter"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "payments"
)]
#[instrument(skip(state))]
pub async fn get_payments(
    State(state): State<AppState>,
    Valid(Query(filter)): Valid<Query<PaymentFilter>>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<PaymentResponse>>>), HandlerError> {
    let found = payments::list_payments(&state.db, &filter)
        .await
        .map_err(ledger_error)?;

    let responses: Vec<PaymentResponse> = found.into_iter().map(PaymentResponse::from).collect();
    info!("Successfully fetched {} payments", responses.len());
    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(responses, "Payments retrieved successfully")),
    ))
}
