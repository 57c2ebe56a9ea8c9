use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{DateTime, NaiveDate, Utc};
use common::{CreateExpenseRequest, ExpenseFilter};
use compute::expenses;
use model::entities::expense::{self, ExpenseCategory};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use utoipa::ToSchema;

use crate::error::{ledger_error, HandlerError, JsonBody};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ExpenseResponse {
    pub id: i32,
    pub title: String,
    pub category: ExpenseCategory,
    #[schema(value_type = String, example = "15000")]
    pub amount: Decimal,
    pub description: Option<String>,
    pub expense_date: NaiveDate,
    pub vendor: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<expense::Model> for ExpenseResponse {
    fn from(model: expense::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            category: model.category,
            amount: model.amount,
            description: model.description,
            expense_date: model.expense_date,
            vendor: model.vendor,
            created_at: model.created_at,
        }
    }
}

/// Record an operational expense
#[utoipa::path(
    post,
    path = "/api/expenses",
    request_body = CreateExpenseRequest,
    responses(
        (status = 201, description = "Expense recorded successfully", body = ApiResponse<ExpenseResponse>),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "expenses"
)]
#[instrument(skip(state))]
pub async fn create_expense(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateExpenseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ExpenseResponse>>), HandlerError> {
    let created = expenses::create_expense(&state.db, request)
        .await
        .map_err(ledger_error)?;

    info!("Successfully recorded expense with ID: {}", created.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            ExpenseResponse::from(created),
            "Expense recorded successfully",
        )),
    ))
}

/// List expenses, optionally by category
#[utoipa::path(
    get,
    path = "/api/expenses",
    params(ExpenseFilter),
    responses(
        (status = 200, description = "Matching expenses", body = ApiResponse<Vec<ExpenseResponse>>),
        (status = 400, description = "Invalid filter"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "expenses"
)]
#[instrument(skip(state))]
pub async fn get_expenses(
    State(state): State<AppState>,
    Valid(Query(filter)): Valid<Query<ExpenseFilter>>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<ExpenseResponse>>>), HandlerError> {
    let found = expenses::list_expenses(&state.db, &filter)
        .await
        .map_err(ledger_error)?;

    let responses: Vec<ExpenseResponse> = found.into_iter().map(ExpenseResponse::from).collect();
    info!("Successfully fetched {} expenses", responses.len());
    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(responses, "Expenses retrieved successfully")),
    ))
}
