use common::{
    CreateExpenseRequest, CreateFeeRecordRequest, CreateFeeStructureRequest, CreatePaymentRequest,
    CreateStudentRequest, DashboardSummary,
};
use model::entities::{
    expense::ExpenseCategory, fee_structure::FeeType, payment::PaymentMethod,
    student_fee_record::FeeStatus,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};

use crate::handlers::{
    expenses::ExpenseResponse, fee_records::FeeRecordResponse,
    fee_structures::FeeStructureResponse, payments::PaymentResponse, students::StudentResponse,
};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
}

/// API response wrapper
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human readable description of what went wrong
    pub message: String,
    /// Machine readable error code (VALIDATION_ERROR, CONFLICT, NOT_FOUND, DATABASE_ERROR)
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::students::create_student,
        crate::handlers::students::get_students,
        crate::handlers::students::get_student,
        crate::handlers::fee_structures::create_fee_structure,
        crate::handlers::fee_structures::get_fee_structures,
        crate::handlers::fee_structures::get_fee_structure,
        crate::handlers::fee_records::create_fee_record,
        crate::handlers::fee_records::get_fee_records,
        crate::handlers::fee_records::get_fee_record,
        crate::handlers::payments::create_payment,
        crate::handlers::payments::get_payments,
        crate::handlers::expenses::create_expense,
        crate::handlers::expenses::get_expenses,
        crate::handlers::dashboard::get_dashboard_summary,
    ),
    components(
        schemas(
            ApiResponse<StudentResponse>,
            ApiResponse<Vec<StudentResponse>>,
            ApiResponse<FeeStructureResponse>,
            ApiResponse<Vec<FeeStructureResponse>>,
            ApiResponse<FeeRecordResponse>,
            ApiResponse<Vec<FeeRecordResponse>>,
            ApiResponse<PaymentResponse>,
            ApiResponse<Vec<PaymentResponse>>,
            ApiResponse<ExpenseResponse>,
            ApiResponse<Vec<ExpenseResponse>>,
            ApiResponse<DashboardSummary>,
            ErrorResponse,
            HealthResponse,
            CreateStudentRequest,
            CreateFeeStructureRequest,
            CreateFeeRecordRequest,
            CreatePaymentRequest,
            CreateExpenseRequest,
            StudentResponse,
            FeeStructureResponse,
            FeeRecordResponse,
            PaymentResponse,
            ExpenseResponse,
            DashboardSummary,
            FeeType,
            FeeStatus,
            PaymentMethod,
            ExpenseCategory,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "students", description = "Student registry"),
        (name = "fee-structures", description = "Fee structure catalog"),
        (name = "student-fee-records", description = "Fees assigned to students and their settlement"),
        (name = "payments", description = "Payment ledger"),
        (name = "expenses", description = "Expense ledger"),
        (name = "dashboard", description = "Aggregated figures for reporting"),
    ),
    info(
        title = "Bursar API",
        description = "College administration backend: student registry, fee ledger, payments, expenses and a reporting dashboard",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;
