use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use chrono::{DateTime, Utc};
use common::{CreateStudentRequest, StudentFilter};
use compute::students;
use model::entities::student;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use crate::error::{ledger_error, HandlerError, JsonBody};
use crate::schemas::{ApiResponse, AppState, ErrorResponse};

/// Response structure for student operations
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StudentResponse {
    pub id: i32,
    /// Roll number, unique across the registry
    pub student_id: String,
    pub name: String,
    pub email: String,
    pub course: String,
    pub year: i32,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<student::Model> for StudentResponse {
    fn from(model: student::Model) -> Self {
        Self {
            id: model.id,
            student_id: model.student_code,
            name: model.name,
            email: model.email,
            course: model.course,
            year: model.year,
            phone: model.phone,
            created_at: model.created_at,
        }
    }
}

/// Register a new student
#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentRequest,
    responses(
        (status = 201, description = "Student created successfully", body = ApiResponse<StudentResponse>),
        (status = 400, description = "Invalid request data", body = ErrorResponse),
        (status = 409, description = "Student ID already exists", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "students"
)]
#[instrument(skip(state))]
pub async fn create_student(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateStudentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StudentResponse>>), HandlerError> {
    debug!("Creating student with roll number: {}", request.student_id);

    let created = students::create_student(&state.db, request)
        .await
        .map_err(ledger_error)?;

    info!("Successfully created student with ID: {}", created.id);
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            StudentResponse::from(created),
            "Student created successfully",
        )),
    ))
}

/// List students, optionally filtered by a search term and/or course
#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentFilter),
    responses(
        (status = 200, description = "Matching students", body = ApiResponse<Vec<StudentResponse>>),
        (status = 400, description = "Invalid filter"),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "students"
)]
#[instrument(skip(state))]
pub async fn get_students(
    State(state): State<AppState>,
    Valid(Query(filter)): Valid<Query<StudentFilter>>,
) -> Result<(StatusCode, Json<ApiResponse<Vec<StudentResponse>>>), HandlerError> {
    let found = students::list_students(&state.db, &filter)
        .await
        .map_err(ledger_error)?;

    let responses: Vec<StudentResponse> = found.into_iter().map(StudentResponse::from).collect();
    info!("Successfully fetched {} students", responses.len());
    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(responses, "Students retrieved successfully")),
    ))
}

/// Get a student by surrogate ID
#[utoipa::path(
    get,
    path = "/api/students/{student_id}",
    params(
        ("student_id" = i32, Path, description = "Surrogate student ID")
    ),
    responses(
        (status = 200, description = "Student details", body = ApiResponse<StudentResponse>),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "students"
)]
#[instrument(skip(state))]
pub async fn get_student(
    Path(student_id): Path<i32>,
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<ApiResponse<StudentResponse>>), HandlerError> {
    debug!("Fetching student with ID: {}", student_id);

    let found = students::get_student(&state.db, student_id)
        .await
        .map_err(ledger_error)?;

    Ok((
        StatusCode::OK,
        Json(ApiResponse::new(
            StudentResponse::from(found),
            "Student retrieved successfully",
        )),
    ))
}
