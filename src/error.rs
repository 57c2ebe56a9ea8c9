//! Mapping of ledger failures and malformed request bodies onto HTTP responses.

use axum::{
    extract::{rejection::JsonRejection, FromRequest},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use compute::LedgerError;
use tracing::{error, warn};

use crate::schemas::ErrorResponse;

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

pub fn error_response(status: StatusCode, code: &str, message: impl Into<String>) -> HandlerError {
    (
        status,
        Json(ErrorResponse {
            message: message.into(),
            code: code.to_string(),
            success: false,
        }),
    )
}

/// Converts a ledger failure into its status code and error body.
///
/// Database details are logged but never sent to the client.
pub fn ledger_error(err: LedgerError) -> HandlerError {
    match err {
        LedgerError::Validation(message) => {
            warn!("Rejected invalid request: {}", message);
            error_response(StatusCode::BAD_REQUEST, "VALIDATION_ERROR", message)
        }
        LedgerError::Conflict(message) => {
            warn!("Rejected conflicting request: {}", message);
            error_response(StatusCode::CONFLICT, "CONFLICT", message)
        }
        LedgerError::NotFound(message) => {
            warn!("{}", message);
            error_response(StatusCode::NOT_FOUND, "NOT_FOUND", message)
        }
        LedgerError::Overflow(message) => {
            error!("{}", message);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message)
        }
        LedgerError::Database(e) => {
            error!("Database error: {}", e);
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "The request could not be completed because of a database error",
            )
        }
    }
}

/// `Json` extractor whose rejections use the regular error body, so a
/// missing field or an unknown enum value reads like any other validation
/// failure.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(BodyRejection))]
pub struct JsonBody<T>(pub T);

#[derive(Debug)]
pub struct BodyRejection(JsonRejection);

impl From<JsonRejection> for BodyRejection {
    fn from(rejection: JsonRejection) -> Self {
        Self(rejection)
    }
}

impl IntoResponse for BodyRejection {
    fn into_response(self) -> Response {
        let message = self.0.body_text();
        warn!("Rejected request body: {}", message);
        let status = match self.0 {
            JsonRejection::MissingJsonContentType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            _ => StatusCode::BAD_REQUEST,
        };
        error_response(status, "VALIDATION_ERROR", message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ledger_errors_map_to_status_and_code() {
        let cases = [
            (LedgerError::Validation("bad".into()), StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            (LedgerError::Conflict("dup".into()), StatusCode::CONFLICT, "CONFLICT"),
            (LedgerError::NotFound("gone".into()), StatusCode::NOT_FOUND, "NOT_FOUND"),
            (LedgerError::Overflow("too big".into()), StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        ];
        for (err, status, code) in cases {
            let (actual, Json(body)) = ledger_error(err);
            assert_eq!(actual, status);
            assert_eq!(body.code, code);
            assert!(!body.success);
        }
    }

    #[test]
    fn test_database_errors_hide_details() {
        let err = LedgerError::Database(sea_orm::DbErr::Custom("disk I/O error at page 7".into()));
        let (status, Json(body)) = ledger_error(err);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, "DATABASE_ERROR");
        assert!(!body.message.contains("page 7"));
    }
}
