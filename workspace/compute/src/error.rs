use thiserror::Error;
use tracing::warn;
use validator::ValidationErrors;

/// Typed failure of a ledger operation.
///
/// `Validation`, `Conflict` and `NotFound` carry a message meant for the person
/// filling in the form. `Database` is anything the store itself reported.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Missing or malformed input, rejected before anything is written
    #[error("{0}")]
    Validation(String),

    /// Uniqueness violation or a payment that would overpay a fee record
    #[error("{0}")]
    Conflict(String),

    /// A referenced student, fee structure or fee record does not exist
    #[error("{0}")]
    NotFound(String),

    /// A total no longer fits in a `Decimal`
    #[error("{0}")]
    Overflow(String),

    /// Error from the database operations
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),
}

impl From<ValidationErrors> for LedgerError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, field_errors)| {
                field_errors.iter().map(move |error| match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        // HashMap iteration order is not stable
        messages.sort();
        let err = LedgerError::Validation(messages.join("; "));
        warn!(?err, "Request rejected by validation");
        err
    }
}

/// Type alias for Result with LedgerError
pub type Result<T> = std::result::Result<T, LedgerError>;
