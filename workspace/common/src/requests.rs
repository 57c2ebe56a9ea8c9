use std::borrow::Cow;

use chrono::NaiveDate;
use model::entities::{expense::ExpenseCategory, fee_structure::FeeType, payment::PaymentMethod};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Fractional digits a stored amount keeps.
pub const AMOUNT_SCALE: u32 = 4;

/// Largest amount a `decimal(16, 4)` column holds: 999 999 999 999.9999.
pub fn max_amount() -> Decimal {
    Decimal::new(9_999_999_999_999_999, AMOUNT_SCALE)
}

fn amount_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::from(message));
    error
}

fn storable(amount: &Decimal) -> Result<(), ValidationError> {
    if amount.normalize().scale() > AMOUNT_SCALE {
        return Err(amount_error(
            "scale",
            "amount must have at most 4 decimal places",
        ));
    }
    if amount.abs() > max_amount() {
        return Err(amount_error(
            "range",
            "amount must not exceed 999999999999.9999",
        ));
    }
    Ok(())
}

fn non_negative(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount < Decimal::ZERO {
        return Err(amount_error("non_negative", "amount must not be negative"));
    }
    storable(amount)
}

fn strictly_positive(amount: &Decimal) -> Result<(), ValidationError> {
    if *amount <= Decimal::ZERO {
        return Err(amount_error("positive", "amount must be greater than zero"));
    }
    storable(amount)
}

/// Rejects text that is empty once surrounding whitespace is removed.
fn non_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Request body for registering a student
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq)]
pub struct CreateStudentRequest {
    /// Human roll number, unique across the registry (e.g. "CS2024001")
    #[validate(custom(function = "non_blank", message = "student_id is required"))]
    pub student_id: String,
    #[validate(custom(function = "non_blank", message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(custom(function = "non_blank", message = "course is required"))]
    pub course: String,
    /// Year of study (1-4)
    #[validate(range(min = 1, max = 4, message = "year must be between 1 and 4"))]
    pub year: i32,
    pub phone: Option<String>,
}

/// Request body for defining a fee structure
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq)]
pub struct CreateFeeStructureRequest {
    #[validate(custom(function = "non_blank", message = "name is required"))]
    pub name: String,
    pub fee_type: FeeType,
    /// Amount in rupees, zero or more
    #[schema(value_type = String, example = "50000")]
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
    /// Academic year label (e.g. "2024-25")
    #[validate(custom(function = "non_blank", message = "academic_year is required"))]
    pub academic_year: String,
    pub description: Option<String>,
}

/// Request body for assigning a fee structure to a student
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq)]
pub struct CreateFeeRecordRequest {
    /// Surrogate id of the student
    pub student_id: i32,
    pub fee_structure_id: i32,
    /// Defaults to the fee structure's amount
    #[schema(value_type = Option<String>, example = "50000")]
    #[validate(custom(function = "non_negative"))]
    pub amount_due: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
}

/// Request body for recording a payment
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq)]
pub struct CreatePaymentRequest {
    /// Surrogate id of the paying student
    pub student_id: i32,
    /// Fee record to credit; omit for a general payment
    pub student_fee_record_id: Option<i32>,
    pub fee_structure_id: Option<i32>,
    /// Amount in rupees, strictly positive
    #[schema(value_type = String, example = "20000")]
    #[validate(custom(function = "strictly_positive"))]
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
}

/// Request body for recording an expense
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, Validate, PartialEq)]
pub struct CreateExpenseRequest {
    #[validate(custom(function = "non_blank", message = "title is required"))]
    pub title: String,
    pub category: ExpenseCategory,
    #[schema(value_type = String, example = "15000")]
    #[validate(custom(function = "non_negative"))]
    pub amount: Decimal,
    pub description: Option<String>,
    pub expense_date: NaiveDate,
    pub vendor: Option<String>,
}
