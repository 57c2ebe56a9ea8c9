//! Shared fixtures for the ledger tests: an in-memory store with the schema
//! applied, and request builders with sensible defaults.

use chrono::NaiveDate;
use common::{
    CreateExpenseRequest, CreateFeeRecordRequest, CreateFeeStructureRequest, CreatePaymentRequest,
    CreateStudentRequest,
};
use migration::{Migrator, MigratorTrait};
use model::entities::{
    expense::ExpenseCategory, fee_structure::FeeType, payment::PaymentMethod,
};
use rust_decimal::Decimal;
use sea_orm::{Database, DatabaseConnection};

pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    db
}

pub fn student_request(code: &str, name: &str, course: &str) -> CreateStudentRequest {
    CreateStudentRequest {
        student_id: code.to_string(),
        name: name.to_string(),
        email: format!("{}@college.edu", code.to_lowercase()),
        course: course.to_string(),
        year: 1,
        phone: None,
    }
}

pub fn tuition_request(amount: i64) -> CreateFeeStructureRequest {
    CreateFeeStructureRequest {
        name: "Sem1 Tuition".to_string(),
        fee_type: FeeType::Tuition,
        amount: Decimal::from(amount),
        academic_year: "2024-25".to_string(),
        description: None,
    }
}

pub fn fee_record_request(student_id: i32, fee_structure_id: i32) -> CreateFeeRecordRequest {
    CreateFeeRecordRequest {
        student_id,
        fee_structure_id,
        amount_due: None,
        due_date: NaiveDate::from_ymd_opt(2024, 8, 31),
    }
}

pub fn payment_request(
    student_id: i32,
    student_fee_record_id: Option<i32>,
    amount: i64,
) -> CreatePaymentRequest {
    CreatePaymentRequest {
        student_id,
        student_fee_record_id,
        fee_structure_id: None,
        amount: Decimal::from(amount),
        payment_date: NaiveDate::from_ymd_opt(2024, 7, 15).unwrap(),
        payment_method: PaymentMethod::Cash,
        transaction_id: None,
        notes: None,
    }
}

pub fn expense_request(category: ExpenseCategory, amount: i64) -> CreateExpenseRequest {
    CreateExpenseRequest {
        title: "Monthly bill".to_string(),
        category,
        amount: Decimal::from(amount),
        description: None,
        expense_date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        vendor: None,
    }
}
