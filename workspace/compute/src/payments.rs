use chrono::Utc;
use common::{CreatePaymentRequest, PaymentFilter};
use model::entities::{payment, student_fee_record};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::error::{LedgerError, Result};
use crate::fee_records;
use crate::fee_structures::require_fee_structure;
use crate::non_blank;
use crate::students::require_student;

/// Records a payment from a student.
///
/// With `student_fee_record_id` the payment is credited to that record: the
/// record is locked, checked against overpayment, updated and the payment row
/// inserted in one transaction, so either both land or neither does. Without
/// it the payment is general income for the student.
#[instrument(skip(db, request), fields(student_id = request.student_id, amount = %request.amount))]
pub async fn create_payment(
    db: &DatabaseConnection,
    request: CreatePaymentRequest,
) -> Result<payment::Model> {
    request.validate()?;

    let txn = db.begin().await?;

    let student = require_student(&txn, request.student_id).await?;

    let mut fee_structure_id = request.fee_structure_id;
    if let Some(id) = fee_structure_id {
        require_fee_structure(&txn, id).await?;
    }

    if let Some(record_id) = request.student_fee_record_id {
        // FOR UPDATE on backends with row locks; SQLite serializes writers on its own
        let record = student_fee_record::Entity::find_by_id(record_id)
            .lock_exclusive()
            .one(&txn)
            .await?
            .ok_or_else(|| fee_records::not_found(record_id))?;

        if record.student_id != student.id {
            warn!(
                "Fee record {} belongs to student {}, not {}",
                record.id, record.student_id, student.id
            );
            return Err(LedgerError::Validation(format!(
                "Student fee record {} does not belong to student {}",
                record.id, student.id
            )));
        }

        match fee_structure_id {
            Some(id) if id != record.fee_structure_id => {
                return Err(LedgerError::Validation(format!(
                    "Fee structure {} does not match fee record {} (fee structure {})",
                    id, record.id, record.fee_structure_id
                )));
            }
            _ => fee_structure_id = Some(record.fee_structure_id),
        }

        fee_records::credit(&txn, record, request.amount).await?;
    }

    let created = payment::ActiveModel {
        student_id: Set(student.id),
        student_fee_record_id: Set(request.student_fee_record_id),
        fee_structure_id: Set(fee_structure_id),
        amount: Set(request.amount),
        payment_date: Set(request.payment_date),
        payment_method: Set(request.payment_method),
        transaction_id: Set(non_blank(request.transaction_id)),
        notes: Set(non_blank(request.notes)),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;

    info!(
        "Payment {} of {} recorded for student {} (fee record: {:?})",
        created.id, created.amount, created.student_id, created.student_fee_record_id
    );
    Ok(created)
}

/// Lists payments, optionally for one student, oldest first.
#[instrument(skip(db))]
pub async fn list_payments(
    db: &DatabaseConnection,
    filter: &PaymentFilter,
) -> Result<Vec<payment::Model>> {
    let mut condition = Condition::all();
    if let Some(student_id) = filter.student_id {
        condition = condition.add(payment::Column::StudentId.eq(student_id));
    }

    let payments = payment::Entity::find()
        .filter(condition)
        .order_by_asc(payment::Column::Id)
        .all(db)
        .await?;

    debug!("Retrieved {} payments", payments.len());
    Ok(payments)
}
