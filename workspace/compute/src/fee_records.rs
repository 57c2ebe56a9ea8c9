use chrono::Utc;
use common::{CreateFeeRecordRequest, FeeRecordFilter};
use model::entities::student_fee_record::{self, FeeStatus};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::error::{LedgerError, Result};
use crate::fee_structures::require_fee_structure;
use crate::students::require_student;

/// Assigns a fee structure to a student.
///
/// `amount_due` defaults to the structure's amount. The record starts with
/// nothing paid and its status derived from that.
#[instrument(skip(db))]
pub async fn create_fee_record(
    db: &DatabaseConnection,
    request: CreateFeeRecordRequest,
) -> Result<student_fee_record::Model> {
    request.validate()?;

    let txn = db.begin().await?;

    let student = require_student(&txn, request.student_id).await?;
    let structure = require_fee_structure(&txn, request.fee_structure_id).await?;

    let amount_due = request.amount_due.unwrap_or(structure.amount);
    let amount_paid = Decimal::ZERO;
    let now = Utc::now();

    let created = student_fee_record::ActiveModel {
        student_id: Set(student.id),
        fee_structure_id: Set(structure.id),
        amount_due: Set(amount_due),
        amount_paid: Set(amount_paid),
        status: Set(FeeStatus::derive(amount_due, amount_paid)),
        due_date: Set(request.due_date),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    info!(
        "Fee record {} created: student {} owes {} for fee structure {}",
        created.id, created.student_id, created.amount_due, created.fee_structure_id
    );
    Ok(created)
}

/// Lists fee records matching every supplied filter field, oldest first.
#[instrument(skip(db))]
pub async fn list_fee_records(
    db: &DatabaseConnection,
    filter: &FeeRecordFilter,
) -> Result<Vec<student_fee_record::Model>> {
    let mut condition = Condition::all();
    if let Some(student_id) = filter.student_id {
        condition = condition.add(student_fee_record::Column::StudentId.eq(student_id));
    }
    if let Some(status) = filter.status {
        condition = condition.add(student_fee_record::Column::Status.eq(status));
    }

    let records = student_fee_record::Entity::find()
        .filter(condition)
        .order_by_asc(student_fee_record::Column::Id)
        .all(db)
        .await?;

    debug!("Retrieved {} fee records", records.len());
    Ok(records)
}

#[instrument(skip(db))]
pub async fn get_fee_record(
    db: &DatabaseConnection,
    id: i32,
) -> Result<student_fee_record::Model> {
    student_fee_record::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| not_found(id))
}

pub(crate) fn not_found(id: i32) -> LedgerError {
    LedgerError::NotFound(format!("Student fee record with ID {} not found", id))
}

/// Credits `amount` to a fee record that the caller has already locked on `conn`.
///
/// Fails with `Conflict` and leaves the record untouched when the payment would
/// take `amount_paid` past `amount_due`.
pub(crate) async fn credit<C: ConnectionTrait>(
    conn: &C,
    record: student_fee_record::Model,
    amount: Decimal,
) -> Result<student_fee_record::Model> {
    let Some(amount_paid) = record.amount_paid_after(amount) else {
        warn!(
            "Payment of {} rejected: fee record {} has {} outstanding",
            amount,
            record.id,
            record.outstanding()
        );
        return Err(LedgerError::Conflict(format!(
            "Payment of {} exceeds the outstanding balance of {} on fee record {}",
            amount,
            record.outstanding(),
            record.id
        )));
    };

    let status = FeeStatus::derive(record.amount_due, amount_paid);
    let mut active: student_fee_record::ActiveModel = record.into();
    active.amount_paid = Set(amount_paid);
    active.status = Set(status);
    active.updated_at = Set(Utc::now());

    let updated = active.update(conn).await?;
    debug!(
        "Fee record {} now paid {} of {} ({:?})",
        updated.id, updated.amount_paid, updated.amount_due, updated.status
    );
    Ok(updated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fee_structures::create_fee_structure;
    use crate::students::create_student;
    use crate::testing::{fee_record_request, setup_db, student_request, tuition_request};

    #[tokio::test]
    async fn test_fee_record_defaults_amount_due_to_structure_amount() {
        let db = setup_db().await;
        let student = create_student(&db, student_request("CS2024001", "A", "Computer Science"))
            .await
            .unwrap();
        let structure = create_fee_structure(&db, tuition_request(50000)).await.unwrap();

        let record = create_fee_record(&db, fee_record_request(student.id, structure.id))
            .await
            .unwrap();

        assert_eq!(record.amount_due, Decimal::from(50000));
        assert_eq!(record.amount_paid, Decimal::ZERO);
        assert_eq!(record.status, FeeStatus::Pending);
        assert_eq!(record.student_id, student.id);
    }

    #[tokio::test]
    async fn test_explicit_amount_due_overrides_structure() {
        let db = setup_db().await;
        let student = create_student(&db, student_request("CS2024001", "A", "Computer Science"))
            .await
            .unwrap();
        let structure = create_fee_structure(&db, tuition_request(50000)).await.unwrap();

        let mut request = fee_record_request(student.id, structure.id);
        request.amount_due = Some(Decimal::from(25000));
        let scholarship = create_fee_record(&db, request).await.unwrap();
        assert_eq!(scholarship.amount_due, Decimal::from(25000));

        let mut request = fee_record_request(student.id, structure.id);
        request.amount_due = Some(Decimal::ZERO);
        let waived = create_fee_record(&db, request).await.unwrap();
        assert_eq!(waived.status, FeeStatus::Paid);
    }

    #[tokio::test]
    async fn test_fee_record_references_must_exist() {
        let db = setup_db().await;
        let student = create_student(&db, student_request("CS2024001", "A", "Computer Science"))
            .await
            .unwrap();
        let structure = create_fee_structure(&db, tuition_request(50000)).await.unwrap();

        let missing_student = create_fee_record(&db, fee_record_request(999, structure.id)).await;
        assert!(matches!(missing_student, Err(LedgerError::NotFound(ref m)) if m.contains("Student")));

        let missing_structure = create_fee_record(&db, fee_record_request(student.id, 999)).await;
        assert!(matches!(missing_structure, Err(LedgerError::NotFound(ref m)) if m.contains("Fee structure")));

        assert!(list_fee_records(&db, &FeeRecordFilter::default()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filters_combine_student_and_status() {
        let db = setup_db().await;
        let asha = create_student(&db, student_request("CS2024001", "Asha", "Computer Science"))
            .await
            .unwrap();
        let ravi = create_student(&db, student_request("CS2024002", "Ravi", "Computer Science"))
            .await
            .unwrap();
        let tuition = create_fee_structure(&db, tuition_request(50000)).await.unwrap();

        create_fee_record(&db, fee_record_request(asha.id, tuition.id)).await.unwrap();
        create_fee_record(&db, fee_record_request(ravi.id, tuition.id)).await.unwrap();
        let mut waived = fee_record_request(asha.id, tuition.id);
        waived.amount_due = Some(Decimal::ZERO);
        create_fee_record(&db, waived).await.unwrap();

        let ashas = list_fee_records(
            &db,
            &FeeRecordFilter {
                student_id: Some(asha.id),
                status: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(ashas.len(), 2);
        assert!(ashas.iter().all(|r| r.student_id == asha.id));

        let ashas_pending = list_fee_records(
            &db,
            &FeeRecordFilter {
                student_id: Some(asha.id),
                status: Some(FeeStatus::Pending),
            },
        )
        .await
        .unwrap();
        assert_eq!(ashas_pending.len(), 1);
        assert_eq!(ashas_pending[0].amount_due, Decimal::from(50000));

        let all_paid = list_fee_records(
            &db,
            &FeeRecordFilter {
                student_id: None,
                status: Some(FeeStatus::Paid),
            },
        )
        .await
        .unwrap();
        assert_eq!(all_paid.len(), 1);
        assert_eq!(all_paid[0].student_id, asha.id);
    }

    #[tokio::test]
    async fn test_get_missing_fee_record_is_not_found() {
        let db = setup_db().await;
        assert!(matches!(get_fee_record(&db, 3).await, Err(LedgerError::NotFound(_))));
    }
}
