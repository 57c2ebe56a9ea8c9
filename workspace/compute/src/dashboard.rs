//! Dashboard rollup over students, fee records, payments and expenses.

use common::DashboardSummary;
use model::entities::student_fee_record::{self, FeeStatus};
use model::entities::{expense, payment, student};
use rust_decimal::Decimal;
use sea_orm::{
    AccessMode, ColumnTrait, ConnectionTrait, DatabaseConnection, DatabaseTransaction, DbBackend, EntityTrait,
    IsolationLevel, PaginatorTrait, QueryFilter, TransactionTrait,
};
use tracing::{debug, info, instrument, trace};

use crate::error::{LedgerError, Result};

/// Computes [`DashboardSummary`] values.
///
/// All figures are read inside a single transaction so a payment committed
/// halfway through cannot show up in one total and be missing from another.
#[derive(Debug, Default, Clone)]
pub struct DashboardComputer;

impl DashboardComputer {
    pub fn new() -> Self {
        Self
    }

    #[instrument(skip(self, db))]
    pub async fn compute_summary(&self, db: &DatabaseConnection) -> Result<DashboardSummary> {
        let txn = self.snapshot(db).await?;

        let total_students = student::Entity::find().count(&txn).await?;
        let payments = payment::Entity::find().all(&txn).await?;
        let pending = student_fee_record::Entity::find()
            .filter(student_fee_record::Column::Status.eq(FeeStatus::Pending))
            .all(&txn)
            .await?;
        let expenses = expense::Entity::find().all(&txn).await?;

        txn.commit().await?;

        debug!(
            "Snapshot: {} students, {} payments, {} pending fee records, {} expenses",
            total_students,
            payments.len(),
            pending.len(),
            expenses.len()
        );

        let summary = summarize(total_students, &payments, &pending, &expenses)?;
        info!(
            "Dashboard computed: collected {}, pending {}, expenses {}, net {}",
            summary.total_fees_collected, summary.pending_fees, summary.total_expenses, summary.net_revenue
        );
        Ok(summary)
    }

    async fn snapshot(&self, db: &DatabaseConnection) -> Result<DatabaseTransaction> {
        let txn = match db.get_database_backend() {
            DbBackend::Sqlite => {
                trace!("SQLite transactions are already serializable snapshots");
                db.begin().await?
            }
            backend => {
                trace!("Opening repeatable-read snapshot on {:?}", backend);
                db.begin_with_config(
                    Some(IsolationLevel::RepeatableRead),
                    Some(AccessMode::ReadOnly),
                )
                .await?
            }
        };
        Ok(txn)
    }
}

fn checked_total(label: &str, mut amounts: impl Iterator<Item = Decimal>) -> Result<Decimal> {
    amounts
        .try_fold(Decimal::ZERO, |total, amount| total.checked_add(amount))
        .ok_or_else(|| LedgerError::Overflow(format!("{} total is too large to compute", label)))
}

/// Folds loaded rows into the summary. `pending` must only hold pending fee records.
fn summarize(
    total_students: u64,
    payments: &[payment::Model],
    pending: &[student_fee_record::Model],
    expenses: &[expense::Model],
) -> Result<DashboardSummary> {
    let total_fees_collected = checked_total("Fees collected", payments.iter().map(|p| p.amount))?;
    let pending_fees = checked_total("Pending fees", pending.iter().map(|r| r.outstanding()))?;
    let total_expenses = checked_total("Expenses", expenses.iter().map(|e| e.amount))?;

    Ok(DashboardSummary::new(
        total_students,
        total_fees_collected,
        pending_fees,
        pending.len() as u64,
        total_expenses,
    ))
}
