use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Settlement state of a fee record. Never set directly; see [`FeeStatus::derive`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum FeeStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "paid")]
    Paid,
}

impl FeeStatus {
    /// The only place a record's status is decided: pending while anything is still owed.
    pub fn derive(amount_due: Decimal, amount_paid: Decimal) -> Self {
        if amount_paid < amount_due {
            FeeStatus::Pending
        } else {
            FeeStatus::Paid
        }
    }
}

/// Assignment of a fee structure to one student, tracking what is owed and what has been paid.
///
/// Invariant: `0 <= amount_paid <= amount_due`, and `status == FeeStatus::derive(amount_due, amount_paid)`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "student_fee_records")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_id: i32,
    pub fee_structure_id: i32,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount_due: Decimal,
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount_paid: Decimal,
    pub status: FeeStatus,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id",
        on_delete = "Restrict"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::fee_structure::Entity",
        from = "Column::FeeStructureId",
        to = "super::fee_structure::Column::Id",
        on_delete = "Restrict"
    )]
    FeeStructure,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payment,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::fee_structure::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeeStructure.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// What is still owed on this record.
    pub fn outstanding(&self) -> Decimal {
        self.amount_due - self.amount_paid
    }

    /// The new `amount_paid` after crediting `amount`, or `None` if that would exceed `amount_due`.
    pub fn amount_paid_after(&self, amount: Decimal) -> Option<Decimal> {
        self.amount_paid
            .checked_add(amount)
            .filter(|paid| *paid <= self.amount_due)
    }
}
