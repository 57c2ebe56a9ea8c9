use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// How the money was received.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[sea_orm(string_value = "cash")]
    Cash,
    #[sea_orm(string_value = "card")]
    Card,
    #[sea_orm(string_value = "upi")]
    Upi,
    #[sea_orm(string_value = "bank_transfer")]
    BankTransfer,
    #[sea_orm(string_value = "cheque")]
    Cheque,
}

/// Money received from a student.
///
/// A payment linked to a fee record has been credited to that record's `amount_paid`
/// in the same transaction that inserted it. Unlinked ("general") payments still
/// count towards fees collected.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub student_id: i32,
    pub student_fee_record_id: Option<i32>,
    pub fee_structure_id: Option<i32>,
    /// Always strictly positive.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    pub payment_method: PaymentMethod,
    /// Reference from the bank, card terminal or UPI app, if any.
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTimeUtc,
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
        belongs_to = "super::student_fee_record::Entity",
        from = "Column::StudentFeeRecordId",
        to = "super::student_fee_record::Column::Id",
        on_delete = "Restrict"
    )]
    StudentFeeRecord,
    #[sea_orm(
        belongs_to = "super::fee_structure::Entity",
        from = "Column::FeeStructureId",
        to = "super::fee_structure::Column::Id",
        on_delete = "SetNull"
    )]
    FeeStructure,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::student_fee_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentFeeRecord.def()
    }
}

impl Related<super::fee_structure::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::FeeStructure.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
