use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The category a fee structure bills for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum FeeType {
    #[sea_orm(string_value = "tuition")]
    Tuition,
    #[sea_orm(string_value = "hostel")]
    Hostel,
    #[sea_orm(string_value = "lab")]
    Lab,
    #[sea_orm(string_value = "library")]
    Library,
    #[sea_orm(string_value = "exam")]
    Exam,
    #[sea_orm(string_value = "miscellaneous")]
    Miscellaneous,
}

/// A named, priced fee template (e.g. "Semester 1 Tuition"), independent of any student.
/// Names are not unique and several structures may share an academic year.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "fee_structures")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub fee_type: FeeType,
    /// Never negative.
    #[sea_orm(column_type = "Decimal(Some((16, 4)))")]
    pub amount: Decimal,
    /// Free-form academic year label, e.g. "2024-25".
    pub academic_year: String,
    pub description: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::student_fee_record::Entity")]
    StudentFeeRecord,
}

impl Related<super::student_fee_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentFeeRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
