use sea_orm::entity::prelude::*;

/// A student enrolled at the college.
///
/// `student_code` is the human roll number printed on id cards (e.g. `CS2024001`)
/// and is unique across the registry; `id` is the surrogate key other tables
/// reference.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "students")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub student_code: String,
    pub name: String,
    pub email: String,
    pub course: String,
    /// Year of study, 1 through 4.
    pub year: i32,
    pub phone: Option<String>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::student_fee_record::Entity")]
    StudentFeeRecord,
    #[sea_orm(has_many = "super::payment::Entity")]
    Payment,
}

impl Related<super::student_fee_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentFeeRecord.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
