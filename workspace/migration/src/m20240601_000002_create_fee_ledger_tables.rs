use sea_orm_migration::{prelude::*, schema::*};

use crate::m20240601_000001_create_registry_tables::{FeeStructures, Students};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create student_fee_records table
        manager
            .create_table(
                Table::create()
                    .table(StudentFeeRecords::Table)
                    .if_not_exists()
                    .col(pk_auto(StudentFeeRecords::Id))
                    .col(integer(StudentFeeRecords::StudentId))
                    .col(integer(StudentFeeRecords::FeeStructureId))
                    .col(decimal_len(StudentFeeRecords::AmountDue, 16, 4))
                    .col(decimal_len(StudentFeeRecords::AmountPaid, 16, 4))
                    .col(string_len(StudentFeeRecords::Status, 20))
                    .col(date_null(StudentFeeRecords::DueDate))
                    .col(timestamp_with_time_zone(StudentFeeRecords::CreatedAt))
                    .col(timestamp_with_time_zone(StudentFeeRecords::UpdatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_fee_record_student")
                            .from(StudentFeeRecords::Table, StudentFeeRecords::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_fee_record_fee_structure")
                            .from(StudentFeeRecords::Table, StudentFeeRecords::FeeStructureId)
                            .to(FeeStructures::Table, FeeStructures::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_student_fee_records_student_id")
                    .table(StudentFeeRecords::Table)
                    .col(StudentFeeRecords::StudentId)
                    .to_owned(),
            )
            .await?;

        // Create payments table
        manager
            .create_table(
                Table::create()
                    .table(Payments::Table)
                    .if_not_exists()
                    .col(pk_auto(Payments::Id))
                    .col(integer(Payments::StudentId))
                    .col(integer_null(Payments::StudentFeeRecordId))
                    .col(integer_null(Payments::FeeStructureId))
                    .col(decimal_len(Payments::Amount, 16, 4))
                    .col(date(Payments::PaymentDate))
                    .col(string_len(Payments::PaymentMethod, 20))
                    .col(string_null(Payments::TransactionId))
                    .col(string_null(Payments::Notes))
                    .col(timestamp_with_time_zone(Payments::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_student")
                            .from(Payments::Table, Payments::StudentId)
                            .to(Students::Table, Students::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_student_fee_record")
                            .from(Payments::Table, Payments::StudentFeeRecordId)
                            .to(StudentFeeRecords::Table, StudentFeeRecords::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_payment_fee_structure")
                            .from(Payments::Table, Payments::FeeStructureId)
                            .to(FeeStructures::Table, FeeStructures::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_payments_student_id")
                    .table(Payments::Table)
                    .col(Payments::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Payments reference fee records, drop them first
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(StudentFeeRecords::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum StudentFeeRecords {
    Table,
    Id,
    StudentId,
    FeeStructureId,
    AmountDue,
    AmountPaid,
    Status,
    DueDate,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Payments {
    Table,
    Id,
    StudentId,
    StudentFeeRecordId,
    FeeStructureId,
    Amount,
    PaymentDate,
    PaymentMethod,
    TransactionId,
    Notes,
    CreatedAt,
}
