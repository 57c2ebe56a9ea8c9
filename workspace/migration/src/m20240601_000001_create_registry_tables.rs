use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Create students table
        manager
            .create_table(
                Table::create()
                    .table(Students::Table)
                    .if_not_exists()
                    .col(pk_auto(Students::Id))
                    .col(string(Students::StudentCode).unique_key())
                    .col(string(Students::Name))
                    .col(string(Students::Email))
                    .col(string(Students::Course))
                    .col(integer(Students::Year))
                    .col(string_null(Students::Phone))
                    .col(timestamp_with_time_zone(Students::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_students_course")
                    .table(Students::Table)
                    .col(Students::Course)
                    .to_owned(),
            )
            .await?;

        // Create fee_structures table
        manager
            .create_table(
                Table::create()
                    .table(FeeStructures::Table)
                    .if_not_exists()
                    .col(pk_auto(FeeStructures::Id))
                    .col(string(FeeStructures::Name))
                    .col(string_len(FeeStructures::FeeType, 20))
                    .col(decimal_len(FeeStructures::Amount, 16, 4))
                    .col(string(FeeStructures::AcademicYear))
                    .col(string_null(FeeStructures::Description))
                    .col(timestamp_with_time_zone(FeeStructures::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // Create expenses table
        manager
            .create_table(
                Table::create()
                    .table(Expenses::Table)
                    .if_not_exists()
                    .col(pk_auto(Expenses::Id))
                    .col(string(Expenses::Title))
                    .col(string_len(Expenses::Category, 20))
                    .col(decimal_len(Expenses::Amount, 16, 4))
                    .col(string_null(Expenses::Description))
                    .col(date(Expenses::ExpenseDate))
                    .col(string_null(Expenses::Vendor))
                    .col(timestamp_with_time_zone(Expenses::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Expenses::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(FeeStructures::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum Students {
    Table,
    Id,
    StudentCode,
    Name,
    Email,
    Course,
    Year,
    Phone,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum FeeStructures {
    Table,
    Id,
    Name,
    FeeType,
    Amount,
    AcademicYear,
    Description,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Expenses {
    Table,
    Id,
    Title,
    Category,
    Amount,
    Description,
    ExpenseDate,
    Vendor,
    CreatedAt,
}
