//! SeaORM entity modules for the college administration store.
//!
//! Five persisted resources: students, fee structures, the per-student fee
//! records that assign a structure to a student, payments and expenses.
//! The dashboard aggregate is derived and has no table.

pub mod expense;
pub mod fee_structure;
pub mod payment;
pub mod student;
pub mod student_fee_record;

pub mod prelude {
    //! A prelude module for easy importing of all entities.
    pub use super::expense::Entity as Expense;
    pub use super::fee_structure::Entity as FeeStructure;
    pub use super::payment::Entity as Payment;
    pub use super::student::Entity as Student;
    pub use super::student_fee_record::Entity as StudentFeeRecord;
}

#[cfg(test)]
mod test {
    use chrono::{NaiveDate, Utc};
    use migration::{Migrator, MigratorTrait};
    use rust_decimal::Decimal;
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbErr,
        EntityTrait, ModelTrait, QueryFilter, Set,
    };

    use super::*;
    use prelude::*;
    use student_fee_record::FeeStatus;

    async fn setup_db() -> Result<DatabaseConnection, DbErr> {
        let db = Database::connect("sqlite::memory:").await?;

        // Enable foreign keys
        db.execute_unprepared("PRAGMA foreign_keys = ON;").await?;

        Migrator::up(&db, None).await.expect("Migrations failed.");
        Ok(db)
    }

    async fn insert_student(db: &DatabaseConnection, code: &str, course: &str) -> Result<student::Model, DbErr> {
        student::ActiveModel {
            student_code: Set(code.to_string()),
            name: Set(format!("Student {}", code)),
            email: Set(format!("{}@college.edu", code.to_lowercase())),
            course: Set(course.to_string()),
            year: Set(1),
            phone: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
    }

    #[tokio::test]
    async fn test_entity_integration() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let student1 = insert_student(&db, "CS2024001", "Computer Science").await?;
        let student2 = insert_student(&db, "MBA2024001", "MBA").await?;

        let tuition = fee_structure::ActiveModel {
            name: Set("Semester 1 Tuition".to_string()),
            fee_type: Set(fee_structure::FeeType::Tuition),
            amount: Set(Decimal::from(50000)),
            academic_year: Set("2024-25".to_string()),
            description: Set(Some("First semester tuition".to_string())),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let now = Utc::now();
        let record = student_fee_record::ActiveModel {
            student_id: Set(student1.id),
            fee_structure_id: Set(tuition.id),
            amount_due: Set(tuition.amount),
            amount_paid: Set(Decimal::ZERO),
            status: Set(FeeStatus::Pending),
            due_date: Set(NaiveDate::from_ymd_opt(2024, 8, 31)),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let payment = payment::ActiveModel {
            student_id: Set(student1.id),
            student_fee_record_id: Set(Some(record.id)),
            fee_structure_id: Set(Some(tuition.id)),
            amount: Set(Decimal::from(20000)),
            payment_date: Set(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap()),
            payment_method: Set(payment::PaymentMethod::Upi),
            transaction_id: Set(Some("UPI-889123".to_string())),
            notes: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        expense::ActiveModel {
            title: Set("Electricity bill".to_string()),
            category: Set(expense::ExpenseCategory::Utilities),
            amount: Set(Decimal::from(15000)),
            description: Set(None),
            expense_date: Set(NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()),
            vendor: Set(Some("State Electricity Board".to_string())),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        // Relations resolve in both directions
        let records_of_student1 = student1.find_related(StudentFeeRecord).all(&db).await?;
        assert_eq!(records_of_student1.len(), 1);
        assert_eq!(records_of_student1[0].id, record.id);
        assert!(student2.find_related(StudentFeeRecord).all(&db).await?.is_empty());

        let payments_of_record = record.find_related(Payment).all(&db).await?;
        assert_eq!(payments_of_record.len(), 1);
        assert_eq!(payments_of_record[0].amount, Decimal::from(20000));

        let structure = record.find_related(FeeStructure).one(&db).await?.unwrap();
        assert_eq!(structure.fee_type, fee_structure::FeeType::Tuition);

        let payer = payment.find_related(Student).one(&db).await?.unwrap();
        assert_eq!(payer.student_code, "CS2024001");

        // Enum columns round-trip through their string values
        let utilities = Expense::find()
            .filter(expense::Column::Category.eq(expense::ExpenseCategory::Utilities))
            .all(&db)
            .await?;
        assert_eq!(utilities.len(), 1);
        assert_eq!(utilities[0].vendor.as_deref(), Some("State Electricity Board"));

        let pending = StudentFeeRecord::find()
            .filter(student_fee_record::Column::Status.eq(FeeStatus::Pending))
            .all(&db)
            .await?;
        assert_eq!(pending.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn test_student_code_is_unique() -> Result<(), DbErr> {
        let db = setup_db().await?;

        insert_student(&db, "CS2024001", "Computer Science").await?;
        let duplicate = insert_student(&db, "CS2024001", "MBA").await;

        assert!(duplicate.is_err(), "second insert with the same roll number must fail");
        assert_eq!(Student::find().all(&db).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_fee_record_requires_existing_student() -> Result<(), DbErr> {
        let db = setup_db().await?;

        let structure = fee_structure::ActiveModel {
            name: Set("Hostel".to_string()),
            fee_type: Set(fee_structure::FeeType::Hostel),
            amount: Set(Decimal::from(30000)),
            academic_year: Set("2024-25".to_string()),
            description: Set(None),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(&db)
        .await?;

        let now = Utc::now();
        let orphan = student_fee_record::ActiveModel {
            student_id: Set(999),
            fee_structure_id: Set(structure.id),
            amount_due: Set(structure.amount),
            amount_paid: Set(Decimal::ZERO),
            status: Set(FeeStatus::Pending),
            due_date: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&db)
        .await;

        assert!(orphan.is_err(), "foreign key on student_id must be enforced");
        Ok(())
    }
}
