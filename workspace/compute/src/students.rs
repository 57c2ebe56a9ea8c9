use chrono::Utc;
use common::{CreateStudentRequest, StudentFilter};
use model::entities::student;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};
use tracing::{debug, info, instrument, warn};
use validator::Validate;

use crate::error::{LedgerError, Result};
use crate::non_blank;

/// Registers a new student. The roll number must not already be in use.
#[instrument(skip(db, request), fields(student_code = %request.student_id))]
pub async fn create_student(
    db: &DatabaseConnection,
    request: CreateStudentRequest,
) -> Result<student::Model> {
    request.validate()?;
    let student_code = request.student_id.trim().to_string();

    let txn = db.begin().await?;

    let existing = student::Entity::find()
        .filter(student::Column::StudentCode.eq(student_code.as_str()))
        .one(&txn)
        .await?;
    if existing.is_some() {
        warn!("Student ID {} already exists", student_code);
        return Err(duplicate_student(&student_code));
    }

    let new_student = student::ActiveModel {
        student_code: Set(student_code.clone()),
        name: Set(request.name.trim().to_string()),
        email: Set(request.email.trim().to_string()),
        course: Set(request.course.trim().to_string()),
        year: Set(request.year),
        phone: Set(non_blank(request.phone)),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let created = new_student
        .insert(&txn)
        .await
        .map_err(|e| unique_violation_or(e, &student_code))?;
    txn.commit().await?;

    info!("Student created with ID: {}, code: {}", created.id, created.student_code);
    Ok(created)
}

/// Lists students matching every supplied filter field, oldest first.
#[instrument(skip(db))]
pub async fn list_students(
    db: &DatabaseConnection,
    filter: &StudentFilter,
) -> Result<Vec<student::Model>> {
    let mut condition = Condition::all();

    if let Some(search) = filter.search.as_deref() {
        let pattern = format!("%{}%", escape_like(&search.to_lowercase()));
        let like = |column: student::Column| {
            Expr::expr(Func::lower(Expr::col(column)))
                .like(LikeExpr::new(pattern.clone()).escape(LIKE_ESCAPE))
        };
        condition = condition.add(
            Condition::any()
                .add(like(student::Column::Name))
                .add(like(student::Column::StudentCode))
                .add(like(student::Column::Email)),
        );
    }

    if let Some(course) = filter.course.as_deref() {
        condition = condition.add(student::Column::Course.eq(course));
    }

    let students = student::Entity::find()
        .filter(condition)
        .order_by_asc(student::Column::Id)
        .all(db)
        .await?;

    debug!("Retrieved {} students", students.len());
    Ok(students)
}

/// Fetches one student by surrogate id.
#[instrument(skip(db))]
pub async fn get_student(db: &DatabaseConnection, id: i32) -> Result<student::Model> {
    require_student(db, id).await
}

/// Loads a student on any connection or transaction, failing with `NotFound`.
pub(crate) async fn require_student<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<student::Model> {
    student::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| LedgerError::NotFound(format!("Student with ID {} not found", id)))
}

fn duplicate_student(student_code: &str) -> LedgerError {
    LedgerError::Conflict(format!("Student ID '{}' already exists", student_code))
}

/// A concurrent insert may slip past the pre-check; the unique index still catches it.
fn unique_violation_or(error: DbErr, student_code: &str) -> LedgerError {
    match error.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => duplicate_student(student_code),
        _ => LedgerError::Database(error),
    }
}

const LIKE_ESCAPE: char = '!';

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}
