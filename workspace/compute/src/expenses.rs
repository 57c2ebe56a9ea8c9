use chrono::Utc;
use common::{CreateExpenseRequest, ExpenseFilter};
use model::entities::expense;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::error::Result;
use crate::non_blank;

#[instrument(skip(db, request), fields(title = %request.title, amount = %request.amount))]
pub async fn create_expense(
    db: &DatabaseConnection,
    request: CreateExpenseRequest,
) -> Result<expense::Model> {
    request.validate()?;

    let created = expense::ActiveModel {
        title: Set(request.title.trim().to_string()),
        category: Set(request.category),
        amount: Set(request.amount),
        description: Set(non_blank(request.description)),
        expense_date: Set(request.expense_date),
        vendor: Set(non_blank(request.vendor)),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!(
        "Expense {} recorded: {} ({:?})",
        created.id, created.amount, created.category
    );
    Ok(created)
}

#[instrument(skip(db))]
pub async fn list_expenses(
    db: &DatabaseConnection,
    filter: &ExpenseFilter,
) -> Result<Vec<expense::Model>> {
    let mut condition = Condition::all();
    if let Some(category) = filter.category {
        condition = condition.add(expense::Column::Category.eq(category));
    }

    let expenses = expense::Entity::find()
        .filter(condition)
        .order_by_asc(expense::Column::Id)
        .all(db)
        .await?;

    debug!("Retrieved {} expenses", expenses.len());
    Ok(expenses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::testing::{expense_request, setup_db};
    use model::entities::expense::ExpenseCategory;
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_create_expense_trims_optional_text() {
        let db = setup_db().await;

        let mut request = expense_request(ExpenseCategory::Utilities, 20000);
        request.vendor = Some("  ".to_string());
        request.description = Some(" Electricity, July ".to_string());

        let expense = create_expense(&db, request).await.unwrap();
        assert_eq!(expense.amount, Decimal::from(20000));
        assert_eq!(expense.vendor, None);
        assert_eq!(expense.description.as_deref(), Some("Electricity, July"));
    }

    #[tokio::test]
    async fn test_zero_amount_is_allowed_but_negative_is_not() {
        let db = setup_db().await;

        assert!(create_expense(&db, expense_request(ExpenseCategory::Miscellaneous, 0))
            .await
            .is_ok());

        let negative = create_expense(&db, expense_request(ExpenseCategory::Miscellaneous, -1)).await;
        assert!(matches!(negative, Err(LedgerError::Validation(_))));
        assert_eq!(list_expenses(&db, &ExpenseFilter::default()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_category_filter_returns_subset() {
        let db = setup_db().await;
        create_expense(&db, expense_request(ExpenseCategory::Utilities, 100)).await.unwrap();
        create_expense(&db, expense_request(ExpenseCategory::Salaries, 200)).await.unwrap();
        create_expense(&db, expense_request(ExpenseCategory::Utilities, 300)).await.unwrap();

        let all = list_expenses(&db, &ExpenseFilter::default()).await.unwrap();
        assert_eq!(all.len(), 3);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));

        let filter = ExpenseFilter {
            category: Some(ExpenseCategory::Utilities),
        };
        let utilities = list_expenses(&db, &filter).await.unwrap();
        assert_eq!(utilities.len(), 2);
        assert!(utilities
            .iter()
            .all(|e| e.category == ExpenseCategory::Utilities));
    }
}
