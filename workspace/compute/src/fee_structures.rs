use chrono::Utc;
use common::CreateFeeStructureRequest;
use model::entities::fee_structure;
use sea_orm::{ActiveModelTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use tracing::{debug, info, instrument};
use validator::Validate;

use crate::error::{LedgerError, Result};
use crate::non_blank;

/// Defines a new fee structure. Names need not be unique.
#[instrument(skip(db, request), fields(name = %request.name))]
pub async fn create_fee_structure(
    db: &DatabaseConnection,
    request: CreateFeeStructureRequest,
) -> Result<fee_structure::Model> {
    request.validate()?;

    let created = fee_structure::ActiveModel {
        name: Set(request.name.trim().to_string()),
        fee_type: Set(request.fee_type),
        amount: Set(request.amount),
        academic_year: Set(request.academic_year.trim().to_string()),
        description: Set(non_blank(request.description)),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    info!("Fee structure created with ID: {}, amount: {}", created.id, created.amount);
    Ok(created)
}

#[instrument(skip(db))]
pub async fn list_fee_structures(db: &DatabaseConnection) -> Result<Vec<fee_structure::Model>> {
    let structures = fee_structure::Entity::find()
        .order_by_asc(fee_structure::Column::Id)
        .all(db)
        .await?;
    debug!("Retrieved {} fee structures", structures.len());
    Ok(structures)
}

#[instrument(skip(db))]
pub async fn get_fee_structure(db: &DatabaseConnection, id: i32) -> Result<fee_structure::Model> {
    require_fee_structure(db, id).await
}

pub(crate) async fn require_fee_structure<C: ConnectionTrait>(
    conn: &C,
    id: i32,
) -> Result<fee_structure::Model> {
    fee_structure::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| LedgerError::NotFound(format!("Fee structure with ID {} not found", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{setup_db, tuition_request};
    use rust_decimal::Decimal;

    #[tokio::test]
    async fn test_create_and_list_fee_structures() {
        let db = setup_db().await;

        let first = create_fee_structure(&db, tuition_request(50000)).await.unwrap();
        // Same name and academic year is allowed
        let second = create_fee_structure(&db, tuition_request(52000)).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(first.amount, Decimal::from(50000));

        let all = list_fee_structures(&db).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, first.id);
        assert_eq!(all[1].academic_year, "2024-25");
    }

    #[tokio::test]
    async fn test_negative_amount_is_rejected() {
        let db = setup_db().await;

        let result = create_fee_structure(&db, tuition_request(-1)).await;
        assert!(matches!(result, Err(LedgerError::Validation(_))));
        assert!(list_fee_structures(&db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_description_is_stored_as_none() {
        let db = setup_db().await;

        let mut request = tuition_request(1000);
        request.description = Some("   ".to_string());
        let created = create_fee_structure(&db, request).await.unwrap();
        assert_eq!(created.description, None);

        let fetched = get_fee_structure(&db, created.id).await.unwrap();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_missing_fee_structure_is_not_found() {
        let db = setup_db().await;
        assert!(matches!(get_fee_structure(&db, 1).await, Err(LedgerError::NotFound(_))));
    }
}
