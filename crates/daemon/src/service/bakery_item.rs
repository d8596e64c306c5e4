use crate::database::BakeryItem;
use crate::repository::BakeryItemRepository;

use super::{require_body, validate_id, wrap, ServiceError};

/// Bakery item operations.
///
/// An absent item is reported as `None` / `false`, not as
/// [`ServiceError::NotFound`]; handlers turn that into a 404 themselves.
#[derive(Debug, Clone)]
pub struct BakeryItemService {
    repository: BakeryItemRepository,
}

impl BakeryItemService {
    pub fn new(repository: BakeryItemRepository) -> Self {
        Self { repository }
    }

    pub async fn create(&self, item: Option<BakeryItem>) -> Result<BakeryItem, ServiceError> {
        let item = require_body(item, "bakery item")?;
        self.repository
            .create(item)
            .await
            .map_err(wrap("An error occurred while creating the bakery item."))
    }

    pub async fn get(&self, id: i64) -> Result<Option<BakeryItem>, ServiceError> {
        validate_id(id)?;
        self.repository.get(id).await.map_err(wrap(format!(
            "An error occurred while retrieving the bakery item with id {}.",
            id
        )))
    }

    pub async fn get_all(&self) -> Result<Vec<BakeryItem>, ServiceError> {
        self.repository
            .get_all()
            .await
            .map_err(wrap("An error occurred while retrieving all bakery items."))
    }

    pub async fn update(&self, id: i64, item: Option<BakeryItem>) -> Result<bool, ServiceError> {
        validate_id(id)?;
        let item = require_body(item, "bakery item")?;
        if item.id != id {
            return Err(ServiceError::Validation("Id mismatch".to_string()));
        }

        self.repository.update(id, item).await.map_err(wrap(format!(
            "An error occurred while updating the bakery item with id {}.",
            id
        )))
    }

    pub async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        validate_id(id)?;
        self.repository.delete(id).await.map_err(wrap(format!(
            "An error occurred while deleting the bakery item with id {}.",
            id
        )))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::database::Database;
    use crate::repository::RepositoryError;

    async fn setup() -> (BakeryItemService, Database) {
        let db = Database::in_memory().await.unwrap();
        let service = BakeryItemService::new(BakeryItemRepository::bakery_items(&db));
        (service, db)
    }

    fn bagel() -> BakeryItem {
        BakeryItem {
            id: 0,
            name: "Bagel".to_string(),
            price: Decimal::new(150, 2),
            quantity_available: 10,
            version: 0,
        }
    }

    #[tokio::test]
    async fn test_missing_body_is_validation() {
        let (service, _db) = setup().await;
        assert!(matches!(
            service.create(None).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.update(1, None).await,
            Err(ServiceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_non_positive_ids_are_validation() {
        let (service, _db) = setup().await;
        assert!(matches!(
            service.get(0).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.delete(-3).await,
            Err(ServiceError::Validation(_))
        ));
        assert!(matches!(
            service.update(0, Some(bagel())).await,
            Err(ServiceError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_id_mismatch_is_validation() {
        let (service, _db) = setup().await;
        let created = service.create(Some(bagel())).await.unwrap();

        let err = service
            .update(created.id + 1, Some(created))
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref m) if m == "Id mismatch"));
    }

    #[tokio::test]
    async fn test_absent_item_is_none_not_error() {
        let (service, _db) = setup().await;
        assert!(service.get(99).await.unwrap().is_none());

        let mut item = bagel();
        item.id = 99;
        assert!(!service.update(99, Some(item)).await.unwrap());
        assert!(!service.delete(99).await.unwrap());
    }

    #[tokio::test]
    async fn test_bagel_scenario() {
        let (service, _db) = setup().await;

        let created = service.create(Some(bagel())).await.unwrap();
        assert_eq!(created.version, 0);

        let mut sold = created.clone();
        sold.quantity_available = 8;
        assert!(service.update(created.id, Some(sold)).await.unwrap());
        assert_eq!(service.get(created.id).await.unwrap().unwrap().version, 1);

        let mut stale = created.clone();
        stale.quantity_available = 5;
        let err = service.update(created.id, Some(stale)).await.unwrap_err();
        assert!(err.is_conflict());
        assert_eq!(
            err.to_string(),
            format!(
                "An error occurred while updating the bakery item with id {}.",
                created.id
            )
        );
        assert!(matches!(
            err,
            ServiceError::Internal {
                source: RepositoryError::ConcurrencyConflict { .. },
                ..
            }
        ));

        let stored = service.get(created.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity_available, 8);
        assert_eq!(stored.version, 1);
    }

    #[tokio::test]
    async fn test_store_failure_is_wrapped() {
        let (service, db) = setup().await;
        db.close().await;

        let err = service.get_all().await.unwrap_err();
        assert!(!err.is_conflict());
        match err {
            ServiceError::Internal { message, source } => {
                assert_eq!(
                    message,
                    "An error occurred while retrieving all bakery items."
                );
                assert!(matches!(source, RepositoryError::Store(_)));
            }
            other => panic!("expected internal error, got {other:?}"),
        }

        let err = service.get(4).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "An error occurred while retrieving the bakery item with id 4."
        );
    }
}
