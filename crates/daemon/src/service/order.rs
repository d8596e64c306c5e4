use crate::database::Order;
use crate::repository::OrderRepository;

use super::{require_body, validate_id, wrap, ServiceError};

/// Order operations. Unlike bakery items, every addressed order must exist:
/// lookups and updates of an absent id fail with [`ServiceError::NotFound`].
#[derive(Debug, Clone)]
pub struct OrderService {
    repository: OrderRepository,
}

impl OrderService {
    pub fn new(repository: OrderRepository) -> Self {
        Self { repository }
    }

    pub async fn create(&self, order: Option<Order>) -> Result<Order, ServiceError> {
        let order = require_body(order, "order")?;
        self.repository
            .create(order)
            .await
            .map_err(wrap("An error occurred while creating the order."))
    }

    pub async fn get(&self, id: i64) -> Result<Order, ServiceError> {
        validate_id(id)?;
        self.repository
            .get(id)
            .await
            .map_err(wrap(format!(
                "An error occurred while retrieving the order with id {}.",
                id
            )))?
            .ok_or_else(|| not_found(id))
    }

    pub async fn get_all(&self) -> Result<Vec<Order>, ServiceError> {
        self.repository
            .get_all()
            .await
            .map_err(wrap("An error occurred while retrieving all orders."))
    }

    pub async fn update(&self, id: i64, order: Option<Order>) -> Result<(), ServiceError> {
        validate_id(id)?;
        let order = require_body(order, "order")?;
        if order.id != id {
            return Err(ServiceError::Validation("Id mismatch".to_string()));
        }

        let updated = self.repository.update(id, order).await.map_err(wrap(format!(
            "An error occurred while updating the order with id {}.",
            id
        )))?;

        if !updated {
            return Err(not_found(id));
        }
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        validate_id(id)?;
        self.repository.delete(id).await.map_err(wrap(format!(
            "An error occurred while deleting the order with id {}.",
            id
        )))
    }
}

fn not_found(id: i64) -> ServiceError {
    ServiceError::NotFound(format!("Order with id {} not found.", id))
}
