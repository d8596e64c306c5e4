//! Entity services: input checks plus translation of repository outcomes
//! into the three error kinds handlers deal with.

mod bakery_item;
mod order;

pub use bakery_item::BakeryItemService;
pub use order::OrderService;

use crate::repository::RepositoryError;

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// The caller sent something malformed: no body, a non-positive id, or a
    /// body whose id disagrees with the path.
    #[error("{0}")]
    Validation(String),

    /// The addressed record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Anything else that went wrong below the service, with a stable
    /// message naming the operation and target.
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: RepositoryError,
    },
}

impl ServiceError {
    /// Whether this failure came from a stale version stamp. The caller can
    /// re-read the record and retry.
    pub fn is_conflict(&self) -> bool {
        matches!(self, ServiceError::Internal { source, .. } if source.is_conflict())
    }
}

/// Build a mapper that keeps repository validation failures as they are
/// and wraps everything else under `message`.
fn wrap(message: impl Into<String>) -> impl FnOnce(RepositoryError) -> ServiceError {
    let message = message.into();
    move |source| match source {
        RepositoryError::Validation(reason) => ServiceError::Validation(reason),
        source => {
            tracing::error!(error = %source, "{}", message);
            ServiceError::Internal { message, source }
        }
    }
}

fn validate_id(id: i64) -> Result<(), ServiceError> {
    if id <= 0 {
        return Err(ServiceError::Validation(format!("Invalid id: {}", id)));
    }
    Ok(())
}

fn require_body<T>(body: Option<T>, kind: &str) -> Result<T, ServiceError> {
    body.ok_or_else(|| ServiceError::Validation(format!("A {} body is required", kind)))
}
