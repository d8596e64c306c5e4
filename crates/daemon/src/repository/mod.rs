//! Record repositories with optimistic concurrency.
//!
//! A [`Repository`] owns one collection of the document store and enforces
//! the version rules shared by every record kind:
//!
//! - `create` always stores version 0, whatever the caller sent
//! - `update` only succeeds when the caller's version equals the stored one,
//!   and then stores `version + 1`
//! - `delete` is unconditional
//!
//! Lookups of an absent id are not errors; they come back as `None`/`false`.

use crate::database::{BakeryItem, Collection, Database, Document, Order, StoreError};

pub type BakeryItemRepository = Repository<BakeryItem>;
pub type OrderRepository = Repository<Order>;

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("{0}")]
    Validation(String),

    #[error("Item has been modified by another process.")]
    ConcurrencyConflict {
        kind: &'static str,
        id: i64,
        expected: i64,
        actual: i64,
    },

    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl RepositoryError {
    pub fn is_conflict(&self) -> bool {
        matches!(self, RepositoryError::ConcurrencyConflict { .. })
    }
}

pub struct Repository<T> {
    collection: Collection<T>,
}

impl<T: Document> std::fmt::Debug for Repository<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("collection", &self.collection)
            .finish()
    }
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            collection: self.collection.clone(),
        }
    }
}

impl BakeryItemRepository {
    pub fn bakery_items(db: &Database) -> Self {
        Self::new(db.bakery_items())
    }
}

impl OrderRepository {
    pub fn orders(db: &Database) -> Self {
        Self::new(db.orders())
    }
}

impl<T: Document> Repository<T> {
    pub fn new(collection: Collection<T>) -> Self {
        Self { collection }
    }

    /// Store a new record. The version is forced to 0 and the id is assigned
    /// by the store; the stored record is returned.
    pub async fn create(&self, mut document: T) -> Result<T, RepositoryError> {
        document.set_version(0);
        let id = self.collection.insert(&mut document).await?;
        tracing::debug!(kind = T::KIND, id, "record created");
        Ok(document)
    }

    pub async fn get(&self, id: i64) -> Result<Option<T>, RepositoryError> {
        validate_id(id)?;
        Ok(self.collection.find_by_id(id).await?)
    }

    pub async fn get_all(&self) -> Result<Vec<T>, RepositoryError> {
        Ok(self.collection.find_all().await?)
    }

    /// Replace the record stored under `id` with `document`.
    ///
    /// Returns `Ok(false)` if no such record exists. Fails with
    /// [`RepositoryError::ConcurrencyConflict`] when `document.version()` is
    /// not the stored version, including when another writer wins the race
    /// between the version check and the write.
    pub async fn update(&self, id: i64, mut document: T) -> Result<bool, RepositoryError> {
        validate_id(id)?;
        if document.id() != id {
            return Err(RepositoryError::Validation(format!(
                "Id mismatch: path id {} does not match {} id {}",
                id,
                T::KIND,
                document.id()
            )));
        }

        let existing = match self.collection.find_by_id(id).await? {
            Some(existing) => existing,
            None => return Ok(false),
        };

        let expected = document.version();
        if existing.version() != expected {
            return Err(conflict::<T>(id, expected, existing.version()));
        }

        document.set_version(expected + 1);
        if self.collection.replace(&document, expected).await? {
            tracing::debug!(kind = T::KIND, id, version = expected + 1, "record updated");
            return Ok(true);
        }

        // Lost the race to a concurrent writer (or a delete) after the check.
        match self.collection.find_by_id(id).await? {
            Some(current) => Err(conflict::<T>(id, expected, current.version())),
            None => Ok(false),
        }
    }

    /// Physically remove the record. Returns whether it existed.
    pub async fn delete(&self, id: i64) -> Result<bool, RepositoryError> {
        validate_id(id)?;
        Ok(self.collection.delete(id).await?)
    }
}

fn validate_id(id: i64) -> Result<(), RepositoryError> {
    if id <= 0 {
        return Err(RepositoryError::Validation(format!("Invalid id: {}", id)));
    }
    Ok(())
}

fn conflict<T: Document>(id: i64, expected: i64, actual: i64) -> RepositoryError {
    tracing::warn!(
        kind = T::KIND,
        id,
        expected,
        actual,
        "version conflict on update"
    );
    RepositoryError::ConcurrencyConflict {
        kind: T::KIND,
        id,
        expected,
        actual,
    }
}
