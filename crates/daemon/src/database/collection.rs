//! Keyed JSON document collections on top of SQLite.
//!
//! Each collection is one table of `(id, version, document)` rows. The id
//! and version columns are authoritative; the document column holds every
//! other field of the record.

use std::fmt;
use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::Database;

/// A record that can be stored in a [`Collection`].
pub trait Document: Send + Sync + Unpin + 'static {
    /// Table that backs the collection.
    const COLLECTION: &'static str;
    /// Human readable record kind, used in logs and error messages.
    const KIND: &'static str;

    /// Contents of the `document` column: every field but id and version,
    /// in a lossless encoding.
    type Stored: Serialize + DeserializeOwned;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn version(&self) -> i64;
    fn set_version(&mut self, version: i64);

    fn to_stored(&self) -> Self::Stored;
    fn from_stored(id: i64, version: i64, stored: Self::Stored) -> Self;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("document codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

/// Typed view over one collection of the document store.
pub struct Collection<T> {
    db: Database,
    _document: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _document: PhantomData,
        }
    }
}

impl<T: Document> fmt::Debug for Collection<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Collection")
            .field("name", &T::COLLECTION)
            .finish()
    }
}

impl<T: Document> Collection<T> {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            _document: PhantomData,
        }
    }

    /// Insert a new document. The store assigns the id, which is written
    /// back into `document` and returned.
    pub async fn insert(&self, document: &mut T) -> Result<i64, StoreError> {
        let body = encode(document)?;
        let sql = format!(
            "INSERT INTO {} (version, document) VALUES (?1, ?2)",
            T::COLLECTION
        );

        let result = sqlx::query(&sql)
            .bind(document.version())
            .bind(body)
            .execute(&*self.db)
            .await?;

        let id = result.last_insert_rowid();
        document.set_id(id);
        Ok(id)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<T>, StoreError> {
        let sql = format!(
            "SELECT id, version, document FROM {} WHERE id = ?1",
            T::COLLECTION
        );

        let row = sqlx::query_as::<_, (i64, i64, String)>(&sql)
            .bind(id)
            .fetch_optional(&*self.db)
            .await?;

        row.map(decode).transpose()
    }

    pub async fn find_all(&self) -> Result<Vec<T>, StoreError> {
        let sql = format!(
            "SELECT id, version, document FROM {} ORDER BY id",
            T::COLLECTION
        );

        let rows = sqlx::query_as::<_, (i64, i64, String)>(&sql)
            .fetch_all(&*self.db)
            .await?;

        rows.into_iter().map(decode).collect()
    }

    /// Replace the whole document stored under `document.id()`, but only
    /// while the stored version still equals `expected_version`.
    ///
    /// Returns `false` when no row matched: either the id is gone or another
    /// writer got there first.
    pub async fn replace(&self, document: &T, expected_version: i64) -> Result<bool, StoreError> {
        let body = encode(document)?;
        let sql = format!(
            "UPDATE {} SET version = ?1, document = ?2 WHERE id = ?3 AND version = ?4",
            T::COLLECTION
        );

        let result = sqlx::query(&sql)
            .bind(document.version())
            .bind(body)
            .bind(document.id())
            .bind(expected_version)
            .execute(&*self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = ?1", T::COLLECTION);
        let result = sqlx::query(&sql).bind(id).execute(&*self.db).await?;
        Ok(result.rows_affected() > 0)
    }
}

fn encode<T: Document>(document: &T) -> Result<String, StoreError> {
    Ok(serde_json::to_string(&document.to_stored())?)
}

fn decode<T: Document>((id, version, body): (i64, i64, String)) -> Result<T, StoreError> {
    let stored: T::Stored = serde_json::from_str(&body)?;
    Ok(T::from_stored(id, version, stored))
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::database::BakeryItem;

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
    async fn test_insert_assigns_distinct_ids() {
        let db = Database::in_memory().await.unwrap();
        let items = db.bakery_items();

        let mut first = bagel();
        let mut second = bagel();
        let first_id = items.insert(&mut first).await.unwrap();
        let second_id = items.insert(&mut second).await.unwrap();

        assert!(first_id > 0);
        assert_ne!(first_id, second_id);
        assert_eq!(first.id, first_id);
        assert_eq!(second.id, second_id);
    }

    #[tokio::test]
    async fn test_find_by_id_and_all() {
        let db = Database::in_memory().await.unwrap();
        let items = db.bakery_items();

        let mut item = bagel();
        let id = items.insert(&mut item).await.unwrap();

        let found = items.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found, item);
        assert!(items.find_by_id(id + 100).await.unwrap().is_none());

        let all = items.find_all().await.unwrap();
        assert_eq!(all, vec![item]);
    }

    #[tokio::test]
    async fn test_replace_requires_matching_version() {
        let db = Database::in_memory().await.unwrap();
        let items = db.bakery_items();

        let mut item = bagel();
        items.insert(&mut item).await.unwrap();

        item.quantity_available = 8;
        item.version = 1;
        assert!(items.replace(&item, 0).await.unwrap());

        // The stored version is now 1, so a writer still expecting 0 misses.
        let mut stale = item.clone();
        stale.quantity_available = 3;
        stale.version = 1;
        assert!(!items.replace(&stale, 0).await.unwrap());

        let stored = items.find_by_id(item.id).await.unwrap().unwrap();
        assert_eq!(stored.quantity_available, 8);
        assert_eq!(stored.version, 1);
    }

    #[tokio::test]
    async fn test_delete_reports_presence() {
        let db = Database::in_memory().await.unwrap();
        let items = db.bakery_items();

        let mut item = bagel();
        let id = items.insert(&mut item).await.unwrap();

        assert!(items.delete(id).await.unwrap());
        assert!(!items.delete(id).await.unwrap());
        assert!(items.find_by_id(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_collections_are_independent() {
        let db = Database::in_memory().await.unwrap();

        let mut item = bagel();
        db.bakery_items().insert(&mut item).await.unwrap();

        assert!(db.orders().find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_document_column_keeps_exact_price() {
        let db = Database::in_memory().await.unwrap();
        let items = db.bakery_items();

        let mut item = bagel();
        item.price = "12345678901234.56789".parse().unwrap();
        let id = items.insert(&mut item).await.unwrap();

        let (body,): (String,) = sqlx::query_as("SELECT document FROM bakery_items WHERE id = ?1")
            .bind(id)
            .fetch_one(&*db)
            .await
            .unwrap();
        let stored: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(stored["price"], "12345678901234.56789");
        assert!(stored.get("id").is_none());
        assert!(stored.get("version").is_none());
    }
}
