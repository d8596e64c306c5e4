pub mod collection;
pub mod models;
mod sqlite;

use std::ops::Deref;
use std::path::Path;

use sqlx::SqlitePool;

pub use collection::{Collection, Document, StoreError};
pub use models::{BakeryItem, Order};

/// Handle to the embedded document store.
///
/// Wraps a SQLite pool; clones share the same pool, so a single instance
/// created at start-up serves every in-flight request.
#[derive(Clone, Debug)]
pub struct Database(SqlitePool);

impl Database {
    /// Open (or create) a store file at `path` and apply the collection schema.
    pub async fn open(path: &Path) -> Result<Self, DatabaseSetupError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let db = sqlite::connect_file(path).await?;
        sqlite::migrate_sqlite(&db).await?;
        Ok(Database::new(db))
    }

    /// Create a store that lives only as long as this process.
    pub async fn in_memory() -> Result<Self, DatabaseSetupError> {
        let db = sqlite::connect_memory().await?;
        sqlite::migrate_sqlite(&db).await?;
        Ok(Database::new(db))
    }

    pub fn new(pool: SqlitePool) -> Self {
        Self(pool)
    }

    /// The bakery item collection.
    pub fn bakery_items(&self) -> Collection<BakeryItem> {
        Collection::new(self.clone())
    }

    /// The order collection.
    pub fn orders(&self) -> Collection<Order> {
        Collection::new(self.clone())
    }

    /// Round-trip a trivial query to confirm the store is usable.
    pub async fn ping(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.0).await?;
        Ok(())
    }
}

impl Deref for Database {
    type Target = SqlitePool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DatabaseSetupError {
    #[error("error occurred while attempting database migration: {0}")]
    MigrationFailed(sqlx::migrate::MigrateError),

    #[error("unable to perform initial connection and check of the database: {0}")]
    Unavailable(sqlx::Error),

    #[error("unable to prepare the database directory: {0}")]
    Io(#[from] std::io::Error),
}
