use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::database::Document;

/// A product on the shelf.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BakeryItem {
    /// Assigned by the store on creation
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(default)]
    pub quantity_available: i32,
    /// Optimistic concurrency stamp, bumped on every successful update
    #[serde(default)]
    pub version: i64,
}

/// Stored form of a [`BakeryItem`]. The price is kept as a decimal string so
/// it reads back exactly; the HTTP body carries it as a JSON number.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredBakeryItem {
    name: String,
    #[serde(with = "rust_decimal::serde::str")]
    price: Decimal,
    quantity_available: i32,
}

impl Document for BakeryItem {
    const COLLECTION: &'static str = "bakery_items";
    const KIND: &'static str = "bakery item";

    type Stored = StoredBakeryItem;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }

    fn to_stored(&self) -> StoredBakeryItem {
        StoredBakeryItem {
            name: self.name.clone(),
            price: self.price,
            quantity_available: self.quantity_available,
        }
    }

    fn from_stored(id: i64, version: i64, stored: StoredBakeryItem) -> Self {
        Self {
            id,
            name: stored.name,
            price: stored.price,
            quantity_available: stored.quantity_available,
            version,
        }
    }
}
