use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::database::Document;

/// A customer order for some quantity of a bakery item.
///
/// `bakery_item_id` is a loose reference: nothing checks that the item
/// exists, and deleting the item leaves its orders in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub bakery_item_id: i64,
    #[serde(default)]
    pub quantity: i32,
    #[serde(default = "OffsetDateTime::now_utc", with = "time::serde::rfc3339")]
    pub order_date: OffsetDateTime,
    #[serde(default)]
    pub customer_name: String,
    #[serde(default)]
    pub version: i64,
}

/// Stored form of an [`Order`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredOrder {
    bakery_item_id: i64,
    quantity: i32,
    #[serde(with = "time::serde::rfc3339")]
    order_date: OffsetDateTime,
    customer_name: String,
}

impl Document for Order {
    const COLLECTION: &'static str = "orders";
    const KIND: &'static str = "order";

    type Stored = StoredOrder;

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

    fn to_stored(&self) -> StoredOrder {
        StoredOrder {
            bakery_item_id: self.bakery_item_id,
            quantity: self.quantity,
            order_date: self.order_date,
            customer_name: self.customer_name.clone(),
        }
    }

    fn from_stored(id: i64, version: i64, stored: StoredOrder) -> Self {
        Self {
            id,
            bakery_item_id: stored.bakery_item_id,
            quantity: stored.quantity,
            order_date: stored.order_date,
            customer_name: stored.customer_name,
            version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_date_is_rfc3339() {
        let order = Order {
            id: 1,
            bakery_item_id: 3,
            quantity: 2,
            order_date: OffsetDateTime::from_unix_timestamp(1_700_000_000).unwrap(),
            customer_name: "A".to_string(),
            version: 0,
        };

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(value["orderDate"], "2023-11-14T22:13:20Z");
        assert_eq!(value["bakeryItemId"], 3);
        assert_eq!(value["customerName"], "A");

        let parsed: Order = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, order);
    }

    #[test]
    fn test_order_date_defaults_to_now() {
        let before = OffsetDateTime::now_utc();
        let parsed: Order =
            serde_json::from_str(r#"{"bakeryItemId":1,"quantity":2,"customerName":"B"}"#)
                .unwrap();
        assert!(parsed.order_date >= before);
    }
}
