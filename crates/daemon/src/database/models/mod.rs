mod bakery_item;
mod order;

pub use bakery_item::{BakeryItem, StoredBakeryItem};
pub use order::{Order, StoredOrder};
