//! Persisted record shapes.
//!
//! Records mirror the table layout one-to-one. Money is stored in cents.

use serde::{Deserialize, Serialize};

/// A row of the `customers` table. Address columns are all set or all null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub id: String,
    pub name: String,
    pub street: Option<String>,
    pub number: Option<i32>,
    pub zipcode: Option<String>,
    pub city: Option<String>,
    pub active: bool,
    pub reward_points: i64,
}

/// A row of the `products` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub price: i64,
}

/// A row of the `orders` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub id: String,
    pub customer_id: String,
    pub total: i64,
}

/// A row of the `order_items` table, foreign-keyed to its order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemRecord {
    pub id: String,
    pub name: String,
    pub price: i64,
    pub product_id: String,
    pub order_id: String,
    pub quantity: i32,
}

/// An order row together with its item rows, in insertion order.
///
/// Serializes flat: `{ id, customer_id, total, items: [...] }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSnapshot {
    #[serde(flatten)]
    pub order: OrderRecord,
    pub items: Vec<OrderItemRecord>,
}
