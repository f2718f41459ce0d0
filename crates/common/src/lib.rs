//! Identifier types shared by the domain and persistence layers.

pub mod types;

pub use types::{CustomerId, OrderId, OrderItemId, ProductId};
