use async_trait::async_trait;

use crate::Result;
use crate::record::{CustomerRecord, OrderItemRecord, OrderRecord, OrderSnapshot, ProductRecord};

/// Core trait for record store implementations.
///
/// A record store is the mapping layer underneath the repositories: it
/// persists and retrieves table rows and enforces key constraints. Each
/// method is atomic; a failed call leaves storage unchanged.
/// All implementations must be thread-safe (Send + Sync).
///
/// Constraints every implementation enforces:
/// - primary keys (`id`) are unique per table
/// - `orders.customer_id` references `customers.id`
/// - `order_items.product_id` references `products.id`
/// - `order_items.order_id` references `orders.id`
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Inserts a customer row.
    async fn insert_customer(&self, record: CustomerRecord) -> Result<()>;

    /// Overwrites the customer row with the same id.
    ///
    /// Returns the number of rows affected (0 if the id is unknown).
    async fn update_customer(&self, record: CustomerRecord) -> Result<u64>;

    /// Retrieves a customer row by id.
    async fn find_customer(&self, id: &str) -> Result<Option<CustomerRecord>>;

    /// Retrieves all customer rows in insertion order.
    async fn list_customers(&self) -> Result<Vec<CustomerRecord>>;

    /// Inserts a product row.
    async fn insert_product(&self, record: ProductRecord) -> Result<()>;

    /// Overwrites the product row with the same id.
    ///
    /// Returns the number of rows affected (0 if the id is unknown).
    async fn update_product(&self, record: ProductRecord) -> Result<u64>;

    /// Retrieves a product row by id.
    async fn find_product(&self, id: &str) -> Result<Option<ProductRecord>>;

    /// Retrieves all product rows in insertion order.
    async fn list_products(&self) -> Result<Vec<ProductRecord>>;

    /// Inserts an order row and all of its item rows in one unit.
    async fn insert_order(&self, order: OrderRecord, items: Vec<OrderItemRecord>) -> Result<()>;

    /// Replaces an order in one unit: updates the order row, deletes every
    /// item row of the order, and inserts `items`.
    ///
    /// Returns the number of order rows affected. When it is 0 nothing was
    /// changed.
    async fn replace_order(&self, order: OrderRecord, items: Vec<OrderItemRecord>)
    -> Result<u64>;

    /// Retrieves an order row with its items.
    async fn find_order(&self, id: &str) -> Result<Option<OrderSnapshot>>;

    /// Retrieves all orders with their items, in insertion order.
    async fn list_orders(&self) -> Result<Vec<OrderSnapshot>>;

    /// Retrieves a single item row by id.
    async fn find_order_item(&self, id: &str) -> Result<Option<OrderItemRecord>>;
}
