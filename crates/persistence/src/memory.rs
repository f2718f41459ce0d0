use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::record::{CustomerRecord, OrderItemRecord, OrderRecord, OrderSnapshot, ProductRecord};
use crate::store::RecordStore;
use crate::{Result, StoreError};

#[derive(Debug, Default)]
struct Tables {
    customers: Vec<CustomerRecord>,
    products: Vec<ProductRecord>,
    orders: Vec<OrderRecord>,
    order_items: Vec<OrderItemRecord>,
}

impl Tables {
    fn customer_exists(&self, id: &str) -> bool {
        self.customers.iter().any(|c| c.id == id)
    }

    fn product_exists(&self, id: &str) -> bool {
        self.products.iter().any(|p| p.id == id)
    }

    /// Checks the constraints of `items` about to be stored for `order_id`.
    ///
    /// Existing item rows of `order_id` are ignored when `replacing` is set,
    /// since they are deleted in the same unit.
    fn check_items(&self, order_id: &str, items: &[OrderItemRecord], replacing: bool) -> Result<()> {
        let mut batch = HashSet::with_capacity(items.len());

        for item in items {
            check_positive("order_items", "price", &item.id, item.price)?;
            check_positive("order_items", "quantity", &item.id, i64::from(item.quantity))?;
            if item.order_id != order_id {
                return Err(StoreError::ForeignKeyViolation {
                    table: "order_items",
                    detail: format!("item {} belongs to order {}", item.id, item.order_id),
                });
            }
            if !self.product_exists(&item.product_id) {
                return Err(StoreError::ForeignKeyViolation {
                    table: "order_items",
                    detail: format!("product {} does not exist", item.product_id),
                });
            }

            let taken = self
                .order_items
                .iter()
                .any(|existing| existing.id == item.id && !(replacing && existing.order_id == order_id));
            if taken || !batch.insert(item.id.as_str()) {
                return Err(StoreError::UniqueViolation {
                    table: "order_items",
                    key: item.id.clone(),
                });
            }
        }

        Ok(())
    }

    fn snapshot(&self, order: &OrderRecord) -> OrderSnapshot {
        OrderSnapshot {
            order: order.clone(),
            items: self
                .order_items
                .iter()
                .filter(|i| i.order_id == order.id)
                .cloned()
                .collect(),
        }
    }
}

/// Mirrors the schema's `CHECK (column > 0)` constraints.
fn check_positive(table: &'static str, column: &str, key: &str, value: i64) -> Result<()> {
    if value <= 0 {
        return Err(StoreError::CheckViolation {
            table,
            detail: format!("{column} of {key} must be greater than 0, got {value}"),
        });
    }
    Ok(())
}

/// In-memory record store implementation for testing.
///
/// This implementation keeps every table in memory and enforces the same
/// constraints as the PostgreSQL schema: primary keys, foreign keys and the
/// positive `price` and `quantity` checks. Each call holds the
/// write lock for its whole duration and validates before mutating, so every
/// call is atomic.
#[derive(Clone, Default)]
pub struct InMemoryRecordStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryRecordStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of order item rows stored.
    pub async fn order_item_count(&self) -> usize {
        self.tables.read().await.order_items.len()
    }

    /// Clears all tables.
    pub async fn clear(&self) {
        *self.tables.write().await = Tables::default();
    }
}

#[async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn insert_customer(&self, record: CustomerRecord) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.customer_exists(&record.id) {
            return Err(StoreError::UniqueViolation {
                table: "customers",
                key: record.id,
            });
        }
        tables.customers.push(record);
        Ok(())
    }

    async fn update_customer(&self, record: CustomerRecord) -> Result<u64> {
        let mut tables = self.tables.write().await;
        match tables.customers.iter_mut().find(|c| c.id == record.id) {
            Some(existing) => {
                *existing = record;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_customer(&self, id: &str) -> Result<Option<CustomerRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn list_customers(&self) -> Result<Vec<CustomerRecord>> {
        Ok(self.tables.read().await.customers.clone())
    }

    async fn insert_product(&self, record: ProductRecord) -> Result<()> {
        check_positive("products", "price", &record.id, record.price)?;
        let mut tables = self.tables.write().await;
        if tables.product_exists(&record.id) {
            return Err(StoreError::UniqueViolation {
                table: "products",
                key: record.id,
            });
        }
        tables.products.push(record);
        Ok(())
    }

    async fn update_product(&self, record: ProductRecord) -> Result<u64> {
        check_positive("products", "price", &record.id, record.price)?;
        let mut tables = self.tables.write().await;
        match tables.products.iter_mut().find(|p| p.id == record.id) {
            Some(existing) => {
                *existing = record;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn find_product(&self, id: &str) -> Result<Option<ProductRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.products.iter().find(|p| p.id == id).cloned())
    }

    async fn list_products(&self) -> Result<Vec<ProductRecord>> {
        Ok(self.tables.read().await.products.clone())
    }

    async fn insert_order(&self, order: OrderRecord, items: Vec<OrderItemRecord>) -> Result<()> {
        let mut tables = self.tables.write().await;

        if tables.orders.iter().any(|o| o.id == order.id) {
            return Err(StoreError::UniqueViolation {
                table: "orders",
                key: order.id,
            });
        }
        if !tables.customer_exists(&order.customer_id) {
            return Err(StoreError::ForeignKeyViolation {
                table: "orders",
                detail: format!("customer {} does not exist", order.customer_id),
            });
        }
        tables.check_items(&order.id, &items, false)?;

        tracing::debug!(order_id = %order.id, items = items.len(), "inserting order");
        tables.orders.push(order);
        tables.order_items.extend(items);
        Ok(())
    }

    async fn replace_order(
        &self,
        order: OrderRecord,
        items: Vec<OrderItemRecord>,
    ) -> Result<u64> {
        let mut tables = self.tables.write().await;

        let Some(pos) = tables.orders.iter().position(|o| o.id == order.id) else {
            return Ok(0);
        };
        if !tables.customer_exists(&order.customer_id) {
            return Err(StoreError::ForeignKeyViolation {
                table: "orders",
                detail: format!("customer {} does not exist", order.customer_id),
            });
        }
        tables.check_items(&order.id, &items, true)?;

        tracing::debug!(order_id = %order.id, items = items.len(), "replacing order");
        tables.order_items.retain(|i| i.order_id != order.id);
        tables.order_items.extend(items);
        tables.orders[pos] = order;
        Ok(1)
    }

    async fn find_order(&self, id: &str) -> Result<Option<OrderSnapshot>> {
        let tables = self.tables.read().await;
        Ok(tables
            .orders
            .iter()
            .find(|o| o.id == id)
            .map(|o| tables.snapshot(o)))
    }

    async fn list_orders(&self) -> Result<Vec<OrderSnapshot>> {
        let tables = self.tables.read().await;
        Ok(tables.orders.iter().map(|o| tables.snapshot(o)).collect())
    }

    async fn find_order_item(&self, id: &str) -> Result<Option<OrderItemRecord>> {
        let tables = self.tables.read().await;
        Ok(tables.order_items.iter().find(|i| i.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn customer(id: &str) -> CustomerRecord {
        CustomerRecord {
            id: id.to_string(),
            name: format!("Customer {id}"),
            street: None,
            number: None,
            zipcode: None,
            city: None,
            active: false,
            reward_points: 0,
        }
    }

    fn product(id: &str, price: i64) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            name: format!("Product {id}"),
            price,
        }
    }

    fn order(id: &str, customer_id: &str, total: i64) -> OrderRecord {
        OrderRecord {
            id: id.to_string(),
            customer_id: customer_id.to_string(),
            total,
        }
    }

    fn item(id: &str, order_id: &str, product_id: &str) -> OrderItemRecord {
        OrderItemRecord {
            id: id.to_string(),
            name: "Widget".to_string(),
            price: 1000,
            product_id: product_id.to_string(),
            order_id: order_id.to_string(),
            quantity: 2,
        }
    }

    async fn seeded_store() -> InMemoryRecordStore {
        let store = InMemoryRecordStore::new();
        store.insert_customer(customer("c1")).await.unwrap();
        store.insert_customer(customer("c2")).await.unwrap();
        store.insert_product(product("p1", 1000)).await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_insert_and_find_order_with_items() {
        let store = seeded_store().await;
        store
            .insert_order(order("o1", "c1", 2000), vec![item("i1", "o1", "p1")])
            .await
            .unwrap();

        let snapshot = store.find_order("o1").await.unwrap().unwrap();
        assert_eq!(snapshot.order, order("o1", "c1", 2000));
        assert_eq!(snapshot.items, vec![item("i1", "o1", "p1")]);
    }

    #[tokio::test]
    async fn test_duplicate_order_id_is_rejected() {
        let store = seeded_store().await;
        store
            .insert_order(order("o1", "c1", 2000), vec![item("i1", "o1", "p1")])
            .await
            .unwrap();

        let result = store
            .insert_order(order("o1", "c2", 2000), vec![item("i2", "o1", "p1")])
            .await;

        assert!(matches!(
            result,
            Err(StoreError::UniqueViolation { table: "orders", .. })
        ));
        assert_eq!(store.order_item_count().await, 1);
    }

    #[tokio::test]
    async fn test_foreign_keys_are_enforced() {
        let store = seeded_store().await;

        let missing_customer = store
            .insert_order(order("o1", "nobody", 2000), vec![item("i1", "o1", "p1")])
            .await;
        assert!(matches!(
            missing_customer,
            Err(StoreError::ForeignKeyViolation { table: "orders", .. })
        ));

        let missing_product = store
            .insert_order(order("o1", "c1", 2000), vec![item("i1", "o1", "nothing")])
            .await;
        assert!(matches!(
            missing_product,
            Err(StoreError::ForeignKeyViolation {
                table: "order_items",
                ..
            })
        ));

        assert!(store.find_order("o1").await.unwrap().is_none());
        assert_eq!(store.order_item_count().await, 0);
    }

    #[tokio::test]
    async fn test_column_checks_are_enforced() {
        let store = seeded_store().await;

        let free_product = store.insert_product(product("p2", 0)).await;
        assert!(matches!(
            free_product,
            Err(StoreError::CheckViolation { table: "products", .. })
        ));
        assert!(matches!(
            store.update_product(product("p1", -5)).await,
            Err(StoreError::CheckViolation { table: "products", .. })
        ));

        let mut zero_quantity = item("i1", "o1", "p1");
        zero_quantity.quantity = 0;
        let result = store
            .insert_order(order("o1", "c1", 0), vec![zero_quantity])
            .await;
        assert!(matches!(
            result,
            Err(StoreError::CheckViolation {
                table: "order_items",
                ..
            })
        ));

        let mut free_item = item("i1", "o1", "p1");
        free_item.price = 0;
        let result = store
            .insert_order(order("o1", "c1", 0), vec![free_item])
            .await;
        assert!(matches!(
            result,
            Err(StoreError::CheckViolation {
                table: "order_items",
                ..
            })
        ));

        assert!(store.find_order("o1").await.unwrap().is_none());
        assert!(store.find_product("p2").await.unwrap().is_none());
        assert_eq!(store.find_product("p1").await.unwrap().unwrap().price, 1000);
    }

    #[tokio::test]
    async fn test_item_ids_are_unique_across_orders() {
        let store = seeded_store().await;
        store
            .insert_order(order("o1", "c1", 2000), vec![item("i1", "o1", "p1")])
            .await
            .unwrap();

        let result = store
            .insert_order(order("o2", "c1", 2000), vec![item("i1", "o2", "p1")])
            .await;

        assert!(matches!(
            result,
            Err(StoreError::UniqueViolation {
                table: "order_items",
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_replace_order_swaps_items() {
        let store = seeded_store().await;
        store
            .insert_order(order("o1", "c1", 2000), vec![item("i1", "o1", "p1")])
            .await
            .unwrap();

        let affected = store
            .replace_order(
                order("o1", "c2", 4000),
                vec![item("i2", "o1", "p1"), item("i3", "o1", "p1")],
            )
            .await
            .unwrap();

        assert_eq!(affected, 1);
        let snapshot = store.find_order("o1").await.unwrap().unwrap();
        assert_eq!(snapshot.order.customer_id, "c2");
        assert_eq!(snapshot.items.len(), 2);
        assert!(store.find_order_item("i1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_replace_order_may_reuse_its_own_item_ids() {
        let store = seeded_store().await;
        store
            .insert_order(order("o1", "c1", 2000), vec![item("i1", "o1", "p1")])
            .await
            .unwrap();

        let affected = store
            .replace_order(order("o1", "c1", 2000), vec![item("i1", "o1", "p1")])
            .await
            .unwrap();

        assert_eq!(affected, 1);
        assert_eq!(store.order_item_count().await, 1);
    }

    #[tokio::test]
    async fn test_failed_replace_leaves_previous_items() {
        let store = seeded_store().await;
        store
            .insert_order(order("o1", "c1", 2000), vec![item("i1", "o1", "p1")])
            .await
            .unwrap();

        let result = store
            .replace_order(
                order("o1", "c2", 2000),
                vec![item("i2", "o1", "p1"), item("i3", "o1", "missing")],
            )
            .await;

        assert!(result.is_err());
        let snapshot = store.find_order("o1").await.unwrap().unwrap();
        assert_eq!(snapshot.order.customer_id, "c1");
        assert_eq!(snapshot.items, vec![item("i1", "o1", "p1")]);
    }

    #[tokio::test]
    async fn test_replace_unknown_order_affects_nothing() {
        let store = seeded_store().await;

        let affected = store
            .replace_order(order("ghost", "c1", 2000), vec![item("i1", "ghost", "p1")])
            .await
            .unwrap();

        assert_eq!(affected, 0);
        assert_eq!(store.order_item_count().await, 0);
    }

    #[tokio::test]
    async fn test_update_customer_reports_rows_affected() {
        let store = seeded_store().await;

        let mut renamed = customer("c1");
        renamed.name = "Renamed".to_string();
        assert_eq!(store.update_customer(renamed).await.unwrap(), 1);
        assert_eq!(store.update_customer(customer("ghost")).await.unwrap(), 0);

        let found = store.find_customer("c1").await.unwrap().unwrap();
        assert_eq!(found.name, "Renamed");
    }

    #[tokio::test]
    async fn test_list_preserves_insertion_order() {
        let store = seeded_store().await;
        store
            .insert_order(order("b", "c1", 2000), vec![item("i1", "b", "p1")])
            .await
            .unwrap();
        store
            .insert_order(order("a", "c1", 2000), vec![item("i2", "a", "p1")])
            .await
            .unwrap();

        let ids: Vec<_> = store
            .list_orders()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.order.id)
            .collect();
        assert_eq!(ids, vec!["b", "a"]);

        store.clear().await;
        assert!(store.list_orders().await.unwrap().is_empty());
        assert!(store.list_customers().await.unwrap().is_empty());
    }
}
