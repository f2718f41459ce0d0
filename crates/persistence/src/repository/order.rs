use async_trait::async_trait;
use domain::{
    Money, Order, OrderId, OrderItem, Repository, RepositoryError, RepositoryResult,
};

use crate::StoreError;
use crate::record::{OrderItemRecord, OrderRecord, OrderSnapshot};
use crate::store::RecordStore;

use super::{expect_one_row, invalid_record};

/// Order repository backed by a record store.
///
/// The stored `total` is always recomputed from the order's items; updates
/// replace the whole item set in one store call.
#[derive(Clone)]
pub struct PersistentOrderRepository<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> PersistentOrderRepository<S> {
    /// Creates a new order repository over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn to_records(order: &Order) -> RepositoryResult<(OrderRecord, Vec<OrderItemRecord>)> {
        let record = OrderRecord {
            id: order.id().to_string(),
            customer_id: order.customer_id().to_string(),
            total: order.total().cents(),
        };
        let items = order
            .items()
            .iter()
            .map(|item| -> RepositoryResult<OrderItemRecord> {
                let quantity = i32::try_from(item.quantity()).map_err(|_| {
                    StoreError::ValueOutOfRange {
                        table: "order_items",
                        column: "quantity",
                        key: item.id().to_string(),
                    }
                })?;
                Ok(OrderItemRecord {
                    id: item.id().to_string(),
                    name: item.name().to_string(),
                    price: item.price().cents(),
                    product_id: item.product_id().to_string(),
                    order_id: record.id.clone(),
                    quantity,
                })
            })
            .collect::<RepositoryResult<Vec<_>>>()?;
        Ok((record, items))
    }

    fn from_snapshot(snapshot: OrderSnapshot) -> RepositoryResult<Order> {
        let OrderSnapshot { order, items } = snapshot;

        let items = items
            .into_iter()
            .map(|item| {
                let quantity = u32::try_from(item.quantity)
                    .map_err(|_| invalid_record("OrderItem", &item.id, "negative quantity"))?;
                OrderItem::new(
                    item.id.as_str(),
                    item.name,
                    Money::from_cents(item.price),
                    item.product_id,
                    quantity,
                )
                .map_err(|e| invalid_record("OrderItem", &item.id, e))
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        Order::new(order.id.as_str(), order.customer_id, items)
            .map_err(|e| invalid_record("Order", &order.id, e))
    }
}

#[async_trait]
impl<S: RecordStore> Repository for PersistentOrderRepository<S> {
    type Entity = Order;
    type Id = OrderId;

    #[tracing::instrument(skip(self, entity), fields(order_id = %entity.id()))]
    async fn create(&self, entity: &Order) -> RepositoryResult<()> {
        let (record, items) = Self::to_records(entity)?;
        self.store.insert_order(record, items).await?;

        metrics::counter!("orders_created_total").increment(1);
        tracing::info!(total = %entity.total(), items = entity.item_count(), "order created");
        Ok(())
    }

    #[tracing::instrument(skip(self, entity), fields(order_id = %entity.id()))]
    async fn update(&self, entity: &Order) -> RepositoryResult<()> {
        let (record, items) = Self::to_records(entity)?;
        let rows = self.store.replace_order(record, items).await?;
        expect_one_row(rows, "orders", entity.id().as_str())?;

        metrics::counter!("orders_updated_total").increment(1);
        tracing::info!(total = %entity.total(), items = entity.item_count(), "order updated");
        Ok(())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &OrderId) -> RepositoryResult<Order> {
        let snapshot = self
            .store
            .find_order(id.as_str())
            .await?
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "Order",
                id: id.to_string(),
            })?;

        Self::from_snapshot(snapshot)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<Order>> {
        self.store
            .list_orders()
            .await?
            .into_iter()
            .map(Self::from_snapshot)
            .collect()
    }
}
