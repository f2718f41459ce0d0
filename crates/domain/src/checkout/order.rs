//! Order aggregate implementation.

use std::collections::HashSet;

use common::{CustomerId, OrderId};
use serde::Serialize;

use crate::{Money, ValidationError};

use super::OrderItem;

/// Order aggregate root.
///
/// An order always references a customer and holds at least one item.
/// Mutations validate first and leave the order untouched on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Order {
    /// Unique order identifier.
    id: OrderId,

    /// Customer who placed the order.
    customer_id: CustomerId,

    /// Items in the order, in insertion order.
    items: Vec<OrderItem>,
}

impl Order {
    /// Creates a new order.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::IdRequired`] if `id` is blank
    /// - [`ValidationError::CustomerIdRequired`] if `customer_id` is blank
    /// - [`ValidationError::NoItems`] if `items` is empty
    /// - [`ValidationError::DuplicateItem`] if two items share an id
    /// - [`ValidationError::AmountOutOfRange`] if the order total overflows
    pub fn new(
        id: impl Into<OrderId>,
        customer_id: impl Into<CustomerId>,
        items: Vec<OrderItem>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        let customer_id = customer_id.into();

        if id.is_blank() {
            return Err(ValidationError::IdRequired { entity: "Order" });
        }
        validate_customer(&customer_id)?;
        validate_items(&items)?;

        Ok(Self {
            id,
            customer_id,
            items,
        })
    }
}

// Query methods
impl Order {
    pub fn id(&self) -> &OrderId {
        &self.id
    }

    /// Returns the customer ID.
    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    /// Returns all items in the order.
    pub fn items(&self) -> &[OrderItem] {
        &self.items
    }

    /// Returns the number of items.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all items.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(OrderItem::quantity).sum()
    }

    /// Returns the order total, recomputed from the current items.
    ///
    /// Construction and [`Order::change_items`] reject item sets whose total
    /// overflows, so the sum is exact.
    pub fn total(&self) -> Money {
        self.items.iter().map(OrderItem::total).sum()
    }
}

// Mutations
impl Order {
    /// Points the order at another customer.
    pub fn change_customer(
        &mut self,
        customer_id: impl Into<CustomerId>,
    ) -> Result<(), ValidationError> {
        let customer_id = customer_id.into();
        validate_customer(&customer_id)?;
        self.customer_id = customer_id;
        Ok(())
    }

    /// Replaces the entire item collection.
    ///
    /// Previous items are discarded, not merged.
    pub fn change_items(&mut self, items: Vec<OrderItem>) -> Result<(), ValidationError> {
        validate_items(&items)?;
        self.items = items;
        Ok(())
    }
}

fn validate_customer(customer_id: &CustomerId) -> Result<(), ValidationError> {
    if customer_id.is_blank() {
        return Err(ValidationError::CustomerIdRequired);
    }
    Ok(())
}

fn validate_items(items: &[OrderItem]) -> Result<(), ValidationError> {
    if items.is_empty() {
        return Err(ValidationError::NoItems);
    }

    let mut seen = HashSet::with_capacity(items.len());
    for item in items {
        if !seen.insert(item.id()) {
            return Err(ValidationError::DuplicateItem {
                item_id: item.id().to_string(),
            });
        }
    }

    if Money::checked_sum(items.iter().map(OrderItem::total)).is_none() {
        return Err(ValidationError::AmountOutOfRange { entity: "Order" });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price_dollars: i64, quantity: u32) -> OrderItem {
        OrderItem::new(
            id,
            format!("Item {id}"),
            Money::from_dollars(price_dollars),
            format!("prod-{id}"),
            quantity,
        )
        .unwrap()
    }

    #[test]
    fn test_creates_order_and_computes_total() {
        let order = Order::new("123", "cust-A", vec![item("i1", 10, 2)]).unwrap();

        assert_eq!(order.id().as_str(), "123");
        assert_eq!(order.customer_id().as_str(), "cust-A");
        assert_eq!(order.item_count(), 1);
        assert_eq!(order.total(), Money::from_dollars(20));
    }

    #[test]
    fn test_total_sums_every_item() {
        let order = Order::new(
            "o1",
            "c1",
            vec![item("i1", 100, 2), item("i2", 200, 2), item("i3", 5, 1)],
        )
        .unwrap();

        assert_eq!(order.total(), Money::from_dollars(605));
        assert_eq!(order.total_quantity(), 5);
    }

    #[test]
    fn test_rejects_blank_id() {
        let result = Order::new("", "c1", vec![item("i1", 1, 1)]);
        assert_eq!(result, Err(ValidationError::IdRequired { entity: "Order" }));
    }

    #[test]
    fn test_rejects_blank_customer_id() {
        let result = Order::new("o1", "", vec![item("i1", 1, 1)]);
        assert_eq!(result, Err(ValidationError::CustomerIdRequired));
    }

    #[test]
    fn test_rejects_empty_items() {
        let result = Order::new("o1", "c1", vec![]);
        assert_eq!(result, Err(ValidationError::NoItems));
    }

    #[test]
    fn test_rejects_duplicate_item_ids() {
        let result = Order::new("o1", "c1", vec![item("i1", 1, 1), item("i1", 2, 1)]);
        assert_eq!(
            result,
            Err(ValidationError::DuplicateItem {
                item_id: "i1".to_string()
            })
        );
    }

    #[test]
    fn test_rejects_overflowing_total() {
        let big = || Money::from_cents(i64::MAX / 2);
        let items = vec![
            OrderItem::new("i1", "Big", big(), "p1", 1).unwrap(),
            OrderItem::new("i2", "Big", big(), "p1", 1).unwrap(),
            OrderItem::new("i3", "Big", big(), "p1", 1).unwrap(),
        ];

        let result = Order::new("o1", "c1", items);

        assert_eq!(
            result,
            Err(ValidationError::AmountOutOfRange { entity: "Order" })
        );
    }

    #[test]
    fn test_change_items_rejects_overflowing_total() {
        let big = OrderItem::new("b1", "Big", Money::from_cents(i64::MAX / 2), "p1", 2).unwrap();
        let mut order = Order::new("o1", "c1", vec![big.clone()]).unwrap();
        assert_eq!(order.total().cents(), i64::MAX - 1);

        let result = order.change_items(vec![big, item("i2", 1, 1)]);

        assert_eq!(
            result,
            Err(ValidationError::AmountOutOfRange { entity: "Order" })
        );
        assert_eq!(order.item_count(), 1);
        assert_eq!(order.total().cents(), i64::MAX - 1);
    }

    #[test]
    fn test_change_customer_replaces_reference() {
        let mut order = Order::new("o1", "c1", vec![item("i1", 1, 1)]).unwrap();

        order.change_customer("c2").unwrap();
        assert_eq!(order.customer_id().as_str(), "c2");

        assert_eq!(
            order.change_customer(" "),
            Err(ValidationError::CustomerIdRequired)
        );
        assert_eq!(order.customer_id().as_str(), "c2");
    }

    #[test]
    fn test_change_items_replaces_whole_collection() {
        let mut order = Order::new("o1", "c1", vec![item("i1", 10, 1), item("i2", 10, 1)]).unwrap();

        order.change_items(vec![item("i3", 7, 3)]).unwrap();

        let ids: Vec<_> = order.items().iter().map(|i| i.id().as_str()).collect();
        assert_eq!(ids, vec!["i3"]);
        assert_eq!(order.total(), Money::from_dollars(21));
    }

    #[test]
    fn test_change_items_to_empty_leaves_prior_items() {
        let mut order = Order::new("o1", "c1", vec![item("i1", 10, 2)]).unwrap();
        let before = order.clone();

        assert_eq!(order.change_items(vec![]), Err(ValidationError::NoItems));
        assert_eq!(order, before);
        assert_eq!(order.total(), Money::from_dollars(20));
    }
}
