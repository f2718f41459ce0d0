use common::{OrderItemId, ProductId};
use serde::Serialize;

use crate::{Money, ValidationError};

/// A line in an order.
///
/// Owned by exactly one [`Order`](super::Order); its identity and product
/// link never change after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderItem {
    id: OrderItemId,
    name: String,
    price: Money,
    product_id: ProductId,
    quantity: u32,
}

impl OrderItem {
    /// Creates a validated order item.
    ///
    /// Fails if the line total `price * quantity` overflows.
    pub fn new(
        id: impl Into<OrderItemId>,
        name: impl Into<String>,
        price: Money,
        product_id: impl Into<ProductId>,
        quantity: u32,
    ) -> Result<Self, ValidationError> {
        let item = Self {
            id: id.into(),
            name: name.into(),
            price,
            product_id: product_id.into(),
            quantity,
        };

        if item.id.is_blank() {
            return Err(ValidationError::IdRequired { entity: "OrderItem" });
        }
        if item.name.trim().is_empty() {
            return Err(ValidationError::NameRequired { entity: "OrderItem" });
        }
        if !item.price.is_positive() {
            return Err(ValidationError::InvalidPrice {
                price: item.price.cents(),
            });
        }
        if item.product_id.is_blank() {
            return Err(ValidationError::ProductIdRequired);
        }
        if item.quantity == 0 {
            return Err(ValidationError::InvalidQuantity {
                quantity: item.quantity,
            });
        }
        if item.price.checked_multiply(item.quantity).is_none() {
            return Err(ValidationError::AmountOutOfRange { entity: "OrderItem" });
        }

        Ok(item)
    }

    pub fn id(&self) -> &OrderItemId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Price per unit.
    pub fn price(&self) -> Money {
        self.price
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Returns the total price for this item (price * quantity).
    ///
    /// Exact for every item built through [`OrderItem::new`].
    pub fn total(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}
