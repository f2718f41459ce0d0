//! Domain services spanning orders and customers.

use common::OrderId;

use crate::customer::Customer;
use crate::{Money, ValidationError};

use super::{Order, OrderItem};

/// Operations that involve more than one order or aggregate.
pub struct OrderService;

impl OrderService {
    /// Returns the sum of the totals of all `orders`.
    ///
    /// Fails with [`ValidationError::AmountOutOfRange`] if the sum overflows.
    pub fn total(orders: &[Order]) -> Result<Money, ValidationError> {
        Money::checked_sum(orders.iter().map(Order::total))
            .ok_or(ValidationError::AmountOutOfRange { entity: "Order" })
    }

    /// Places an order for `customer` and credits their reward points.
    ///
    /// The customer earns one point per two whole currency units of the
    /// order total. Nothing is credited if the order is invalid.
    pub fn place_order(
        customer: &mut Customer,
        order_id: impl Into<OrderId>,
        items: Vec<OrderItem>,
    ) -> Result<Order, ValidationError> {
        let order = Order::new(order_id, customer.id().clone(), items)?;
        let points = u64::try_from(order.total().dollars() / 2).unwrap_or(0);
        customer.add_reward_points(points);
        tracing::debug!(
            order_id = %order.id(),
            customer_id = %customer.id(),
            points,
            "order placed"
        );
        Ok(order)
    }
}
