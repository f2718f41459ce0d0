use crate::event::{DomainEvent, EventHandler, HandlerError, expect_event};

use super::ProductCreated;

/// Announces new products to the catalog team.
///
/// Delivery is a log line; swap the handler to wire a real notifier.
#[derive(Debug, Default)]
pub struct NotifyProductCreatedHandler;

impl EventHandler for NotifyProductCreatedHandler {
    fn handle(&self, event: &dyn DomainEvent) -> Result<(), HandlerError> {
        let event = expect_event::<ProductCreated>("NotifyProductCreatedHandler", event)?;
        tracing::info!(
            product_id = %event.data.id,
            name = %event.data.name,
            price = %event.data.price,
            "product created notification sent"
        );
        Ok(())
    }
}
