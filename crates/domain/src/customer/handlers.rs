//! Handlers reacting to customer events.

use crate::event::{DomainEvent, EventHandler, HandlerError, expect_event};

use super::{CustomerAddressChanged, CustomerCreated};

/// Logs every newly created customer.
#[derive(Debug, Default)]
pub struct LogCustomerCreatedHandler;

impl EventHandler for LogCustomerCreatedHandler {
    fn handle(&self, event: &dyn DomainEvent) -> Result<(), HandlerError> {
        let event = expect_event::<CustomerCreated>("LogCustomerCreatedHandler", event)?;
        tracing::info!(
            customer_id = %event.data.id,
            name = %event.data.name,
            occurred_at = %event.occurred_at,
            "customer created"
        );
        Ok(())
    }
}

/// Logs the new address whenever a customer moves.
#[derive(Debug, Default)]
pub struct LogAddressChangedHandler;

impl EventHandler for LogAddressChangedHandler {
    fn handle(&self, event: &dyn DomainEvent) -> Result<(), HandlerError> {
        let event = expect_event::<CustomerAddressChanged>("LogAddressChangedHandler", event)?;
        let data = &event.data;
        tracing::info!(
            customer_id = %data.id,
            name = %data.name,
            address = %data.address,
            "customer address changed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::customer::{Address, Customer};

    use super::*;

    #[test]
    fn test_address_handler_accepts_address_changed() {
        let mut customer = Customer::new("c1", "John").unwrap();
        let event = customer.change_address(Address::new("Street", 1, "Zip", "City").unwrap());

        assert!(LogAddressChangedHandler.handle(&event).is_ok());
    }

    #[test]
    fn test_handlers_reject_foreign_events() {
        let customer = Customer::new("c1", "John").unwrap();
        let created = customer.created_event();

        let result = LogAddressChangedHandler.handle(&created);
        assert!(matches!(
            result,
            Err(HandlerError::UnexpectedEvent {
                handler: "LogAddressChangedHandler",
                event_name: "CustomerCreated",
            })
        ));
        assert!(LogCustomerCreatedHandler.handle(&created).is_ok());
    }
}
