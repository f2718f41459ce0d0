//! Customer aggregate.

use common::CustomerId;
use serde::Serialize;

use crate::ValidationError;

use super::{Address, CustomerAddressChanged, CustomerCreated};

/// Customer aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    id: CustomerId,
    name: String,
    address: Option<Address>,
    active: bool,
    reward_points: u64,
}

impl Customer {
    /// Creates a new, inactive customer without an address.
    pub fn new(id: impl Into<CustomerId>, name: impl Into<String>) -> Result<Self, ValidationError> {
        let customer = Self {
            id: id.into(),
            name: name.into(),
            address: None,
            active: false,
            reward_points: 0,
        };
        customer.validate()?;
        Ok(customer)
    }

    /// Rebuilds a customer from persisted state.
    pub fn restore(
        id: impl Into<CustomerId>,
        name: impl Into<String>,
        address: Option<Address>,
        active: bool,
        reward_points: u64,
    ) -> Result<Self, ValidationError> {
        let customer = Self {
            id: id.into(),
            name: name.into(),
            address,
            active,
            reward_points,
        };
        customer.validate()?;
        if customer.active && customer.address.is_none() {
            return Err(ValidationError::AddressRequired);
        }
        Ok(customer)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_blank() {
            return Err(ValidationError::IdRequired { entity: "Customer" });
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::NameRequired { entity: "Customer" });
        }
        Ok(())
    }

    pub fn id(&self) -> &CustomerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn reward_points(&self) -> u64 {
        self.reward_points
    }

    /// Returns the event announcing this customer's creation.
    pub fn created_event(&self) -> CustomerCreated {
        CustomerCreated::new(self)
    }

    /// Renames the customer.
    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::NameRequired { entity: "Customer" });
        }
        self.name = name;
        Ok(())
    }

    /// Moves the customer to a new address.
    ///
    /// Returns the raised event; dispatching it is up to the caller.
    pub fn change_address(&mut self, address: Address) -> CustomerAddressChanged {
        self.address = Some(address.clone());
        CustomerAddressChanged::new(self.id.clone(), self.name.clone(), address)
    }

    /// Activates the customer. An address is required.
    pub fn activate(&mut self) -> Result<(), ValidationError> {
        if self.address.is_none() {
            return Err(ValidationError::AddressRequired);
        }
        self.active = true;
        Ok(())
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Credits reward points, saturating at `u64::MAX`.
    pub fn add_reward_points(&mut self, points: u64) {
        self.reward_points = self.reward_points.saturating_add(points);
    }
}

#[cfg(test)]
mod tests {
    use crate::DomainEvent;

    use super::*;

    fn address() -> Address {
        Address::new("Street 1", 1, "Zipcode 1", "City 1").unwrap()
    }

    #[test]
    fn test_new_customer_is_inactive_without_address() {
        let customer = Customer::new("c1", "Customer 1").unwrap();
        assert_eq!(customer.id().as_str(), "c1");
        assert_eq!(customer.name(), "Customer 1");
        assert!(customer.address().is_none());
        assert!(!customer.is_active());
        assert_eq!(customer.reward_points(), 0);
    }

    #[test]
    fn test_rejects_blank_id_and_name() {
        assert_eq!(
            Customer::new("", "John"),
            Err(ValidationError::IdRequired { entity: "Customer" })
        );
        assert_eq!(
            Customer::new("c1", "  "),
            Err(ValidationError::NameRequired { entity: "Customer" })
        );
    }

    #[test]
    fn test_change_name_validates_before_mutating() {
        let mut customer = Customer::new("c1", "John").unwrap();
        assert!(customer.change_name("").is_err());
        assert_eq!(customer.name(), "John");

        customer.change_name("Jane").unwrap();
        assert_eq!(customer.name(), "Jane");
    }

    #[test]
    fn test_activate_requires_address() {
        let mut customer = Customer::new("c1", "John").unwrap();
        assert_eq!(customer.activate(), Err(ValidationError::AddressRequired));
        assert!(!customer.is_active());

        customer.change_address(address());
        customer.activate().unwrap();
        assert!(customer.is_active());

        customer.deactivate();
        assert!(!customer.is_active());
    }

    #[test]
    fn test_change_address_raises_event_with_snapshot() {
        let mut customer = Customer::new("c1", "John").unwrap();
        let event = customer.change_address(address());

        assert_eq!(customer.address(), Some(&address()));
        assert_eq!(event.event_name(), CustomerAddressChanged::NAME);
        assert_eq!(event.data.id.as_str(), "c1");
        assert_eq!(event.data.name, "John");
        assert_eq!(event.data.address, address());
    }

    #[test]
    fn test_reward_points_accumulate() {
        let mut customer = Customer::new("c1", "John").unwrap();
        customer.add_reward_points(10);
        customer.add_reward_points(5);
        assert_eq!(customer.reward_points(), 15);

        customer.add_reward_points(u64::MAX);
        assert_eq!(customer.reward_points(), u64::MAX);
    }

    #[test]
    fn test_restore_rejects_active_customer_without_address() {
        let result = Customer::restore("c1", "John", None, true, 0);
        assert_eq!(result, Err(ValidationError::AddressRequired));

        let customer = Customer::restore("c1", "John", Some(address()), true, 7).unwrap();
        assert!(customer.is_active());
        assert_eq!(customer.reward_points(), 7);
    }
}
