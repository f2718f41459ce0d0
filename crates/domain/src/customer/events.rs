//! Events raised by the customer aggregate.

use std::any::Any;

use chrono::{DateTime, Utc};
use common::CustomerId;
use serde::{Deserialize, Serialize};

use crate::DomainEvent;

use super::{Address, Customer};

/// Data for the CustomerCreated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerCreatedData {
    pub id: CustomerId,
    pub name: String,
}

/// A customer was registered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreated {
    pub occurred_at: DateTime<Utc>,
    pub data: CustomerCreatedData,
}

impl CustomerCreated {
    pub const NAME: &'static str = "CustomerCreated";

    pub fn new(customer: &Customer) -> Self {
        Self {
            occurred_at: Utc::now(),
            data: CustomerCreatedData {
                id: customer.id().clone(),
                name: customer.name().to_string(),
            },
        }
    }
}

impl DomainEvent for CustomerCreated {
    fn event_name(&self) -> &'static str {
        Self::NAME
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Data for the CustomerAddressChanged event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerAddressChangedData {
    pub id: CustomerId,
    pub name: String,
    pub address: Address,
}

/// A customer moved to a new address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerAddressChanged {
    pub occurred_at: DateTime<Utc>,
    pub data: CustomerAddressChangedData,
}

impl CustomerAddressChanged {
    pub const NAME: &'static str = "CustomerAddressChanged";

    pub fn new(id: CustomerId, name: String, address: Address) -> Self {
        Self {
            occurred_at: Utc::now(),
            data: CustomerAddressChangedData { id, name, address },
        }
    }
}

impl DomainEvent for CustomerAddressChanged {
    fn event_name(&self) -> &'static str {
        Self::NAME
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
