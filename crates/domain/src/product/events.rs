use std::any::Any;

use chrono::{DateTime, Utc};
use common::ProductId;
use serde::{Deserialize, Serialize};

use crate::{DomainEvent, Money};

use super::Product;

/// Data for the ProductCreated event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCreatedData {
    pub id: ProductId,
    pub name: String,
    pub price: Money,
}

/// A product was added to the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreated {
    pub occurred_at: DateTime<Utc>,
    pub data: ProductCreatedData,
}

impl ProductCreated {
    pub const NAME: &'static str = "ProductCreated";

    pub fn new(product: &Product) -> Self {
        Self {
            occurred_at: Utc::now(),
            data: ProductCreatedData {
                id: product.id().clone(),
                name: product.name().to_string(),
                price: product.price(),
            },
        }
    }
}

impl DomainEvent for ProductCreated {
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
