//! Product aggregate.

use common::ProductId;
use serde::Serialize;

use crate::{Money, ValidationError};

use super::ProductCreated;

/// A product that can be ordered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    id: ProductId,
    name: String,
    price: Money,
}

impl Product {
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: Money,
    ) -> Result<Self, ValidationError> {
        let product = Self {
            id: id.into(),
            name: name.into(),
            price,
        };
        product.validate()?;
        Ok(product)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.id.is_blank() {
            return Err(ValidationError::IdRequired { entity: "Product" });
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::NameRequired { entity: "Product" });
        }
        if !self.price.is_positive() {
            return Err(ValidationError::InvalidPrice {
                price: self.price.cents(),
            });
        }
        Ok(())
    }

    pub fn id(&self) -> &ProductId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> Money {
        self.price
    }

    /// Returns the event announcing this product's creation.
    pub fn created_event(&self) -> ProductCreated {
        ProductCreated::new(self)
    }

    pub fn change_name(&mut self, name: impl Into<String>) -> Result<(), ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::NameRequired { entity: "Product" });
        }
        self.name = name;
        Ok(())
    }

    pub fn change_price(&mut self, price: Money) -> Result<(), ValidationError> {
        if !price.is_positive() {
            return Err(ValidationError::InvalidPrice {
                price: price.cents(),
            });
        }
        self.price = price;
        Ok(())
    }
}
