//! Domain services operating on several products.

use crate::{Money, ValidationError};

use super::Product;

/// Catalog-wide operations that do not belong to a single product.
pub struct ProductService;

impl ProductService {
    /// Raises the price of every product by `percentage` percent.
    ///
    /// The percentage must be positive and every new price must fit the
    /// money representation; nothing is changed otherwise.
    pub fn increase_price(
        products: &mut [Product],
        percentage: i64,
    ) -> Result<(), ValidationError> {
        if percentage <= 0 {
            return Err(ValidationError::InvalidPercentage { percentage });
        }

        let new_prices = products
            .iter()
            .map(|product| {
                let price = product.price();
                price
                    .percentage(percentage)
                    .and_then(|increase| price.checked_add(increase))
                    .ok_or(ValidationError::AmountOutOfRange { entity: "Product" })
            })
            .collect::<Result<Vec<Money>, _>>()?;

        for (product, price) in products.iter_mut().zip(new_prices) {
            product.change_price(price)?;
        }
        Ok(())
    }
}
