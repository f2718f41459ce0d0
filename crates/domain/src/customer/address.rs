use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// A customer's postal address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    street: String,
    number: u32,
    zip: String,
    city: String,
}

impl Address {
    /// Creates a validated address.
    pub fn new(
        street: impl Into<String>,
        number: u32,
        zip: impl Into<String>,
        city: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let address = Self {
            street: street.into(),
            number,
            zip: zip.into(),
            city: city.into(),
        };
        address.validate()?;
        Ok(address)
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.street.trim().is_empty() {
            return Err(ValidationError::InvalidAddress { field: "street" });
        }
        if self.number == 0 {
            return Err(ValidationError::InvalidAddress { field: "number" });
        }
        if self.zip.trim().is_empty() {
            return Err(ValidationError::InvalidAddress { field: "zip" });
        }
        if self.city.trim().is_empty() {
            return Err(ValidationError::InvalidAddress { field: "city" });
        }
        Ok(())
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn zip(&self) -> &str {
        &self.zip
    }

    pub fn city(&self) -> &str {
        &self.city
    }
}

impl std::fmt::Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {} {}", self.street, self.number, self.zip, self.city)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_address_displays_all_fields() {
        let address = Address::new("Street 1", 10, "12345-000", "Springfield").unwrap();
        assert_eq!(address.to_string(), "Street 1, 10, 12345-000 Springfield");
    }

    #[test]
    fn test_rejects_blank_fields() {
        assert_eq!(
            Address::new("", 1, "zip", "city"),
            Err(ValidationError::InvalidAddress { field: "street" })
        );
        assert_eq!(
            Address::new("street", 0, "zip", "city"),
            Err(ValidationError::InvalidAddress { field: "number" })
        );
        assert_eq!(
            Address::new("street", 1, " ", "city"),
            Err(ValidationError::InvalidAddress { field: "zip" })
        );
        assert_eq!(
            Address::new("street", 1, "zip", ""),
            Err(ValidationError::InvalidAddress { field: "city" })
        );
    }
}
