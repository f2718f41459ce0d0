//! Domain error types.

use thiserror::Error;

/// An aggregate invariant was violated.
///
/// Raised at the point of construction or mutation; the aggregate is left
/// in its previous valid state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// An identifier is empty or whitespace only.
    #[error("{entity} id is required")]
    IdRequired { entity: &'static str },

    /// A name is empty or whitespace only.
    #[error("{entity} name is required")]
    NameRequired { entity: &'static str },

    /// An order must reference a customer.
    #[error("Customer ID is required")]
    CustomerIdRequired,

    /// An order item must reference a product.
    #[error("Product ID is required")]
    ProductIdRequired,

    /// An order must have at least one item.
    #[error("Order has no items")]
    NoItems,

    /// Two items in the same order share an id.
    #[error("Duplicate order item: {item_id}")]
    DuplicateItem { item_id: String },

    /// Invalid price.
    #[error("Invalid price: {price} (must be greater than 0)")]
    InvalidPrice { price: i64 },

    /// Invalid quantity.
    #[error("Invalid quantity: {quantity} (must be greater than 0)")]
    InvalidQuantity { quantity: u32 },

    /// A computed amount does not fit in the money representation.
    #[error("{entity} amount is out of range")]
    AmountOutOfRange { entity: &'static str },

    /// An address field is blank or out of range.
    #[error("Address {field} is invalid")]
    InvalidAddress { field: &'static str },

    /// The operation needs the customer to have an address.
    #[error("Address is mandatory to activate a customer")]
    AddressRequired,

    /// A price adjustment percentage is out of range.
    #[error("Invalid percentage: {percentage}")]
    InvalidPercentage { percentage: i64 },
}

/// Errors returned by repository implementations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No stored record matches the id.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// The storage layer failed (constraint violation, connection failure,
    /// zero-row update).
    #[error("Persistence error: {0}")]
    Persistence(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A stored record could not be turned back into a valid aggregate.
    #[error("Invalid stored {entity} {id}: {reason}")]
    InvalidRecord {
        entity: &'static str,
        id: String,
        reason: String,
    },
}

impl RepositoryError {
    /// Wraps a storage-layer error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        RepositoryError::Persistence(Box::new(err))
    }

    /// Returns true if this is a `NotFound` error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;
