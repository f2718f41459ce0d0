//! Repository implementations on top of a [`RecordStore`](crate::RecordStore).
//!
//! Each repository translates aggregates to records on the way in and
//! rebuilds (and re-validates) aggregates on the way out.

mod customer;
mod order;
mod product;

pub use customer::PersistentCustomerRepository;
pub use order::PersistentOrderRepository;
pub use product::PersistentProductRepository;

use domain::RepositoryError;

use crate::StoreError;

/// Reports a stored row that cannot be turned back into an aggregate.
fn invalid_record(entity: &'static str, id: &str, reason: impl std::fmt::Display) -> RepositoryError {
    RepositoryError::InvalidRecord {
        entity,
        id: id.to_string(),
        reason: reason.to_string(),
    }
}

/// Turns a zero-row update into an error.
fn expect_one_row(rows: u64, table: &'static str, key: &str) -> Result<(), RepositoryError> {
    if rows == 0 {
        tracing::warn!(table, key, "update matched no rows");
        return Err(StoreError::NoRowsAffected {
            table,
            key: key.to_string(),
        }
        .into());
    }
    Ok(())
}
