//! Persistence layer for the checkout domain.
//!
//! - [`RecordStore`]: the mapping layer over customers, products, orders and
//!   order items, with an in-memory and a PostgreSQL implementation
//! - `Persistent*Repository`: the domain's repository traits implemented on
//!   top of any record store
//! - [`StoreConfig`]: environment-driven connection settings

pub mod config;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod repository;
pub mod store;

pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use memory::InMemoryRecordStore;
pub use postgres::PostgresRecordStore;
pub use record::{CustomerRecord, OrderItemRecord, OrderRecord, OrderSnapshot, ProductRecord};
pub use repository::{
    PersistentCustomerRepository, PersistentOrderRepository, PersistentProductRepository,
};
pub use store::RecordStore;
