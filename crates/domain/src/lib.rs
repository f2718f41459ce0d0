//! Domain layer for the checkout system.
//!
//! This crate provides:
//! - Order, Customer and Product aggregates with their invariants
//! - Domain events and the [`EventDispatcher`] that routes them to handlers
//! - Repository traits implemented by the persistence layer

pub mod checkout;
pub mod customer;
pub mod error;
pub mod event;
pub mod money;
pub mod product;
pub mod repository;

pub use checkout::{Order, OrderItem, OrderService};
pub use common::{CustomerId, OrderId, OrderItemId, ProductId};
pub use customer::{
    Address, Customer, CustomerAddressChanged, CustomerCreated, LogAddressChangedHandler,
    LogCustomerCreatedHandler,
};
pub use error::{RepositoryError, RepositoryResult, ValidationError};
pub use event::{DomainEvent, EventDispatcher, EventHandler, HandlerError};
pub use money::Money;
pub use product::{NotifyProductCreatedHandler, Product, ProductCreated, ProductService};
pub use repository::{CustomerRepository, OrderRepository, ProductRepository, Repository};
