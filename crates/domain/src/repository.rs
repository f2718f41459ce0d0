//! Persistence contracts for the aggregates.

use async_trait::async_trait;
use common::{CustomerId, OrderId, ProductId};

use crate::RepositoryResult;
use crate::checkout::Order;
use crate::customer::Customer;
use crate::product::Product;

/// Core trait for aggregate repositories.
///
/// Implementations translate aggregates to and from stored records. Every
/// method either fully succeeds or returns an error; there are no sentinel
/// values.
#[async_trait]
pub trait Repository: Send + Sync {
    /// The aggregate stored by this repository.
    type Entity: Send + Sync;

    /// The aggregate's identifier type.
    type Id: Send + Sync + ?Sized;

    /// Stores a new aggregate.
    async fn create(&self, entity: &Self::Entity) -> RepositoryResult<()>;

    /// Overwrites an existing aggregate.
    ///
    /// Fails if nothing is stored under the aggregate's id.
    async fn update(&self, entity: &Self::Entity) -> RepositoryResult<()>;

    /// Loads an aggregate by id, failing with `NotFound` if absent.
    async fn find(&self, id: &Self::Id) -> RepositoryResult<Self::Entity>;

    /// Loads every stored aggregate in storage order.
    async fn find_all(&self) -> RepositoryResult<Vec<Self::Entity>>;
}

/// Repository for [`Order`] aggregates.
pub trait OrderRepository: Repository<Entity = Order, Id = OrderId> {}

impl<T> OrderRepository for T where T: Repository<Entity = Order, Id = OrderId> {}

/// Repository for [`Customer`] aggregates.
pub trait CustomerRepository: Repository<Entity = Customer, Id = CustomerId> {}

impl<T> CustomerRepository for T where T: Repository<Entity = Customer, Id = CustomerId> {}

/// Repository for [`Product`] aggregates.
pub trait ProductRepository: Repository<Entity = Product, Id = ProductId> {}

impl<T> ProductRepository for T where T: Repository<Entity = Product, Id = ProductId> {}
