use async_trait::async_trait;
use domain::{Money, Product, ProductId, Repository, RepositoryError, RepositoryResult};

use crate::record::ProductRecord;
use crate::store::RecordStore;

use super::{expect_one_row, invalid_record};

/// Product repository backed by a record store.
#[derive(Clone)]
pub struct PersistentProductRepository<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> PersistentProductRepository<S> {
    /// Creates a new product repository over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn to_record(product: &Product) -> ProductRecord {
        ProductRecord {
            id: product.id().to_string(),
            name: product.name().to_string(),
            price: product.price().cents(),
        }
    }

    fn from_record(record: ProductRecord) -> RepositoryResult<Product> {
        Product::new(record.id.as_str(), record.name, Money::from_cents(record.price))
            .map_err(|e| invalid_record("Product", &record.id, e))
    }
}

#[async_trait]
impl<S: RecordStore> Repository for PersistentProductRepository<S> {
    type Entity = Product;
    type Id = ProductId;

    #[tracing::instrument(skip(self, entity), fields(product_id = %entity.id()))]
    async fn create(&self, entity: &Product) -> RepositoryResult<()> {
        self.store.insert_product(Self::to_record(entity)).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, entity), fields(product_id = %entity.id()))]
    async fn update(&self, entity: &Product) -> RepositoryResult<()> {
        let rows = self.store.update_product(Self::to_record(entity)).await?;
        expect_one_row(rows, "products", entity.id().as_str())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &ProductId) -> RepositoryResult<Product> {
        let record = self
            .store
            .find_product(id.as_str())
            .await?
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "Product",
                id: id.to_string(),
            })?;

        Self::from_record(record)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<Product>> {
        self.store
            .list_products()
            .await?
            .into_iter()
            .map(Self::from_record)
            .collect()
    }
}
