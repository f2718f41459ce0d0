use async_trait::async_trait;
use domain::{Address, Customer, CustomerId, Repository, RepositoryError, RepositoryResult};

use crate::StoreError;
use crate::record::CustomerRecord;
use crate::store::RecordStore;

use super::{expect_one_row, invalid_record};

/// Customer repository backed by a record store.
#[derive(Clone)]
pub struct PersistentCustomerRepository<S: RecordStore> {
    store: S,
}

impl<S: RecordStore> PersistentCustomerRepository<S> {
    /// Creates a new customer repository over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    fn to_record(customer: &Customer) -> RepositoryResult<CustomerRecord> {
        let id = customer.id().as_str();
        let address = customer.address();
        let out_of_range = |column: &'static str| StoreError::ValueOutOfRange {
            table: "customers",
            column,
            key: id.to_string(),
        };
        let number = address
            .map(|a| i32::try_from(a.number()))
            .transpose()
            .map_err(|_| out_of_range("number"))?;
        let reward_points =
            i64::try_from(customer.reward_points()).map_err(|_| out_of_range("reward_points"))?;

        Ok(CustomerRecord {
            id: id.to_string(),
            name: customer.name().to_string(),
            street: address.map(|a| a.street().to_string()),
            number,
            zipcode: address.map(|a| a.zip().to_string()),
            city: address.map(|a| a.city().to_string()),
            active: customer.is_active(),
            reward_points,
        })
    }

    fn from_record(record: CustomerRecord) -> RepositoryResult<Customer> {
        let CustomerRecord {
            id,
            name,
            street,
            number,
            zipcode,
            city,
            active,
            reward_points,
        } = record;

        let address = match (street, number, zipcode, city) {
            (Some(street), Some(number), Some(zipcode), Some(city)) => {
                let number = u32::try_from(number)
                    .map_err(|_| invalid_record("Customer", &id, "negative address number"))?;
                Some(
                    Address::new(street, number, zipcode, city)
                        .map_err(|e| invalid_record("Customer", &id, e))?,
                )
            }
            (None, None, None, None) => None,
            _ => return Err(invalid_record("Customer", &id, "partial address")),
        };
        let reward_points = u64::try_from(reward_points)
            .map_err(|_| invalid_record("Customer", &id, "negative reward points"))?;

        Customer::restore(id.as_str(), name, address, active, reward_points)
            .map_err(|e| invalid_record("Customer", &id, e))
    }
}

#[async_trait]
impl<S: RecordStore> Repository for PersistentCustomerRepository<S> {
    type Entity = Customer;
    type Id = CustomerId;

    #[tracing::instrument(skip(self, entity), fields(customer_id = %entity.id()))]
    async fn create(&self, entity: &Customer) -> RepositoryResult<()> {
        self.store.insert_customer(Self::to_record(entity)?).await?;
        Ok(())
    }

    #[tracing::instrument(skip(self, entity), fields(customer_id = %entity.id()))]
    async fn update(&self, entity: &Customer) -> RepositoryResult<()> {
        let rows = self.store.update_customer(Self::to_record(entity)?).await?;
        expect_one_row(rows, "customers", entity.id().as_str())
    }

    #[tracing::instrument(skip(self))]
    async fn find(&self, id: &CustomerId) -> RepositoryResult<Customer> {
        let record = self
            .store
            .find_customer(id.as_str())
            .await?
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "Customer",
                id: id.to_string(),
            })?;

        Self::from_record(record)
    }

    #[tracing::instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<Customer>> {
        self.store
            .list_customers()
            .await?
            .into_iter()
            .map(Self::from_record)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::InMemoryRecordStore;

    use super::*;

    type Repo = PersistentCustomerRepository<InMemoryRecordStore>;

    #[test]
    fn test_record_round_trip_keeps_address_and_points() {
        let mut customer = Customer::new("c1", "Customer 1").unwrap();
        customer.change_address(Address::new("Street 1", 1, "Zipcode 1", "City 1").unwrap());
        customer.activate().unwrap();
        customer.add_reward_points(42);

        let record = Repo::to_record(&customer).unwrap();
        assert_eq!(record.street.as_deref(), Some("Street 1"));
        assert_eq!(record.number, Some(1));
        assert_eq!(record.reward_points, 42);

        assert_eq!(Repo::from_record(record).unwrap(), customer);
    }

    #[test]
    fn test_partial_address_is_invalid() {
        let record = CustomerRecord {
            id: "c1".to_string(),
            name: "Customer 1".to_string(),
            street: Some("Street".to_string()),
            number: None,
            zipcode: None,
            city: None,
            active: false,
            reward_points: 0,
        };

        assert!(matches!(
            Repo::from_record(record),
            Err(RepositoryError::InvalidRecord { entity: "Customer", .. })
        ));
    }
}
