use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::error::ErrorKind;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::{Postgres, Row, Transaction};

use crate::record::{CustomerRecord, OrderItemRecord, OrderRecord, OrderSnapshot, ProductRecord};
use crate::store::RecordStore;
use crate::{Result, StoreConfig, StoreError};

const ORDER_ITEM_COLUMNS: &str = "id, name, price, product_id, order_id, quantity";

/// PostgreSQL-backed record store implementation.
///
/// Multi-row writes run inside a single transaction; constraint violations
/// reported by PostgreSQL are mapped onto the same [`StoreError`] variants
/// the in-memory store produces.
#[derive(Clone)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    /// Creates a new PostgreSQL record store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects using `config`, running migrations if it asks for them.
    pub async fn connect(config: &StoreConfig) -> Result<Self> {
        let url = config
            .database_url
            .as_deref()
            .ok_or_else(|| StoreError::Config("DATABASE_URL is not set".to_string()))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(url)
            .await?;
        let store = Self::new(pool);

        if config.run_migrations {
            store.run_migrations().await?;
        }

        tracing::info!(
            max_connections = config.max_connections,
            "connected to PostgreSQL record store"
        );
        Ok(store)
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_customer(row: PgRow) -> Result<CustomerRecord> {
        Ok(CustomerRecord {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            street: row.try_get("street")?,
            number: row.try_get("number")?,
            zipcode: row.try_get("zipcode")?,
            city: row.try_get("city")?,
            active: row.try_get("active")?,
            reward_points: row.try_get("reward_points")?,
        })
    }

    fn row_to_product(row: PgRow) -> Result<ProductRecord> {
        Ok(ProductRecord {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
        })
    }

    fn row_to_order(row: PgRow) -> Result<OrderRecord> {
        Ok(OrderRecord {
            id: row.try_get("id")?,
            customer_id: row.try_get("customer_id")?,
            total: row.try_get("total")?,
        })
    }

    fn row_to_order_item(row: PgRow) -> Result<OrderItemRecord> {
        Ok(OrderItemRecord {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            price: row.try_get("price")?,
            product_id: row.try_get("product_id")?,
            order_id: row.try_get("order_id")?,
            quantity: row.try_get("quantity")?,
        })
    }

    async fn insert_items(
        tx: &mut Transaction<'_, Postgres>,
        items: &[OrderItemRecord],
    ) -> Result<()> {
        for item in items {
            sqlx::query(
                r#"
                INSERT INTO order_items (id, name, price, product_id, order_id, quantity)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(&item.id)
            .bind(&item.name)
            .bind(item.price)
            .bind(&item.product_id)
            .bind(&item.order_id)
            .bind(item.quantity)
            .execute(&mut **tx)
            .await
            .map_err(|e| map_write_error("order_items", &item.id, e))?;
        }
        Ok(())
    }
}

/// Maps constraint violations onto the store's own error variants.
fn map_write_error(table: &'static str, key: &str, err: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err {
        match db_err.kind() {
            ErrorKind::UniqueViolation => {
                return StoreError::UniqueViolation {
                    table,
                    key: key.to_string(),
                };
            }
            ErrorKind::ForeignKeyViolation => {
                return StoreError::ForeignKeyViolation {
                    table,
                    detail: db_err.message().to_string(),
                };
            }
            ErrorKind::CheckViolation => {
                return StoreError::CheckViolation {
                    table,
                    detail: db_err.message().to_string(),
                };
            }
            _ => {}
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn insert_customer(&self, record: CustomerRecord) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO customers (id, name, street, number, zipcode, city, active, reward_points)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.street)
        .bind(record.number)
        .bind(&record.zipcode)
        .bind(&record.city)
        .bind(record.active)
        .bind(record.reward_points)
        .execute(&self.pool)
        .await
        .map_err(|e| map_write_error("customers", &record.id, e))?;

        Ok(())
    }

    async fn update_customer(&self, record: CustomerRecord) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE customers
            SET name = $2, street = $3, number = $4, zipcode = $5, city = $6,
                active = $7, reward_points = $8
            WHERE id = $1
            "#,
        )
        .bind(&record.id)
        .bind(&record.name)
        .bind(&record.street)
        .bind(record.number)
        .bind(&record.zipcode)
        .bind(&record.city)
        .bind(record.active)
        .bind(record.reward_points)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn find_customer(&self, id: &str) -> Result<Option<CustomerRecord>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_customer).transpose()
    }

    async fn list_customers(&self) -> Result<Vec<CustomerRecord>> {
        let rows = sqlx::query(
            r#"
            SELECT id, name, street, number, zipcode, city, active, reward_points
            FROM customers
            ORDER BY seq ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_customer).collect()
    }

    async fn insert_product(&self, record: ProductRecord) -> Result<()> {
        sqlx::query("INSERT INTO products (id, name, price) VALUES ($1, $2, $3)")
            .bind(&record.id)
            .bind(&record.name)
            .bind(record.price)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("products", &record.id, e))?;

        Ok(())
    }

    async fn update_product(&self, record: ProductRecord) -> Result<u64> {
        let result = sqlx::query("UPDATE products SET name = $2, price = $3 WHERE id = $1")
            .bind(&record.id)
            .bind(&record.name)
            .bind(record.price)
            .execute(&self.pool)
            .await
            .map_err(|e| map_write_error("products", &record.id, e))?;

        Ok(result.rows_affected())
    }

    async fn find_product(&self, id: &str) -> Result<Option<ProductRecord>> {
        let row = sqlx::query("SELECT id, name, price FROM products WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_product).transpose()
    }

    async fn list_products(&self) -> Result<Vec<ProductRecord>> {
        let rows = sqlx::query("SELECT id, name, price FROM products ORDER BY seq ASC")
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn insert_order(&self, order: OrderRecord, items: Vec<OrderItemRecord>) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO orders (id, customer_id, total) VALUES ($1, $2, $3)")
            .bind(&order.id)
            .bind(&order.customer_id)
            .bind(order.total)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_write_error("orders", &order.id, e))?;

        Self::insert_items(&mut tx, &items).await?;

        tx.commit().await?;
        tracing::debug!(order_id = %order.id, items = items.len(), "inserted order");
        Ok(())
    }

    async fn replace_order(
        &self,
        order: OrderRecord,
        items: Vec<OrderItemRecord>,
    ) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query("UPDATE orders SET customer_id = $2, total = $3 WHERE id = $1")
            .bind(&order.id)
            .bind(&order.customer_id)
            .bind(order.total)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_write_error("orders", &order.id, e))?
            .rows_affected();

        if updated == 0 {
            tx.rollback().await?;
            return Ok(0);
        }

        sqlx::query("DELETE FROM order_items WHERE order_id = $1")
            .bind(&order.id)
            .execute(&mut *tx)
            .await?;

        Self::insert_items(&mut tx, &items).await?;

        tx.commit().await?;
        tracing::debug!(order_id = %order.id, items = items.len(), "replaced order");
        Ok(updated)
    }

    async fn find_order(&self, id: &str) -> Result<Option<OrderSnapshot>> {
        let Some(row) = sqlx::query("SELECT id, customer_id, total FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
        else {
            return Ok(None);
        };
        let order = Self::row_to_order(row)?;

        let items = sqlx::query(&format!(
            "SELECT {ORDER_ITEM_COLUMNS} FROM order_items WHERE order_id = $1 ORDER BY seq ASC"
        ))
        .bind(id)
        .fetch_all(&self.pool)
        .await?
        .into_iter()
        .map(Self::row_to_order_item)
        .collect::<Result<Vec<_>>>()?;

        Ok(Some(OrderSnapshot { order, items }))
    }

    async fn list_orders(&self) -> Result<Vec<OrderSnapshot>> {
        let orders = sqlx::query("SELECT id, customer_id, total FROM orders ORDER BY seq ASC")
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Self::row_to_order)
            .collect::<Result<Vec<_>>>()?;

        let mut items_by_order: HashMap<String, Vec<OrderItemRecord>> = HashMap::new();
        let rows = sqlx::query(&format!(
            "SELECT {ORDER_ITEM_COLUMNS} FROM order_items ORDER BY seq ASC"
        ))
        .fetch_all(&self.pool)
        .await?;
        for row in rows {
            let item = Self::row_to_order_item(row)?;
            items_by_order
                .entry(item.order_id.clone())
                .or_default()
                .push(item);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = items_by_order.remove(&order.id).unwrap_or_default();
                OrderSnapshot { order, items }
            })
            .collect())
    }

    async fn find_order_item(&self, id: &str) -> Result<Option<OrderItemRecord>> {
        let row = sqlx::query(&format!(
            "SELECT {ORDER_ITEM_COLUMNS} FROM order_items WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Self::row_to_order_item).transpose()
    }
}
