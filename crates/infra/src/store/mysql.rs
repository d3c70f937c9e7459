//! MySQL-backed catalog store.
//!
//! ## Error Mapping
//!
//! | SQLx error | StoreError |
//! |------------|------------|
//! | `Database` | `Database` |
//! | `ColumnDecode`, `ColumnNotFound`, `Decode` | `Decode` |
//! | `PoolClosed`, `PoolTimedOut`, `Io`, `Tls` | `Unavailable` |
//! | anything else | `Database` |

use async_trait::async_trait;
use sqlx::mysql::{MySqlConnectOptions, MySqlPool, MySqlPoolOptions, MySqlRow};
use sqlx::Row;
use tracing::instrument;

use shopfloor_core::{OrderId, ProductId};
use shopfloor_orders::{NewOrder, Order};
use shopfloor_products::{NewProduct, Product};

use super::r#trait::{CatalogStore, StoreError};
use crate::config::DatabaseConfig;
use crate::query::{build_product_search, ProductFilter, SqlValue};

const CREATE_PRODUCTS: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        name VARCHAR(255) NOT NULL,
        price DOUBLE NOT NULL,
        category VARCHAR(255) NOT NULL COLLATE utf8mb4_bin,
        quantity BIGINT NOT NULL,
        INDEX idx_products_category (category),
        INDEX idx_products_price (price)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

const CREATE_ORDERS: &str = r#"
    CREATE TABLE IF NOT EXISTS orders (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        product_id BIGINT NOT NULL,
        quantity BIGINT NOT NULL
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4
"#;

/// Catalog store over a pooled MySQL connection.
///
/// The pool is `Send + Sync` and cheap to clone; one store is shared by all
/// handlers.
#[derive(Debug, Clone)]
pub struct MySqlCatalogStore {
    pool: MySqlPool,
}

impl MySqlCatalogStore {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Open a pool using the configured credentials.
    #[instrument(
        skip(config),
        fields(host = %config.host, port = config.port, database = %config.database),
        err
    )]
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let options = MySqlConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .username(&config.user)
            .password(&config.password)
            .database(&config.database);

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await
            .map_err(|e| map_sqlx_error("connect", e))?;

        tracing::info!("mysql pool ready");
        Ok(Self::new(pool))
    }

    /// Create the `products` and `orders` tables when they do not exist yet.
    #[instrument(skip(self), err)]
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        for ddl in [CREATE_PRODUCTS, CREATE_ORDERS] {
            sqlx::query(ddl)
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("ensure_schema", e))?;
        }
        Ok(())
    }

}

#[async_trait]
impl CatalogStore for MySqlCatalogStore {
    #[instrument(skip(self), err)]
    async fn insert_product(&self, product: NewProduct) -> Result<Product, StoreError> {
        let result = sqlx::query(
            "INSERT INTO products (name, price, category, quantity) VALUES (?, ?, ?, ?)",
        )
        .bind(product.name())
        .bind(product.price())
        .bind(product.category())
        .bind(product.quantity())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("insert_product", e))?;

        let id = generated_id(result.last_insert_id())?;
        Ok(product.into_product(ProductId::new(id)))
    }

    #[instrument(skip(self), err)]
    async fn search_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let search = build_product_search(filter);
        tracing::debug!(sql = %search.sql, args = search.args.len(), "product search");

        let mut stmt = sqlx::query(&search.sql);
        for arg in &search.args {
            stmt = match arg {
                SqlValue::Int(v) => stmt.bind(*v),
                SqlValue::Float(v) => stmt.bind(*v),
                SqlValue::Text(v) => stmt.bind(v.clone()),
            };
        }

        let rows = stmt
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("search_products", e))?;

        rows.iter().map(product_from_row).collect()
    }

    #[instrument(skip(self), err)]
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        let result = sqlx::query("INSERT INTO orders (product_id, quantity) VALUES (?, ?)")
            .bind(order.product_id().get())
            .bind(order.quantity())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("insert_order", e))?;

        let id = generated_id(result.last_insert_id())?;
        Ok(order.into_order(OrderId::new(id)))
    }

    #[instrument(skip(self), err)]
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let rows = sqlx::query("SELECT id, product_id, quantity FROM orders ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_orders", e))?;

        rows.iter().map(order_from_row).collect()
    }
}

fn generated_id(raw: u64) -> Result<i64, StoreError> {
    i64::try_from(raw).map_err(|_| StoreError::Decode(format!("generated id {raw} out of range")))
}

fn product_from_row(row: &MySqlRow) -> Result<Product, StoreError> {
    Ok(Product {
        id: ProductId::new(row.try_get("id").map_err(|e| map_sqlx_error("decode product", e))?),
        name: row.try_get("name").map_err(|e| map_sqlx_error("decode product", e))?,
        price: row.try_get("price").map_err(|e| map_sqlx_error("decode product", e))?,
        category: row
            .try_get("category")
            .map_err(|e| map_sqlx_error("decode product", e))?,
        quantity: row
            .try_get("quantity")
            .map_err(|e| map_sqlx_error("decode product", e))?,
    })
}

fn order_from_row(row: &MySqlRow) -> Result<Order, StoreError> {
    Ok(Order {
        id: OrderId::new(row.try_get("id").map_err(|e| map_sqlx_error("decode order", e))?),
        product_id: ProductId::new(
            row.try_get("product_id")
                .map_err(|e| map_sqlx_error("decode order", e))?,
        ),
        quantity: row
            .try_get("quantity")
            .map_err(|e| map_sqlx_error("decode order", e))?,
    })
}

fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db_err) => {
            StoreError::Database(format!("database error in {}: {}", operation, db_err.message()))
        }
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::ColumnNotFound(_) | sqlx::Error::Decode(_) => {
            StoreError::Decode(format!("{}: {}", operation, err))
        }
        sqlx::Error::PoolClosed | sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
            StoreError::Unavailable(format!("{}: {}", operation, err))
        }
        _ => StoreError::Database(format!("sqlx error in {}: {}", operation, err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pool_errors_map_to_unavailable() {
        let err = map_sqlx_error("search_products", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, StoreError::Unavailable(msg) if msg.starts_with("search_products")));
    }

    #[test]
    fn missing_column_maps_to_decode() {
        let err = map_sqlx_error("decode product", sqlx::Error::ColumnNotFound("price".to_string()));
        assert!(matches!(err, StoreError::Decode(_)));
    }

    #[test]
    fn row_not_found_maps_to_database() {
        let err = map_sqlx_error("list_orders", sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn category_column_compares_exact_bytes() {
        assert!(CREATE_PRODUCTS.contains("category VARCHAR(255) NOT NULL COLLATE utf8mb4_bin,"));
    }

    #[test]
    fn generated_id_rejects_overflow() {
        assert_eq!(generated_id(7).unwrap(), 7);
        assert!(generated_id(u64::MAX).is_err());
    }
}
