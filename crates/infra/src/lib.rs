//! Infrastructure layer: query construction, storage, configuration.

pub mod config;
pub mod query;
pub mod store;

pub use config::{ConfigError, DatabaseConfig};
pub use query::{build_product_search, ProductFilter, SqlQuery, SqlValue};
pub use store::{CatalogStore, InMemoryCatalogStore, MySqlCatalogStore, StoreError};
