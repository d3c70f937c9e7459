use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use shopfloor_orders::{NewOrder, Order};
use shopfloor_products::{NewProduct, Product};

use crate::query::ProductFilter;

/// Storage operation error.
///
/// These are **infrastructure errors**; client input problems are reported
/// as `DomainError::Validation` before a store is ever called.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The engine rejected the statement.
    #[error("database error: {0}")]
    Database(String),

    /// A row came back in a shape that does not map onto a record.
    #[error("row decode failed: {0}")]
    Decode(String),

    /// The engine could not be reached (pool closed, connect failure, poisoned lock).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

/// Persistence for products and orders.
///
/// Implementations assign identifiers on insert and return the stored record.
/// Writes to products and orders are independent; nothing spans both.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Persist a validated product and return it with its generated id.
    async fn insert_product(&self, product: NewProduct) -> Result<Product, StoreError>;

    /// Products matching every present filter. An empty result is not an error.
    async fn search_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError>;

    /// Persist a validated order and return it with its generated id.
    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError>;

    /// All orders, oldest first.
    async fn list_orders(&self) -> Result<Vec<Order>, StoreError>;
}

#[async_trait]
impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    async fn insert_product(&self, product: NewProduct) -> Result<Product, StoreError> {
        (**self).insert_product(product).await
    }

    async fn search_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        (**self).search_products(filter).await
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        (**self).insert_order(order).await
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        (**self).list_orders().await
    }
}
