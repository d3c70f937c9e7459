use std::sync::RwLock;

use async_trait::async_trait;

use shopfloor_core::{OrderId, ProductId};
use shopfloor_orders::{NewOrder, Order};
use shopfloor_products::{NewProduct, Product};

use super::r#trait::{CatalogStore, StoreError};
use crate::query::ProductFilter;

#[derive(Debug, Default)]
struct Tables {
    products: Vec<Product>,
    orders: Vec<Order>,
}

/// In-memory catalog store.
///
/// Intended for tests/dev. Ids start at 1 and increase per table, like an
/// auto-increment column.
#[derive(Debug, Default)]
pub struct InMemoryCatalogStore {
    tables: RwLock<Tables>,
}

impl InMemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned() -> StoreError {
        StoreError::Unavailable("lock poisoned".to_string())
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalogStore {
    async fn insert_product(&self, product: NewProduct) -> Result<Product, StoreError> {
        let mut tables = self.tables.write().map_err(|_| Self::poisoned())?;
        let id = ProductId::new(tables.products.len() as i64 + 1);
        let stored = product.into_product(id);
        tables.products.push(stored.clone());
        Ok(stored)
    }

    async fn search_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreError> {
        let tables = self.tables.read().map_err(|_| Self::poisoned())?;
        Ok(tables
            .products
            .iter()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect())
    }

    async fn insert_order(&self, order: NewOrder) -> Result<Order, StoreError> {
        let mut tables = self.tables.write().map_err(|_| Self::poisoned())?;
        let id = OrderId::new(tables.orders.len() as i64 + 1);
        let stored = order.into_order(id);
        tables.orders.push(stored.clone());
        Ok(stored)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, StoreError> {
        let tables = self.tables.read().map_err(|_| Self::poisoned())?;
        Ok(tables.orders.clone())
    }
}
