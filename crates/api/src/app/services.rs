use std::sync::Arc;

use shopfloor_infra::{CatalogStore, DatabaseConfig, InMemoryCatalogStore, MySqlCatalogStore, StoreError};

/// Capabilities handed to every handler.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn CatalogStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryCatalogStore::new()))
    }

    /// MySQL wiring: open the pool and make sure both tables exist.
    pub async fn mysql(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let store = MySqlCatalogStore::connect(config).await?;
        store.ensure_schema().await?;
        Ok(Self::new(Arc::new(store)))
    }

    pub fn store(&self) -> &dyn CatalogStore {
        self.store.as_ref()
    }
}
