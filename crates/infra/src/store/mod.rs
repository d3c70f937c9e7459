//! Storage capability for catalog and order records.
//!
//! Handlers receive a [`CatalogStore`] instead of reaching for a process-wide
//! connection, so tests can swap in [`InMemoryCatalogStore`].

pub mod in_memory;
pub mod mysql;
pub mod r#trait;

pub use in_memory::InMemoryCatalogStore;
pub use mysql::MySqlCatalogStore;
pub use r#trait::{CatalogStore, StoreError};
