//! Products domain module.
//!
//! Business rules for catalog records, implemented as deterministic domain
//! logic (no IO, no HTTP, no storage).

pub mod product;

pub use product::{NewProduct, Product};
