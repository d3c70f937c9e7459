//! Orders domain module.
//!
//! An order records a requested quantity of a product. Stock levels are not
//! touched and the referenced product is not checked for existence.

pub mod order;

pub use order::{NewOrder, Order};
