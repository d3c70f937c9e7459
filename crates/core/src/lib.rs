//! `shopfloor-core` — shared domain building blocks.
//!
//! Pure domain primitives only: identifiers, the domain error model and the
//! field-level validation helpers used by the product and order crates.

pub mod entity;
pub mod error;
pub mod id;
pub mod validation;

pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{OrderId, ProductId};
pub use validation::{FieldError, ValidationErrors, Validator};
