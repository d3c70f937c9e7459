//! Parameterized product search.
//!
//! Turns a set of optional search filters into a query template plus the
//! ordered list of values to bind. Values never enter the template text; the
//! storage driver binds them positionally, one per `?` placeholder.

use serde::{Deserialize, Serialize};

use shopfloor_products::Product;

/// Unconditional base of every product search. `1=1` lets each filter be
/// appended uniformly as ` AND <clause>`.
pub const PRODUCT_SEARCH_BASE: &str =
    "SELECT id, name, price, category, quantity FROM products WHERE 1=1";

/// Optional product search criteria.
///
/// A filter is present iff it is `Some`; a zero bound is a real bound.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductFilter {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub category: Option<String>,
    pub min_quantity: Option<i64>,
}

impl ProductFilter {
    pub fn is_empty(&self) -> bool {
        self.min_price.is_none()
            && self.max_price.is_none()
            && self.category.is_none()
            && self.min_quantity.is_none()
    }

    /// In-memory evaluation of the same predicates the query template encodes.
    ///
    /// Category equality is exact and case-sensitive; the `products.category`
    /// column uses a binary collation so the engine compares the same way.
    pub fn matches(&self, product: &Product) -> bool {
        self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
            && self.category.as_deref().is_none_or(|c| product.category == c)
            && self.min_quantity.is_none_or(|min| product.quantity >= min)
    }
}

/// A value bound to a positional placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    Float(f64),
    Text(String),
}

/// Query template and its bound arguments.
///
/// `args[i]` binds the i-th `?` of `sql`, counted left to right.
#[derive(Debug, Clone, PartialEq)]
pub struct SqlQuery {
    pub sql: String,
    pub args: Vec<SqlValue>,
}

impl SqlQuery {
    pub fn new(sql: impl Into<String>) -> Self {
        Self {
            sql: sql.into(),
            args: Vec::new(),
        }
    }

    pub fn placeholder_count(&self) -> usize {
        self.sql.matches('?').count()
    }

    fn and(mut self, clause: &str, value: SqlValue) -> Self {
        self.sql.push_str(" AND ");
        self.sql.push_str(clause);
        self.args.push(value);
        self
    }
}

/// Build the product search for `filter`.
///
/// Clauses are emitted in a fixed order (min price, max price, category,
/// min quantity) regardless of how the filter was populated. Never fails and
/// never validates ranges.
pub fn build_product_search(filter: &ProductFilter) -> SqlQuery {
    let clauses = [
        ("price >= ?", filter.min_price.map(SqlValue::Float)),
        ("price <= ?", filter.max_price.map(SqlValue::Float)),
        ("category = ?", filter.category.clone().map(SqlValue::Text)),
        ("quantity >= ?", filter.min_quantity.map(SqlValue::Int)),
    ];

    clauses
        .into_iter()
        .filter_map(|(clause, value)| value.map(|v| (clause, v)))
        .fold(SqlQuery::new(PRODUCT_SEARCH_BASE), |query, (clause, value)| {
            query.and(clause, value)
        })
}
