use serde::Deserialize;
use serde_json::Value;

use shopfloor_core::{ValidationErrors, Validator};
use shopfloor_infra::ProductFilter;

/// Query string of `GET /api/products`.
///
/// Every parameter is optional; an empty value (`?category=`) counts as absent.
#[derive(Debug, Default, Deserialize)]
pub struct SearchProductsQuery {
    #[serde(rename = "priceMin")]
    pub price_min: Option<String>,
    #[serde(rename = "priceMax")]
    pub price_max: Option<String>,
    pub category: Option<String>,
    pub quantity: Option<String>,
}

impl SearchProductsQuery {
    /// Parse the raw parameters into a filter, itemizing every malformed number.
    pub fn into_filter(self) -> Result<ProductFilter, ValidationErrors> {
        let mut v = Validator::new();

        let min_price = supplied(self.price_min).and_then(|raw| v.number("priceMin", Some(&raw)));
        let max_price = supplied(self.price_max).and_then(|raw| v.number("priceMax", Some(&raw)));
        let category = supplied(self.category).and_then(|raw| match raw {
            Value::String(s) => Some(s),
            _ => None,
        });
        let min_quantity = supplied(self.quantity).and_then(|raw| v.integer("quantity", Some(&raw)));

        v.finish()?;

        Ok(ProductFilter {
            min_price,
            max_price,
            category,
            min_quantity,
        })
    }
}

fn supplied(raw: Option<String>) -> Option<Value> {
    raw.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .map(Value::String)
}
