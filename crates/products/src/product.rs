use serde::{Deserialize, Serialize};
use serde_json::Value;

use shopfloor_core::{DomainError, DomainResult, Entity, ProductId, Validator};

/// A persisted catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub quantity: i64,
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> ProductId {
        self.id
    }
}

/// Validated input for the add-product operation.
///
/// Only constructible through [`NewProduct::new`] or [`NewProduct::from_json`],
/// so a value of this type always satisfies the catalog invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    name: String,
    price: f64,
    category: String,
    quantity: i64,
}

impl NewProduct {
    pub fn new(
        name: impl Into<String>,
        price: f64,
        category: impl Into<String>,
        quantity: i64,
    ) -> DomainResult<Self> {
        let body = serde_json::json!({
            "name": name.into(),
            "price": price,
            "category": category.into(),
            "quantity": quantity,
        });
        Self::from_json(&body)
    }

    /// Validate a loosely-typed request body, collecting every failing field.
    pub fn from_json(body: &Value) -> DomainResult<Self> {
        let mut v = Validator::new();

        let name = v.text("name", body.get("name"));
        let price = v.number("price", body.get("price"));
        if let Some(p) = price {
            if p < 0.0 {
                v.reject("price", "must not be negative", body.get("price"));
            }
        }
        let category = v.text("category", body.get("category"));
        let quantity = v.integer_greater_than("quantity", body.get("quantity"), 0);

        v.finish()?;

        let (Some(name), Some(price), Some(category), Some(quantity)) = (name, price, category, quantity)
        else {
            return Err(DomainError::invariant("validator passed with a missing field"));
        };

        Ok(Self {
            name,
            price,
            category,
            quantity,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Attach the storage-generated identifier.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            category: self.category,
            quantity: self.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn validation_fields(err: DomainError) -> Vec<String> {
        match err {
            DomainError::Validation(errors) => errors.fields().into_iter().map(String::from).collect(),
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_well_formed_body() {
        let p = NewProduct::from_json(&json!({
            "name": "Desk Lamp",
            "price": 24.99,
            "category": "Lighting",
            "quantity": 12,
        }))
        .unwrap();

        assert_eq!(p.name(), "Desk Lamp");
        assert_eq!(p.price(), 24.99);
        assert_eq!(p.category(), "Lighting");
        assert_eq!(p.quantity(), 12);
    }

    #[test]
    fn accepts_numeric_strings() {
        let p = NewProduct::from_json(&json!({
            "name": "Cable",
            "price": "3.50",
            "category": "Electronics",
            "quantity": "4",
        }))
        .unwrap();

        assert_eq!(p.price(), 3.5);
        assert_eq!(p.quantity(), 4);
    }

    #[test]
    fn trims_text_fields() {
        let p = NewProduct::new("  Mug ", 5.0, " Kitchen ", 1).unwrap();
        assert_eq!(p.name(), "Mug");
        assert_eq!(p.category(), "Kitchen");
    }

    #[test]
    fn collects_every_failing_field() {
        let err = NewProduct::from_json(&json!({
            "name": "",
            "price": "cheap",
            "quantity": 0,
        }))
        .unwrap_err();

        assert_eq!(validation_fields(err), vec!["name", "price", "category", "quantity"]);
    }

    #[test]
    fn rejects_negative_price() {
        let err = NewProduct::new("Chair", -1.0, "Furniture", 2).unwrap_err();
        assert_eq!(validation_fields(err), vec!["price"]);
    }

    #[test]
    fn rejects_non_positive_quantity() {
        let err = NewProduct::new("Chair", 10.0, "Furniture", 0).unwrap_err();
        assert_eq!(validation_fields(err), vec!["quantity"]);
    }

    #[test]
    fn into_product_keeps_fields() {
        let product = NewProduct::new("Pen", 1.25, "Office", 100)
            .unwrap()
            .into_product(ProductId::new(9));

        assert_eq!(product.id(), ProductId::new(9));
        assert_eq!(product.name, "Pen");
        assert_eq!(product.quantity, 100);
    }

    #[test]
    fn product_serializes_with_flat_id() {
        let product = NewProduct::new("Pen", 1.25, "Office", 100)
            .unwrap()
            .into_product(ProductId::new(3));
        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(
            value,
            json!({ "id": 3, "name": "Pen", "price": 1.25, "category": "Office", "quantity": 100 })
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 256,
                ..ProptestConfig::default()
            })]

            /// Property: any non-blank name/category, non-negative price and positive quantity is accepted.
            #[test]
            fn valid_input_is_accepted(
                name in "[A-Za-z][A-Za-z0-9 ]{0,40}",
                category in "[A-Za-z]{1,20}",
                price in 0.0f64..1_000_000.0,
                quantity in 1i64..1_000_000,
            ) {
                let p = NewProduct::new(name.clone(), price, category.clone(), quantity).unwrap();
                prop_assert_eq!(p.name(), name.trim());
                prop_assert_eq!(p.category(), category.trim());
                prop_assert_eq!(p.price(), price);
                prop_assert_eq!(p.quantity(), quantity);
            }

            /// Property: zero or negative quantities are always rejected.
            #[test]
            fn non_positive_quantity_is_rejected(quantity in i64::MIN..=0) {
                prop_assert!(NewProduct::new("Widget", 1.0, "Parts", quantity).is_err());
            }
        }
    }
}
