use serde::{Deserialize, Serialize};
use serde_json::Value;

use shopfloor_core::{DomainError, DomainResult, Entity, OrderId, ProductId, Validator};

/// A persisted order record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
}

impl Entity for Order {
    type Id = OrderId;

    fn id(&self) -> OrderId {
        self.id
    }
}

/// Validated input for the place-order operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrder {
    product_id: ProductId,
    quantity: i64,
}

impl NewOrder {
    pub fn new(product_id: ProductId, quantity: i64) -> DomainResult<Self> {
        Self::from_json(&serde_json::json!({
            "product_id": product_id.get(),
            "quantity": quantity,
        }))
    }

    /// Validate a loosely-typed request body, collecting every failing field.
    pub fn from_json(body: &Value) -> DomainResult<Self> {
        let mut v = Validator::new();
        let product_id = v.integer("product_id", body.get("product_id"));
        let quantity = v.integer_greater_than("quantity", body.get("quantity"), 0);
        v.finish()?;

        let (Some(product_id), Some(quantity)) = (product_id, quantity) else {
            return Err(DomainError::invariant("validator passed with a missing field"));
        };

        Ok(Self {
            product_id: ProductId::new(product_id),
            quantity,
        })
    }

    pub fn product_id(&self) -> ProductId {
        self.product_id
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Attach the storage-generated identifier.
    pub fn into_order(self, id: OrderId) -> Order {
        Order {
            id,
            product_id: self.product_id,
            quantity: self.quantity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_integer_fields() {
        let order = NewOrder::from_json(&json!({ "product_id": 4, "quantity": "2" })).unwrap();
        assert_eq!(order.product_id(), ProductId::new(4));
        assert_eq!(order.quantity(), 2);
    }

    #[test]
    fn rejects_missing_product_and_zero_quantity() {
        let err = NewOrder::from_json(&json!({ "quantity": 0 })).unwrap_err();
        match err {
            DomainError::Validation(errors) => {
                assert_eq!(errors.fields(), vec!["product_id", "quantity"]);
            }
            other => panic!("Expected Validation error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_fractional_product_id() {
        let err = NewOrder::from_json(&json!({ "product_id": 1.5, "quantity": 1 })).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn product_id_is_not_range_checked() {
        // Existence of the product is the storage engine's concern.
        let order = NewOrder::new(ProductId::new(-7), 1).unwrap();
        assert_eq!(order.product_id().get(), -7);
    }

    #[test]
    fn into_order_serializes_flat() {
        let order = NewOrder::new(ProductId::new(3), 5)
            .unwrap()
            .into_order(OrderId::new(11));
        assert_eq!(order.id(), OrderId::new(11));
        assert_eq!(
            serde_json::to_value(&order).unwrap(),
            json!({ "id": 11, "product_id": 3, "quantity": 5 })
        );
    }
}
