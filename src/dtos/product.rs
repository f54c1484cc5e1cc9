// src/dtos/product.rs
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::product::{NewProduct, Product};

/// Body of POST and PUT. `id` is accepted so clients can send a product back
/// as they received it, but it never selects the row being written.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

impl From<ProductRequest> for NewProduct {
    fn from(req: ProductRequest) -> Self {
        Self {
            name: req.name,
            description: req.description,
            price: req.price,
        }
    }
}

// Convert from Model to Response DTO
impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_accepts_body_with_or_without_id() {
        let with_id: ProductRequest = serde_json::from_value(json!({
            "id": 7,
            "name": "Product 1",
            "description": "Product description",
            "price": 19.99
        }))
        .unwrap();
        assert_eq!(with_id.id, Some(7));
        assert_eq!(with_id.price, Decimal::new(1999, 2));

        let without_id: ProductRequest = serde_json::from_value(json!({
            "name": "Product 1",
            "description": "Product description",
            "price": 19.99
        }))
        .unwrap();
        assert_eq!(without_id.id, None);
    }

    #[test]
    fn request_requires_all_mutable_fields() {
        let missing_price = serde_json::from_value::<ProductRequest>(json!({
            "name": "Product 1",
            "description": "Product description"
        }));
        assert!(missing_price.is_err());
    }

    #[test]
    fn response_serializes_price_as_number() {
        let response = ProductResponse::from(Product {
            id: 1,
            name: "Product 1".into(),
            description: "Product description".into(),
            price: Decimal::new(1999, 2),
        });

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "name": "Product 1",
                "description": "Product description",
                "price": 19.99
            })
        );
    }
}
