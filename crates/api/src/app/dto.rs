use serde::Deserialize;

use stockroom_products::Product;
use stockroom_sales::{Order, OrderItem};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct BatchDeleteRequest {
    #[serde(rename = "productIds", default)]
    pub product_ids: Vec<String>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Product document plus its derived profit margin.
pub fn product_to_json(product: &Product) -> serde_json::Value {
    let mut value = serde_json::to_value(product).unwrap_or_else(|_| serde_json::json!({}));
    if let Some(map) = value.as_object_mut() {
        map.insert(
            "profitMargin".to_string(),
            serde_json::json!(product.profit_margin()),
        );
    }
    value
}

pub fn products_to_json(products: &[Product]) -> serde_json::Value {
    serde_json::Value::Array(products.iter().map(product_to_json).collect())
}

/// Order document with its line items attached.
pub fn order_with_items_to_json(order: &Order, items: &[OrderItem]) -> serde_json::Value {
    let mut value = serde_json::to_value(order).unwrap_or_else(|_| serde_json::json!({}));
    if let Some(map) = value.as_object_mut() {
        map.insert(
            "items".to_string(),
            serde_json::to_value(items).unwrap_or_else(|_| serde_json::json!([])),
        );
    }
    value
}
