use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{CustomerId, DomainError, OrderId, OrderItemId, ProductId};
use stockroom_products::Product;

/// A customer order.
///
/// `total_amount` is computed from product prices at creation time and never
/// recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub customer_id: CustomerId,
    pub order_date: DateTime<Utc>,
    pub total_amount: f64,
}

/// One line of an order, persisted per item when the order is created.
///
/// `price` is the product's unit price the total was computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub price: f64,
}

/// A requested order line.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// Payload for placing an order.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderDraft {
    pub customer_id: CustomerId,
    #[serde(default)]
    pub items: Vec<OrderLine>,
}

/// Partial update; unspecified fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OrderPatch {
    pub customer_id: Option<CustomerId>,
    pub order_date: Option<DateTime<Utc>>,
    pub total_amount: Option<f64>,
}

/// An order line resolved and priced against the current product document.
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub product_id: ProductId,
    pub quantity: i64,
    pub unit_price: f64,
}

impl PricedLine {
    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

impl OrderDraft {
    /// Structural validation: an order must carry at least one line and
    /// every line must request a positive quantity.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.items.is_empty() {
            return Err(DomainError::validation("order must contain items"));
        }
        if self.items.iter().any(|line| line.quantity <= 0) {
            return Err(DomainError::validation(
                "item quantity must be greater than zero",
            ));
        }
        Ok(())
    }
}

/// Price every line at the product's current price and check it against
/// on-hand stock.
///
/// Requested quantities are accumulated per product, so several lines for
/// the same product cannot jointly exceed what a single line could not.
/// Fails on the first offending line without partial results.
pub fn price_lines(
    lines: &[OrderLine],
    products: &HashMap<ProductId, Product>,
) -> Result<Vec<PricedLine>, DomainError> {
    let mut reserved: HashMap<ProductId, i64> = HashMap::new();
    let mut priced = Vec::with_capacity(lines.len());

    for line in lines {
        let product = products
            .get(&line.product_id)
            .ok_or_else(|| DomainError::not_found(format!("product {} not found", line.product_id)))?;

        let requested = reserved.entry(line.product_id).or_insert(0);
        *requested += line.quantity;
        if product.quantity < *requested {
            return Err(DomainError::insufficient_stock(product.title.clone()));
        }

        priced.push(PricedLine {
            product_id: line.product_id,
            quantity: line.quantity,
            unit_price: product.price,
        });
    }

    Ok(priced)
}

/// Sum of line totals; the amount stored on the order document.
pub fn total_amount(priced: &[PricedLine]) -> f64 {
    priced.iter().map(PricedLine::line_total).sum()
}

impl Order {
    pub fn create(customer_id: CustomerId, total_amount: f64) -> Self {
        Self {
            id: OrderId::new(),
            customer_id,
            order_date: Utc::now(),
            total_amount,
        }
    }

    pub fn apply_patch(&mut self, patch: OrderPatch) {
        if let Some(v) = patch.customer_id {
            self.customer_id = v;
        }
        if let Some(v) = patch.order_date {
            self.order_date = v;
        }
        if let Some(v) = patch.total_amount {
            self.total_amount = v;
        }
    }
}

impl OrderItem {
    pub fn from_line(order_id: OrderId, line: &PricedLine) -> Self {
        Self {
            id: OrderItemId::new(),
            order_id,
            product_id: line.product_id,
            quantity: line.quantity,
            price: line.unit_price,
        }
    }
}
