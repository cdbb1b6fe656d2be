use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, ProductId};

/// A catalog product (a record/album in the shop's catalog).
///
/// # Invariants
/// - `list_price` and `cost_price` are finite, non-negative, and
///   `cost_price <= list_price`.
/// - `quantity` is never negative; it is additionally mutated as a side
///   effect of inventory receipts and orders (reconciliation).
///
/// The profit margin is derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub price: f64,
    pub sku: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub list_price: f64,
    pub cost_price: f64,
    pub quantity: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for creating a product.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    #[serde(default)]
    pub title: String,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub price: f64,
    pub sku: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub list_price: Option<f64>,
    pub cost_price: Option<f64>,
    pub quantity: Option<i64>,
}

/// Partial update payload; unspecified fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    pub title: Option<String>,
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub release_date: Option<DateTime<Utc>>,
    pub price: Option<f64>,
    pub sku: Option<String>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub list_price: Option<f64>,
    pub cost_price: Option<f64>,
    pub quantity: Option<i64>,
}

impl Product {
    /// Validate a draft and build the product document.
    pub fn create(draft: ProductDraft) -> Result<Self, DomainError> {
        let list_price = draft
            .list_price
            .ok_or_else(|| DomainError::validation("valid list price is required"))?;
        let cost_price = draft
            .cost_price
            .ok_or_else(|| DomainError::validation("valid cost price is required"))?;
        let quantity = draft
            .quantity
            .ok_or_else(|| DomainError::validation("quantity is required"))?;

        validate_pricing(list_price, cost_price)?;
        if quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }

        let now = Utc::now();
        Ok(Self {
            id: ProductId::new(),
            title: draft.title,
            artist: draft.artist,
            genre: draft.genre,
            release_date: draft.release_date,
            price: draft.price,
            sku: draft.sku,
            location: draft.location,
            category: draft.category,
            list_price,
            cost_price,
            quantity,
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge a patch into the document, revalidating the result.
    ///
    /// Unspecified fields keep their current values (full-document merge
    /// semantics).
    pub fn apply_patch(&mut self, patch: ProductPatch) -> Result<(), DomainError> {
        let list_price = patch.list_price.unwrap_or(self.list_price);
        let cost_price = patch.cost_price.unwrap_or(self.cost_price);
        let quantity = patch.quantity.unwrap_or(self.quantity);

        validate_pricing(list_price, cost_price)?;
        if quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }

        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(artist) = patch.artist {
            self.artist = Some(artist);
        }
        if let Some(genre) = patch.genre {
            self.genre = Some(genre);
        }
        if let Some(release_date) = patch.release_date {
            self.release_date = Some(release_date);
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(sku) = patch.sku {
            self.sku = Some(sku);
        }
        if let Some(location) = patch.location {
            self.location = Some(location);
        }
        if let Some(category) = patch.category {
            self.category = Some(category);
        }
        self.list_price = list_price;
        self.cost_price = cost_price;
        self.quantity = quantity;
        self.touch();
        Ok(())
    }

    /// Derived profit margin as a percentage, rounded to two decimals.
    ///
    /// Zero when `list_price` is zero (nothing to margin against).
    pub fn profit_margin(&self) -> f64 {
        if self.list_price == 0.0 {
            return 0.0;
        }
        let raw = (self.list_price - self.cost_price) / self.list_price * 100.0;
        (raw * 100.0).round() / 100.0
    }

    /// Refresh `updated_at`; called on every persisted mutation.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

fn validate_pricing(list_price: f64, cost_price: f64) -> Result<(), DomainError> {
    if !list_price.is_finite() || list_price < 0.0 {
        return Err(DomainError::validation("valid list price is required"));
    }
    if !cost_price.is_finite() || cost_price < 0.0 {
        return Err(DomainError::validation("valid cost price is required"));
    }
    if cost_price > list_price {
        return Err(DomainError::validation(
            "cost price cannot be greater than list price",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn draft(list: f64, cost: f64, quantity: i64) -> ProductDraft {
        ProductDraft {
            title: "Blue Train".to_string(),
            artist: Some("John Coltrane".to_string()),
            price: 19.99,
            list_price: Some(list),
            cost_price: Some(cost),
            quantity: Some(quantity),
            ..ProductDraft::default()
        }
    }

    #[test]
    fn create_accepts_valid_pricing() {
        let product = Product::create(draft(25.0, 10.0, 5)).unwrap();
        assert_eq!(product.quantity, 5);
        assert_eq!(product.profit_margin(), 60.0);
    }

    #[test]
    fn create_rejects_missing_list_price() {
        let mut d = draft(25.0, 10.0, 5);
        d.list_price = None;
        let err = Product::create(d).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn create_rejects_negative_prices() {
        assert!(Product::create(draft(-1.0, 0.0, 0)).is_err());
        assert!(Product::create(draft(10.0, -1.0, 0)).is_err());
    }

    #[test]
    fn create_rejects_cost_above_list() {
        let err = Product::create(draft(10.0, 11.0, 0)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn create_rejects_negative_quantity() {
        let err = Product::create(draft(10.0, 5.0, -1)).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn profit_margin_rounds_to_two_decimals() {
        let product = Product::create(draft(3.0, 1.0, 0)).unwrap();
        // (3-1)/3*100 = 66.666... -> 66.67
        assert_eq!(product.profit_margin(), 66.67);
    }

    #[test]
    fn profit_margin_is_zero_for_zero_list_price() {
        let product = Product::create(draft(0.0, 0.0, 0)).unwrap();
        assert_eq!(product.profit_margin(), 0.0);
    }

    #[test]
    fn patch_merges_only_specified_fields() {
        let mut product = Product::create(draft(25.0, 10.0, 5)).unwrap();
        product
            .apply_patch(ProductPatch {
                quantity: Some(9),
                ..ProductPatch::default()
            })
            .unwrap();

        assert_eq!(product.quantity, 9);
        assert_eq!(product.title, "Blue Train");
        assert_eq!(product.list_price, 25.0);
    }

    #[test]
    fn patch_rejects_merged_cost_above_list() {
        let mut product = Product::create(draft(25.0, 10.0, 5)).unwrap();
        let err = product
            .apply_patch(ProductPatch {
                list_price: Some(5.0),
                ..ProductPatch::default()
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        // Document unchanged on rejected patch.
        assert_eq!(product.list_price, 25.0);
    }

    proptest! {
        #[test]
        fn margin_formula_holds_for_valid_pricing(
            list in 0.01f64..10_000.0,
            frac in 0.0f64..=1.0,
        ) {
            let cost = list * frac;
            let product = Product::create(draft(list, cost, 0)).unwrap();
            let expected = ((list - cost) / list * 100.0 * 100.0).round() / 100.0;
            prop_assert_eq!(product.profit_margin(), expected);
        }

        #[test]
        fn margin_is_bounded_for_valid_pricing(
            list in 0.01f64..10_000.0,
            frac in 0.0f64..=1.0,
        ) {
            let product = Product::create(draft(list, list * frac, 0)).unwrap();
            let margin = product.profit_margin();
            prop_assert!((0.0..=100.0).contains(&margin));
        }
    }
}
