use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, ProductId, ReceiptId, SupplierId};

/// An inventory receipt: a quantity of one product received from a supplier.
///
/// Creating, updating, or deleting a receipt adjusts the linked product's
/// on-hand quantity by the corresponding delta (reconciliation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receipt {
    pub id: ReceiptId,
    pub product_id: ProductId,
    pub supplier_id: Option<SupplierId>,
    pub quantity_received: i64,
    pub date_received: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
}

/// Payload for recording a receipt.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptDraft {
    pub product_id: ProductId,
    pub supplier_id: Option<SupplierId>,
    pub quantity_received: i64,
    pub date_received: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
}

/// Partial update; unspecified fields are left unchanged.
///
/// `product_id` is deliberately not patchable: the quantity delta always
/// applies to the product the receipt was recorded against.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReceiptPatch {
    pub supplier_id: Option<SupplierId>,
    pub quantity_received: Option<i64>,
    pub date_received: Option<DateTime<Utc>>,
    pub remarks: Option<String>,
}

impl Receipt {
    /// Validate a draft and build the receipt document.
    pub fn create(draft: ReceiptDraft) -> Result<Self, DomainError> {
        if draft.quantity_received < 0 {
            return Err(DomainError::validation(
                "quantity received cannot be negative",
            ));
        }

        Ok(Self {
            id: ReceiptId::new(),
            product_id: draft.product_id,
            supplier_id: draft.supplier_id,
            quantity_received: draft.quantity_received,
            date_received: draft.date_received,
            remarks: draft.remarks,
        })
    }

    /// Merge a patch, returning the change in `quantity_received`
    /// (new − old) for the caller to reconcile against the product.
    pub fn apply_patch(&mut self, patch: ReceiptPatch) -> Result<i64, DomainError> {
        let new_quantity = patch.quantity_received.unwrap_or(self.quantity_received);
        if new_quantity < 0 {
            return Err(DomainError::validation(
                "quantity received cannot be negative",
            ));
        }

        let delta = new_quantity - self.quantity_received;
        self.quantity_received = new_quantity;
        if let Some(v) = patch.supplier_id {
            self.supplier_id = Some(v);
        }
        if let Some(v) = patch.date_received {
            self.date_received = Some(v);
        }
        if let Some(v) = patch.remarks {
            self.remarks = Some(v);
        }
        Ok(delta)
    }
}
