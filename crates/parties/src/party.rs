use serde::{Deserialize, Serialize};

use stockroom_core::{CustomerId, SupplierId};

/// A customer who can own orders.
///
/// All contact fields are free-form; the document store is schemaless and no
/// shape is imposed on them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerDraft {
    /// Explicit id, honored when provided (lets an operator link a customer
    /// profile to an existing user identity).
    pub id: Option<CustomerId>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

/// Partial update; unspecified fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CustomerPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
}

impl Customer {
    pub fn create(draft: CustomerDraft) -> Self {
        Self {
            id: draft.id.unwrap_or_default(),
            first_name: draft.first_name,
            last_name: draft.last_name,
            email: draft.email,
            phone_number: draft.phone_number,
            address: draft.address,
        }
    }

    pub fn apply_patch(&mut self, patch: CustomerPatch) {
        if let Some(v) = patch.first_name {
            self.first_name = Some(v);
        }
        if let Some(v) = patch.last_name {
            self.last_name = Some(v);
        }
        if let Some(v) = patch.email {
            self.email = Some(v);
        }
        if let Some(v) = patch.phone_number {
            self.phone_number = Some(v);
        }
        if let Some(v) = patch.address {
            self.address = Some(v);
        }
    }
}

/// A supplier that inventory receipts reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: SupplierId,
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierDraft {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

/// Partial update; unspecified fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SupplierPatch {
    pub name: Option<String>,
    pub contact_person: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
}

impl Supplier {
    pub fn create(draft: SupplierDraft) -> Self {
        Self {
            id: SupplierId::new(),
            name: draft.name,
            contact_person: draft.contact_person,
            phone: draft.phone,
            email: draft.email,
            address: draft.address,
        }
    }

    pub fn apply_patch(&mut self, patch: SupplierPatch) {
        if let Some(v) = patch.name {
            self.name = Some(v);
        }
        if let Some(v) = patch.contact_person {
            self.contact_person = Some(v);
        }
        if let Some(v) = patch.phone {
            self.phone = Some(v);
        }
        if let Some(v) = patch.email {
            self.email = Some(v);
        }
        if let Some(v) = patch.address {
            self.address = Some(v);
        }
    }
}
