//! `stockroom-parties` — customers and suppliers.

pub mod party;

pub use party::{Customer, CustomerDraft, CustomerPatch, Supplier, SupplierDraft, SupplierPatch};
