//! `stockroom-inventory` — inventory receipts (goods received from suppliers).

pub mod receipt;

pub use receipt::{Receipt, ReceiptDraft, ReceiptPatch};
