//! `stockroom-sales` — customer orders and their line items.

pub mod order;

pub use order::{
    price_lines, total_amount, Order, OrderDraft, OrderItem, OrderLine, OrderPatch, PricedLine,
};
