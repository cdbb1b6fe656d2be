//! Backend-agnostic document storage.

pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod r#trait;

pub use memory::InMemoryStore;
#[cfg(feature = "postgres")]
pub use postgres::PostgresStore;
pub use r#trait::{Document, DocumentStore, StoreError};
