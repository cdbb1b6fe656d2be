//! `stockroom-infra` — document persistence.
//!
//! One schemaless collection per entity, behind a backend-agnostic
//! [`DocumentStore`] trait: an in-memory store for dev/test and a
//! Postgres-backed store behind the `postgres` feature.

pub mod document_store;
pub mod stores;

pub use document_store::{Document, DocumentStore, InMemoryStore, StoreError};
#[cfg(feature = "postgres")]
pub use document_store::PostgresStore;
pub use stores::Stores;
