use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// A persistable document: one JSON value in a named collection, keyed by id.
pub trait Document: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name; stable across backends.
    const COLLECTION: &'static str;

    /// Primary key of this document.
    fn document_id(&self) -> Uuid;
}

/// Document store operation error.
///
/// These are **infrastructure errors** (storage, encoding), as opposed to
/// domain errors (validation, invariants). The API layer maps them to 500s.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("duplicate document id {0}")]
    Duplicate(Uuid),

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("document encoding error: {0}")]
    Codec(String),
}

impl From<StoreError> for stockroom_core::DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(id) => {
                stockroom_core::DomainError::conflict(format!("duplicate document id {id}"))
            }
            other => stockroom_core::DomainError::store(other.to_string()),
        }
    }
}

/// Backend-agnostic CRUD surface over one collection.
///
/// Listing returns whole collections; callers filter in memory. The
/// collections here are small reference data, and keeping the trait free of
/// query syntax keeps both backends trivially equivalent.
#[async_trait::async_trait]
pub trait DocumentStore<T: Document>: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Option<T>, StoreError>;

    async fn list(&self) -> Result<Vec<T>, StoreError>;

    /// Insert a new document; fails on a duplicate id.
    async fn insert(&self, doc: &T) -> Result<(), StoreError>;

    /// Replace an existing document; `false` if no document had its id.
    async fn replace(&self, doc: &T) -> Result<bool, StoreError>;

    /// Remove a document; `false` if no document had the id.
    async fn remove(&self, id: Uuid) -> Result<bool, StoreError>;
}
