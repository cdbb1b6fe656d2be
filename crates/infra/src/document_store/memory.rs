use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use super::r#trait::{Document, DocumentStore, StoreError};

/// In-memory document store for dev/test.
#[derive(Debug)]
pub struct InMemoryStore<T> {
    inner: RwLock<HashMap<Uuid, T>>,
}

impl<T> InMemoryStore<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<T> Default for InMemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl<T: Document> DocumentStore<T> for InMemoryStore<T> {
    async fn get(&self, id: Uuid) -> Result<Option<T>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))?;
        Ok(map.get(&id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        let map = self
            .inner
            .read()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))?;
        Ok(map.values().cloned().collect())
    }

    async fn insert(&self, doc: &T) -> Result<(), StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))?;
        let id = doc.document_id();
        if map.contains_key(&id) {
            return Err(StoreError::Duplicate(id));
        }
        map.insert(id, doc.clone());
        Ok(())
    }

    async fn replace(&self, doc: &T) -> Result<bool, StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))?;
        let id = doc.document_id();
        if !map.contains_key(&id) {
            return Ok(false);
        }
        map.insert(id, doc.clone());
        Ok(true)
    }

    async fn remove(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut map = self
            .inner
            .write()
            .map_err(|_| StoreError::Backend("store lock poisoned".to_string()))?;
        Ok(map.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Note {
        id: Uuid,
        body: String,
    }

    impl Document for Note {
        const COLLECTION: &'static str = "notes";

        fn document_id(&self) -> Uuid {
            self.id
        }
    }

    fn note(body: &str) -> Note {
        Note {
            id: Uuid::now_v7(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn insert_get_round_trip() {
        let store = InMemoryStore::new();
        let n = note("hello");
        store.insert(&n).await.unwrap();
        assert_eq!(store.get(n.id).await.unwrap(), Some(n));
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_id() {
        let store = InMemoryStore::new();
        let n = note("hello");
        store.insert(&n).await.unwrap();
        assert!(matches!(
            store.insert(&n).await,
            Err(StoreError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn replace_requires_existing_document() {
        let store = InMemoryStore::new();
        let mut n = note("v1");
        assert!(!store.replace(&n).await.unwrap());

        store.insert(&n).await.unwrap();
        n.body = "v2".to_string();
        assert!(store.replace(&n).await.unwrap());
        assert_eq!(store.get(n.id).await.unwrap().unwrap().body, "v2");
    }

    #[tokio::test]
    async fn remove_reports_absence() {
        let store = InMemoryStore::new();
        let n = note("bye");
        store.insert(&n).await.unwrap();
        assert!(store.remove(n.id).await.unwrap());
        assert!(!store.remove(n.id).await.unwrap());
        assert_eq!(store.get(n.id).await.unwrap(), None);
    }
}
