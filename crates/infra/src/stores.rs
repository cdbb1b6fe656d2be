//! One store per collection, bundled for the application layer.

use std::sync::Arc;

use uuid::Uuid;

use stockroom_auth::User;
use stockroom_inventory::Receipt;
use stockroom_parties::{Customer, Supplier};
use stockroom_products::Product;
use stockroom_sales::{Order, OrderItem};

use crate::document_store::{Document, DocumentStore, InMemoryStore};
#[cfg(feature = "postgres")]
use crate::document_store::StoreError;

impl Document for User {
    const COLLECTION: &'static str = "users";

    fn document_id(&self) -> Uuid {
        *self.id.as_uuid()
    }
}

impl Document for Product {
    const COLLECTION: &'static str = "products";

    fn document_id(&self) -> Uuid {
        *self.id.as_uuid()
    }
}

impl Document for Customer {
    const COLLECTION: &'static str = "customers";

    fn document_id(&self) -> Uuid {
        *self.id.as_uuid()
    }
}

impl Document for Supplier {
    const COLLECTION: &'static str = "suppliers";

    fn document_id(&self) -> Uuid {
        *self.id.as_uuid()
    }
}

impl Document for Order {
    const COLLECTION: &'static str = "orders";

    fn document_id(&self) -> Uuid {
        *self.id.as_uuid()
    }
}

impl Document for OrderItem {
    const COLLECTION: &'static str = "order_items";

    fn document_id(&self) -> Uuid {
        *self.id.as_uuid()
    }
}

impl Document for Receipt {
    const COLLECTION: &'static str = "receipts";

    fn document_id(&self) -> Uuid {
        *self.id.as_uuid()
    }
}

/// The six domain collections plus the credential store.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn DocumentStore<User>>,
    pub products: Arc<dyn DocumentStore<Product>>,
    pub customers: Arc<dyn DocumentStore<Customer>>,
    pub suppliers: Arc<dyn DocumentStore<Supplier>>,
    pub orders: Arc<dyn DocumentStore<Order>>,
    pub order_items: Arc<dyn DocumentStore<OrderItem>>,
    pub receipts: Arc<dyn DocumentStore<Receipt>>,
}

impl Stores {
    /// In-memory backend (dev/test).
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryStore::new()),
            products: Arc::new(InMemoryStore::new()),
            customers: Arc::new(InMemoryStore::new()),
            suppliers: Arc::new(InMemoryStore::new()),
            orders: Arc::new(InMemoryStore::new()),
            order_items: Arc::new(InMemoryStore::new()),
            receipts: Arc::new(InMemoryStore::new()),
        }
    }

    /// Postgres backend: connects a pool, ensures the schema, and hands
    /// every collection a view over it.
    #[cfg(feature = "postgres")]
    pub async fn postgres(database_url: &str) -> Result<Self, StoreError> {
        use crate::document_store::postgres::{connect, PostgresStore};

        let pool = connect(database_url).await?;
        Ok(Self {
            users: Arc::new(PostgresStore::new(pool.clone())),
            products: Arc::new(PostgresStore::new(pool.clone())),
            customers: Arc::new(PostgresStore::new(pool.clone())),
            suppliers: Arc::new(PostgresStore::new(pool.clone())),
            orders: Arc::new(PostgresStore::new(pool.clone())),
            order_items: Arc::new(PostgresStore::new(pool.clone())),
            receipts: Arc::new(PostgresStore::new(pool)),
        })
    }
}
