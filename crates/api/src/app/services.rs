//! Application services: stores, token service, and the reconciliation
//! workflow that keeps `Product.quantity` in sync with inventory and order
//! writes.
//!
//! Every multi-document sequence runs under `stock_lock`, a process-wide
//! single-writer boundary, so two concurrent mutations of the same product
//! cannot interleave mid-sequence. Each step is still a plain per-document
//! write applied in a fixed order.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

use stockroom_auth::{TokenService, User};
use stockroom_core::{CustomerId, DomainError, OrderId, ProductId, ReceiptId, SupplierId};
use stockroom_infra::{DocumentStore, Stores};
use stockroom_inventory::{Receipt, ReceiptDraft, ReceiptPatch};
use stockroom_parties::{
    Customer, CustomerDraft, CustomerPatch, Supplier, SupplierDraft, SupplierPatch,
};
use stockroom_products::{Product, ProductDraft, ProductPatch};
use stockroom_sales::{price_lines, total_amount, Order, OrderDraft, OrderItem, OrderPatch};

pub struct AppServices {
    stores: Stores,
    tokens: Arc<TokenService>,
    stock_lock: Mutex<()>,
}

impl AppServices {
    pub fn new(stores: Stores, tokens: Arc<TokenService>) -> Self {
        Self {
            stores,
            tokens,
            stock_lock: Mutex::new(()),
        }
    }

    // -------------------------
    // Credentials
    // -------------------------

    pub async fn register(&self, username: &str, password: &str) -> Result<String, DomainError> {
        let username_trimmed = username.trim();
        let taken = self
            .stores
            .users
            .list()
            .await?
            .iter()
            .any(|u| u.username == username_trimmed);
        if taken {
            return Err(DomainError::conflict("user already exists"));
        }

        let user = User::register(username, password)?;
        self.stores.users.insert(&user).await?;
        tracing::info!(username = %user.username, "user registered");

        self.issue_token(&user)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<String, DomainError> {
        let user = self
            .stores
            .users
            .list()
            .await?
            .into_iter()
            .find(|u| u.username == username.trim())
            .ok_or_else(|| DomainError::unauthenticated("invalid credentials"))?;

        if !user.verify_password(password) {
            return Err(DomainError::unauthenticated("invalid credentials"));
        }

        self.issue_token(&user)
    }

    fn issue_token(&self, user: &User) -> Result<String, DomainError> {
        self.tokens
            .issue(user)
            .map_err(|e| DomainError::store(e.to_string()))
    }

    // -------------------------
    // Products
    // -------------------------

    pub async fn products_list(&self) -> Result<Vec<Product>, DomainError> {
        Ok(self.stores.products.list().await?)
    }

    pub async fn products_get(&self, id: ProductId) -> Result<Product, DomainError> {
        self.stores
            .products
            .get(*id.as_uuid())
            .await?
            .ok_or_else(|| DomainError::not_found("product not found"))
    }

    pub async fn products_create(&self, draft: ProductDraft) -> Result<Product, DomainError> {
        let product = Product::create(draft)?;
        self.stores.products.insert(&product).await?;
        Ok(product)
    }

    pub async fn products_update(
        &self,
        id: ProductId,
        patch: ProductPatch,
    ) -> Result<Product, DomainError> {
        let mut product = self.products_get(id).await?;
        product.apply_patch(patch)?;
        if !self.stores.products.replace(&product).await? {
            return Err(DomainError::not_found("product not found"));
        }
        Ok(product)
    }

    pub async fn products_delete(&self, id: ProductId) -> Result<Product, DomainError> {
        let product = self.products_get(id).await?;
        self.stores.products.remove(*id.as_uuid()).await?;
        Ok(product)
    }

    pub async fn products_batch_delete(
        &self,
        ids: &[ProductId],
    ) -> Result<usize, DomainError> {
        if ids.is_empty() {
            return Err(DomainError::validation(
                "please provide an array of product IDs",
            ));
        }

        let mut deleted = 0;
        for id in ids {
            if self.stores.products.remove(*id.as_uuid()).await? {
                deleted += 1;
            }
        }

        if deleted == 0 {
            return Err(DomainError::not_found("no products found to delete"));
        }
        Ok(deleted)
    }

    pub async fn products_by_location(&self, location: &str) -> Result<Vec<Product>, DomainError> {
        Ok(self
            .products_list()
            .await?
            .into_iter()
            .filter(|p| p.location.as_deref() == Some(location))
            .collect())
    }

    pub async fn products_by_category(&self, category: &str) -> Result<Vec<Product>, DomainError> {
        Ok(self
            .products_list()
            .await?
            .into_iter()
            .filter(|p| p.category.as_deref() == Some(category))
            .collect())
    }

    pub async fn products_by_sku(&self, sku: &str) -> Result<Vec<Product>, DomainError> {
        Ok(self
            .products_list()
            .await?
            .into_iter()
            .filter(|p| p.sku.as_deref() == Some(sku))
            .collect())
    }

    // -------------------------
    // Inventory receipts (reconciliation call sites 1-3)
    // -------------------------

    pub async fn receipts_list(&self) -> Result<Vec<Receipt>, DomainError> {
        Ok(self.stores.receipts.list().await?)
    }

    pub async fn receipts_get(&self, id: ReceiptId) -> Result<Receipt, DomainError> {
        self.stores
            .receipts
            .get(*id.as_uuid())
            .await?
            .ok_or_else(|| DomainError::not_found("inventory item not found"))
    }

    /// Record a receipt and add its quantity to the linked product.
    pub async fn receipts_create(&self, draft: ReceiptDraft) -> Result<Receipt, DomainError> {
        let _guard = self.stock_lock.lock().await;

        let mut product = self.products_get(draft.product_id).await?;
        let receipt = Receipt::create(draft)?;
        self.stores.receipts.insert(&receipt).await?;

        product.quantity += receipt.quantity_received;
        product.touch();
        self.stores.products.replace(&product).await?;

        tracing::info!(
            receipt_id = %receipt.id,
            product_id = %product.id,
            quantity_received = receipt.quantity_received,
            "inventory receipt recorded"
        );
        Ok(receipt)
    }

    /// Update a receipt; a changed `quantity_received` moves the linked
    /// product's quantity by the delta.
    pub async fn receipts_update(
        &self,
        id: ReceiptId,
        patch: ReceiptPatch,
    ) -> Result<Receipt, DomainError> {
        let _guard = self.stock_lock.lock().await;

        let mut receipt = self.receipts_get(id).await?;
        let delta = receipt.apply_patch(patch)?;

        if delta != 0 {
            // A receipt whose product has since been deleted still updates;
            // the delta simply has nowhere to land.
            if let Some(mut product) = self.stores.products.get(*receipt.product_id.as_uuid()).await? {
                product.quantity += delta;
                product.touch();
                self.stores.products.replace(&product).await?;
            }
        }

        self.stores.receipts.replace(&receipt).await?;
        Ok(receipt)
    }

    /// Delete a receipt, subtracting its quantity from the linked product
    /// (inverse of create).
    pub async fn receipts_delete(&self, id: ReceiptId) -> Result<(), DomainError> {
        let _guard = self.stock_lock.lock().await;

        let receipt = self.receipts_get(id).await?;

        if let Some(mut product) = self.stores.products.get(*receipt.product_id.as_uuid()).await? {
            product.quantity -= receipt.quantity_received;
            product.touch();
            self.stores.products.replace(&product).await?;
        }

        self.stores.receipts.remove(*id.as_uuid()).await?;
        Ok(())
    }

    pub async fn receipts_by_supplier(
        &self,
        supplier_id: SupplierId,
    ) -> Result<Vec<Receipt>, DomainError> {
        Ok(self
            .receipts_list()
            .await?
            .into_iter()
            .filter(|r| r.supplier_id == Some(supplier_id))
            .collect())
    }

    // -------------------------
    // Orders (reconciliation call sites 4-5)
    // -------------------------

    pub async fn orders_list(&self) -> Result<Vec<Order>, DomainError> {
        Ok(self.stores.orders.list().await?)
    }

    pub async fn orders_get(&self, id: OrderId) -> Result<Order, DomainError> {
        self.stores
            .orders
            .get(*id.as_uuid())
            .await?
            .ok_or_else(|| DomainError::not_found("order not found"))
    }

    /// Place an order: price and stock-check every line, persist the order,
    /// then persist one item per line while decrementing product quantities.
    ///
    /// A failing line aborts before anything is written.
    pub async fn orders_create(&self, draft: OrderDraft) -> Result<Order, DomainError> {
        draft.validate()?;

        let _guard = self.stock_lock.lock().await;

        let mut products: HashMap<ProductId, Product> = HashMap::new();
        for line in &draft.items {
            if !products.contains_key(&line.product_id) {
                let product = self
                    .stores
                    .products
                    .get(*line.product_id.as_uuid())
                    .await?
                    .ok_or_else(|| {
                        DomainError::not_found(format!("product {} not found", line.product_id))
                    })?;
                products.insert(line.product_id, product);
            }
        }

        let priced = price_lines(&draft.items, &products)?;
        let order = Order::create(draft.customer_id, total_amount(&priced));
        self.stores.orders.insert(&order).await?;

        for line in &priced {
            let item = OrderItem::from_line(order.id, line);
            self.stores.order_items.insert(&item).await?;

            if let Some(product) = products.get_mut(&line.product_id) {
                product.quantity -= line.quantity;
                product.touch();
                self.stores.products.replace(product).await?;
            }
        }

        tracing::info!(
            order_id = %order.id,
            customer_id = %order.customer_id,
            total_amount = order.total_amount,
            items = priced.len(),
            "order placed"
        );
        Ok(order)
    }

    pub async fn orders_update(
        &self,
        id: OrderId,
        patch: OrderPatch,
    ) -> Result<Order, DomainError> {
        let mut order = self.orders_get(id).await?;
        order.apply_patch(patch);
        if !self.stores.orders.replace(&order).await? {
            return Err(DomainError::not_found("order not found"));
        }
        Ok(order)
    }

    /// Delete an order, restocking every line item (inverse of create).
    pub async fn orders_delete(&self, id: OrderId) -> Result<(), DomainError> {
        let _guard = self.stock_lock.lock().await;
        self.orders_delete_locked(id).await
    }

    /// Order deletion body; callers must hold `stock_lock`.
    async fn orders_delete_locked(&self, id: OrderId) -> Result<(), DomainError> {
        let order = self.orders_get(id).await?;

        let items: Vec<OrderItem> = self
            .stores
            .order_items
            .list()
            .await?
            .into_iter()
            .filter(|item| item.order_id == order.id)
            .collect();

        for item in &items {
            if let Some(mut product) = self.stores.products.get(*item.product_id.as_uuid()).await? {
                product.quantity += item.quantity;
                product.touch();
                self.stores.products.replace(&product).await?;
            }
        }

        for item in &items {
            self.stores.order_items.remove(*item.id.as_uuid()).await?;
        }

        self.stores.orders.remove(*id.as_uuid()).await?;
        tracing::info!(order_id = %id, restocked_items = items.len(), "order deleted");
        Ok(())
    }

    pub async fn order_items(&self, order_id: OrderId) -> Result<Vec<OrderItem>, DomainError> {
        Ok(self
            .stores
            .order_items
            .list()
            .await?
            .into_iter()
            .filter(|item| item.order_id == order_id)
            .collect())
    }

    // -------------------------
    // Customers
    // -------------------------

    pub async fn customers_list(&self) -> Result<Vec<Customer>, DomainError> {
        Ok(self.stores.customers.list().await?)
    }

    pub async fn customers_get(&self, id: CustomerId) -> Result<Customer, DomainError> {
        self.stores
            .customers
            .get(*id.as_uuid())
            .await?
            .ok_or_else(|| DomainError::not_found("customer not found"))
    }

    pub async fn customers_create(&self, draft: CustomerDraft) -> Result<Customer, DomainError> {
        let customer = Customer::create(draft);
        self.stores.customers.insert(&customer).await?;
        Ok(customer)
    }

    pub async fn customers_update(
        &self,
        id: CustomerId,
        patch: CustomerPatch,
    ) -> Result<Customer, DomainError> {
        let mut customer = self.customers_get(id).await?;
        customer.apply_patch(patch);
        if !self.stores.customers.replace(&customer).await? {
            return Err(DomainError::not_found("customer not found"));
        }
        Ok(customer)
    }

    /// Delete a customer and cascade to their orders: each order is deleted
    /// through the restocking workflow, so no order items or reserved stock
    /// are left behind.
    pub async fn customers_delete(&self, id: CustomerId) -> Result<(), DomainError> {
        let _guard = self.stock_lock.lock().await;

        let customer = self.customers_get(id).await?;

        let order_ids: Vec<OrderId> = self
            .stores
            .orders
            .list()
            .await?
            .into_iter()
            .filter(|o| o.customer_id == customer.id)
            .map(|o| o.id)
            .collect();

        for order_id in &order_ids {
            self.orders_delete_locked(*order_id).await?;
        }

        self.stores.customers.remove(*id.as_uuid()).await?;
        tracing::info!(customer_id = %id, cascaded_orders = order_ids.len(), "customer deleted");
        Ok(())
    }

    pub async fn customer_orders(&self, id: CustomerId) -> Result<Vec<Order>, DomainError> {
        Ok(self
            .orders_list()
            .await?
            .into_iter()
            .filter(|o| o.customer_id == id)
            .collect())
    }

    // -------------------------
    // Suppliers
    // -------------------------

    pub async fn suppliers_list(&self) -> Result<Vec<Supplier>, DomainError> {
        Ok(self.stores.suppliers.list().await?)
    }

    pub async fn suppliers_get(&self, id: SupplierId) -> Result<Supplier, DomainError> {
        self.stores
            .suppliers
            .get(*id.as_uuid())
            .await?
            .ok_or_else(|| DomainError::not_found("supplier not found"))
    }

    pub async fn suppliers_create(&self, draft: SupplierDraft) -> Result<Supplier, DomainError> {
        let supplier = Supplier::create(draft);
        self.stores.suppliers.insert(&supplier).await?;
        Ok(supplier)
    }

    pub async fn suppliers_update(
        &self,
        id: SupplierId,
        patch: SupplierPatch,
    ) -> Result<Supplier, DomainError> {
        let mut supplier = self.suppliers_get(id).await?;
        supplier.apply_patch(patch);
        if !self.stores.suppliers.replace(&supplier).await? {
            return Err(DomainError::not_found("supplier not found"));
        }
        Ok(supplier)
    }

    pub async fn suppliers_delete(&self, id: SupplierId) -> Result<(), DomainError> {
        if !self.stores.suppliers.remove(*id.as_uuid()).await? {
            return Err(DomainError::not_found("supplier not found"));
        }
        Ok(())
    }
}
