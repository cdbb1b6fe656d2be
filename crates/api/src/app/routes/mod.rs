use axum::Router;

pub mod auth;
pub mod customers;
pub mod inventory;
pub mod orders;
pub mod products;
pub mod suppliers;
pub mod system;

/// Router for all authenticated endpoints (everything under `/api` except
/// `/api/auth`).
pub fn router() -> Router {
    Router::new()
        .nest("/api/products", products::router())
        .nest("/api/inventory", inventory::router())
        .nest("/api/orders", orders::router())
        .nest("/api/customers", customers::router())
        .nest("/api/suppliers", suppliers::router())
}
