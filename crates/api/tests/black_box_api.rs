use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use reqwest::StatusCode;
use serde_json::json;

use stockroom_api::config::{Config, StoreBackend};
use stockroom_api::middleware::AUTH_HEADER;
use stockroom_auth::Claims;
use stockroom_core::UserId;

const JWT_SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let config = Config {
            api_addr: "127.0.0.1:0".to_string(),
            notify_addr: "127.0.0.1:0".to_string(),
            jwt_secret: JWT_SECRET.to_string(),
            token_ttl_secs: 3600,
            store_backend: StoreBackend::Memory,
        };
        let app = stockroom_api::app::build_app(&config)
            .await
            .expect("failed to build app");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Mint a token directly, bypassing registration (lets tests act as admin).
fn mint_token(user_id: UserId, username: &str, is_admin: bool) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        is_admin,
        iat: now,
        exp: now + 600,
    };

    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode token")
}

fn admin_token() -> String {
    mint_token(UserId::new(), "admin", true)
}

fn decode_token(token: &str) -> Claims {
    jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(JWT_SECRET.as_bytes()),
        &Validation::default(),
    )
    .expect("failed to decode token")
    .claims
}

async fn create_product(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let res = client
        .post(format!("{}/api/products", base_url))
        .header(AUTH_HEADER, token)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    res.json().await.unwrap()
}

#[tokio::test]
async fn health_is_public() {
    let srv = TestServer::spawn().await;
    let res = reqwest::get(format!("{}/health", srv.base_url)).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/products", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!("{}/api/products", srv.base_url))
        .header(AUTH_HEADER, "garbage-token")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn register_login_and_duplicate_username() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/register", srv.base_url))
        .json(&json!({ "username": "rudy", "password": "pw" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let token = body["token"].as_str().unwrap();
    let claims = decode_token(token);
    assert_eq!(claims.username, "rudy");
    assert!(!claims.is_admin);

    // Duplicate username is rejected.
    let res = client
        .post(format!("{}/api/auth/register", srv.base_url))
        .json(&json!({ "username": "rudy", "password": "other" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Login with the right and wrong credentials.
    let res = client
        .post(format!("{}/api/auth/login", srv.base_url))
        .json(&json!({ "username": "rudy", "password": "pw" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/api/auth/login", srv.base_url))
        .json(&json!({ "username": "rudy", "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn product_pricing_validation() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = admin_token();

    for body in [
        json!({ "title": "X", "listPrice": 5.0, "costPrice": 6.0, "quantity": 0 }),
        json!({ "title": "X", "listPrice": -1.0, "costPrice": 0.0, "quantity": 0 }),
        json!({ "title": "X", "listPrice": 5.0, "costPrice": -1.0, "quantity": 0 }),
        json!({ "title": "X", "costPrice": 1.0, "quantity": 0 }),
        json!({ "title": "X", "listPrice": 5.0, "costPrice": 1.0, "quantity": -2 }),
    ] {
        let res = client
            .post(format!("{}/api/products", srv.base_url))
            .header(AUTH_HEADER, &token)
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "body: {body}");
    }
}

#[tokio::test]
async fn product_crud_and_profit_margin() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = admin_token();

    let created = create_product(
        &client,
        &srv.base_url,
        &token,
        json!({
            "title": "Giant Steps",
            "artist": "John Coltrane",
            "price": 19.99,
            "listPrice": 30.0,
            "costPrice": 10.0,
            "quantity": 5,
        }),
    )
    .await;
    let id = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["profitMargin"], json!(66.67));

    // Read it back.
    let res = client
        .get(format!("{}/api/products/{}", srv.base_url, id))
        .header(AUTH_HEADER, &token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched["title"], "Giant Steps");
    assert_eq!(fetched["quantity"], 5);

    // Partial update merges; unspecified fields survive.
    let res = client
        .put(format!("{}/api/products/{}", srv.base_url, id))
        .header(AUTH_HEADER, &token)
        .json(&json!({ "costPrice": 15.0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["product"]["title"], "Giant Steps");
    assert_eq!(updated["product"]["listPrice"], 30.0);
    assert_eq!(updated["product"]["profitMargin"], json!(50.0));

    // Delete, then 404.
    let res = client
        .delete(format!("{}/api/products/{}", srv.base_url, id))
        .header(AUTH_HEADER, &token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/products/{}", srv.base_url, id))
        .header(AUTH_HEADER, &token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_filters_match_exactly() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = admin_token();

    create_product(
        &client,
        &srv.base_url,
        &token,
        json!({
            "title": "Blue Train",
            "sku": "BT-1957",
            "location": "aisle-3",
            "category": "jazz",
            "listPrice": 20.0,
            "costPrice": 8.0,
            "quantity": 1,
        }),
    )
    .await;

    for (path, expected) in [
        ("/api/products/sku/BT-1957", 1),
        ("/api/products/location/aisle-3", 1),
        ("/api/products/category/jazz", 1),
        ("/api/products/category/polka", 0),
    ] {
        let res = client
            .get(format!("{}{}", srv.base_url, path))
            .header(AUTH_HEADER, &token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();
        assert_eq!(body.as_array().unwrap().len(), expected, "path: {path}");
    }
}

#[tokio::test]
async fn batch_delete_reports_count_and_nothing_matched() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = admin_token();

    let a = create_product(
        &client,
        &srv.base_url,
        &token,
        json!({ "title": "A", "listPrice": 1.0, "costPrice": 0.5, "quantity": 0 }),
    )
    .await;
    let b = create_product(
        &client,
        &srv.base_url,
        &token,
        json!({ "title": "B", "listPrice": 1.0, "costPrice": 0.5, "quantity": 0 }),
    )
    .await;

    let res = client
        .delete(format!("{}/api/products/batch/delete", srv.base_url))
        .header(AUTH_HEADER, &token)
        .json(&json!({ "productIds": [a["id"], b["id"]] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["deletedCount"], 2);

    // Same ids again: nothing left to delete.
    let res = client
        .delete(format!("{}/api/products/batch/delete", srv.base_url))
        .header(AUTH_HEADER, &token)
        .json(&json!({ "productIds": [a["id"], b["id"]] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Empty id list is a validation failure.
    let res = client
        .delete(format!("{}/api/products/batch/delete", srv.base_url))
        .header(AUTH_HEADER, &token)
        .json(&json!({ "productIds": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_admin_cannot_mutate_products() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let admin = admin_token();
    let user = mint_token(UserId::new(), "plain", false);

    let created = create_product(
        &client,
        &srv.base_url,
        &admin,
        json!({ "title": "Keeper", "listPrice": 9.0, "costPrice": 4.0, "quantity": 1 }),
    )
    .await;
    let id = created["id"].as_str().unwrap();

    let res = client
        .delete(format!("{}/api/products/{}", srv.base_url, id))
        .header(AUTH_HEADER, &user)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The product is still there.
    let res = client
        .get(format!("{}/api/products/{}", srv.base_url, id))
        .header(AUTH_HEADER, &user)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/api/products", srv.base_url))
        .header(AUTH_HEADER, &user)
        .json(&json!({ "title": "Nope", "listPrice": 1.0, "costPrice": 0.5, "quantity": 0 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn inventory_receipt_lifecycle_reconciles_product_quantity() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let token = admin_token();

    let product = create_product(
        &client,
        &srv.base_url,
        &token,
        json!({ "title": "Stocked", "listPrice": 10.0, "costPrice": 5.0, "quantity": 3 }),
    )
    .await;
    let product_id = product["id"].as_str().unwrap().to_string();

    // Receipt against a missing product is rejected.
    let res = client
        .post(format!("{}/api/inventory", srv.base_url))
        .header(AUTH_HEADER, &token)
        .json(&json!({
            "product_id": uuid::Uuid::now_v7(),
            "quantity_received": 4,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Create: quantity 3 -> 10.
    let res = client
        .post(format!("{}/api/inventory", srv.base_url))
        .header(AUTH_HEADER, &token)
        .json(&json!({
            "product_id": product_id,
            "quantity_received": 7,
            "remarks": "first shipment",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let receipt: serde_json::Value = res.json().await.unwrap();
    let receipt_id = receipt["id"].as_str().unwrap().to_string();

    let fetch_quantity = |id: String, token: String| {
        let client = client.clone();
        let base = srv.base_url.clone();
        async move {
            let res = client
                .get(format!("{}/api/products/{}", base, id))
                .header(AUTH_HEADER, &token)
                .send()
                .await
                .unwrap();
            let body: serde_json::Value = res.json().await.unwrap();
            body["quantity"].as_i64().unwrap()
        }
    };

    assert_eq!(fetch_quantity(product_id.clone(), token.clone()).await, 10);

    // Update: delta -3 moves the product to 7.
    let res = client
        .put(format!("{}/api/inventory/{}", srv.base_url, receipt_id))
        .header(AUTH_HEADER, &token)
        .json(&json!({ "quantity_received": 4 }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(fetch_quantity(product_id.clone(), token.clone()).await, 7);

    // Delete: inverse of create, back to 3.
    let res = client
        .delete(format!("{}/api/inventory/{}", srv.base_url, receipt_id))
        .header(AUTH_HEADER, &token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(fetch_quantity(product_id, token.clone()).await, 3);

    let res = client
        .get(format!("{}/api/inventory/{}", srv.base_url, receipt_id))
        .header(AUTH_HEADER, &token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_end_to_end_round_trip() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let admin = admin_token();

    // Register a non-admin user.
    let res = client
        .post(format!("{}/api/auth/register", srv.base_url))
        .json(&json!({ "username": "u1", "password": "pw" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let user_token = body["token"].as_str().unwrap().to_string();
    let user_id = decode_token(&user_token).sub;

    let product = create_product(
        &client,
        &srv.base_url,
        &admin,
        json!({ "title": "On Repeat", "price": 19.99, "listPrice": 25.0, "costPrice": 10.0, "quantity": 10 }),
    )
    .await;
    let product_id = product["id"].as_str().unwrap().to_string();

    // u1 places an order for themselves.
    let res = client
        .post(format!("{}/api/orders", srv.base_url))
        .header(AUTH_HEADER, &user_token)
        .json(&json!({
            "customer_id": user_id,
            "items": [{ "product_id": product_id, "quantity": 3 }],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let order: serde_json::Value = res.json().await.unwrap();
    let order_id = order["id"].as_str().unwrap().to_string();
    assert!((order["total_amount"].as_f64().unwrap() - 59.97).abs() < 1e-9);

    // Stock decremented.
    let res = client
        .get(format!("{}/api/products/{}", srv.base_url, product_id))
        .header(AUTH_HEADER, &user_token)
        .send()
        .await
        .unwrap();
    let p: serde_json::Value = res.json().await.unwrap();
    assert_eq!(p["quantity"], 7);

    // Owner sees the order with exactly one item.
    let res = client
        .get(format!("{}/api/orders/{}", srv.base_url, order_id))
        .header(AUTH_HEADER, &user_token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: serde_json::Value = res.json().await.unwrap();
    assert_eq!(fetched["items"].as_array().unwrap().len(), 1);
    assert_eq!(fetched["items"][0]["quantity"], 3);

    // Another non-admin cannot see it.
    let stranger = mint_token(UserId::new(), "stranger", false);
    let res = client
        .get(format!("{}/api/orders/{}", srv.base_url, order_id))
        .header(AUTH_HEADER, &stranger)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Deleting the order restores stock and removes the items.
    let res = client
        .delete(format!("{}/api/orders/{}", srv.base_url, order_id))
        .header(AUTH_HEADER, &admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/products/{}", srv.base_url, product_id))
        .header(AUTH_HEADER, &user_token)
        .send()
        .await
        .unwrap();
    let p: serde_json::Value = res.json().await.unwrap();
    assert_eq!(p["quantity"], 10);

    let res = client
        .get(format!("{}/api/orders/{}", srv.base_url, order_id))
        .header(AUTH_HEADER, &admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn order_rules_and_ownership() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let admin = admin_token();
    let user_id = UserId::new();
    let user = mint_token(user_id, "u2", false);

    let product = create_product(
        &client,
        &srv.base_url,
        &admin,
        json!({ "title": "Scarce", "price": 10.0, "listPrice": 12.0, "costPrice": 6.0, "quantity": 2 }),
    )
    .await;
    let product_id = product["id"].as_str().unwrap().to_string();

    // Ordering on someone else's behalf is forbidden for non-admins.
    let res = client
        .post(format!("{}/api/orders", srv.base_url))
        .header(AUTH_HEADER, &user)
        .json(&json!({
            "customer_id": uuid::Uuid::now_v7(),
            "items": [{ "product_id": product_id, "quantity": 1 }],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // An empty item list is rejected.
    let res = client
        .post(format!("{}/api/orders", srv.base_url))
        .header(AUTH_HEADER, &user)
        .json(&json!({ "customer_id": user_id, "items": [] }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Overselling fails and leaves no partial writes behind.
    let res = client
        .post(format!("{}/api/orders", srv.base_url))
        .header(AUTH_HEADER, &user)
        .json(&json!({
            "customer_id": user_id,
            "items": [{ "product_id": product_id, "quantity": 3 }],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .get(format!("{}/api/products/{}", srv.base_url, product_id))
        .header(AUTH_HEADER, &user)
        .send()
        .await
        .unwrap();
    let p: serde_json::Value = res.json().await.unwrap();
    assert_eq!(p["quantity"], 2);

    // Two lines that jointly exceed stock are also rejected.
    let res = client
        .post(format!("{}/api/orders", srv.base_url))
        .header(AUTH_HEADER, &user)
        .json(&json!({
            "customer_id": user_id,
            "items": [
                { "product_id": product_id, "quantity": 1 },
                { "product_id": product_id, "quantity": 2 },
            ],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Listing all orders is admin-only.
    let res = client
        .get(format!("{}/api/orders", srv.base_url))
        .header(AUTH_HEADER, &user)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(format!("{}/api/orders", srv.base_url))
        .header(AUTH_HEADER, &admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn customer_ownership_and_cascade_delete() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let admin = admin_token();
    let user_id = UserId::new();
    let user = mint_token(user_id, "owner", false);

    // Admin links a customer profile to the user's identity.
    let res = client
        .post(format!("{}/api/customers", srv.base_url))
        .header(AUTH_HEADER, &admin)
        .json(&json!({
            "id": user_id,
            "first_name": "June",
            "last_name": "Carter",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    // The owner reads their own profile; strangers are rejected.
    let res = client
        .get(format!("{}/api/customers/{}", srv.base_url, user_id))
        .header(AUTH_HEADER, &user)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let profile: serde_json::Value = res.json().await.unwrap();
    assert_eq!(profile["first_name"], "June");

    let stranger = mint_token(UserId::new(), "stranger", false);
    let res = client
        .get(format!("{}/api/customers/{}", srv.base_url, user_id))
        .header(AUTH_HEADER, &stranger)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // Customer listing is admin-only.
    let res = client
        .get(format!("{}/api/customers", srv.base_url))
        .header(AUTH_HEADER, &user)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The owner places an order, then the admin deletes the customer:
    // the cascade removes the order and restores stock.
    let product = create_product(
        &client,
        &srv.base_url,
        &admin,
        json!({ "title": "Restocked", "price": 5.0, "listPrice": 6.0, "costPrice": 3.0, "quantity": 8 }),
    )
    .await;
    let product_id = product["id"].as_str().unwrap().to_string();

    let res = client
        .post(format!("{}/api/orders", srv.base_url))
        .header(AUTH_HEADER, &user)
        .json(&json!({
            "customer_id": user_id,
            "items": [{ "product_id": product_id, "quantity": 5 }],
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .get(format!("{}/api/customers/{}/orders", srv.base_url, user_id))
        .header(AUTH_HEADER, &user)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let orders: serde_json::Value = res.json().await.unwrap();
    assert_eq!(orders.as_array().unwrap().len(), 1);

    let res = client
        .delete(format!("{}/api/customers/{}", srv.base_url, user_id))
        .header(AUTH_HEADER, &admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/products/{}", srv.base_url, product_id))
        .header(AUTH_HEADER, &admin)
        .send()
        .await
        .unwrap();
    let p: serde_json::Value = res.json().await.unwrap();
    assert_eq!(p["quantity"], 8);

    let res = client
        .get(format!("{}/api/orders", srv.base_url))
        .header(AUTH_HEADER, &admin)
        .send()
        .await
        .unwrap();
    let all_orders: serde_json::Value = res.json().await.unwrap();
    assert!(all_orders.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn supplier_crud_and_inventory_listing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();
    let admin = admin_token();
    let user = mint_token(UserId::new(), "reader", false);

    let res = client
        .post(format!("{}/api/suppliers", srv.base_url))
        .header(AUTH_HEADER, &admin)
        .json(&json!({ "name": "Wax Wholesale", "contact_person": "Sam" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let supplier: serde_json::Value = res.json().await.unwrap();
    let supplier_id = supplier["id"].as_str().unwrap().to_string();

    // Non-admins can read suppliers but not create them.
    let res = client
        .get(format!("{}/api/suppliers/{}", srv.base_url, supplier_id))
        .header(AUTH_HEADER, &user)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/api/suppliers", srv.base_url))
        .header(AUTH_HEADER, &user)
        .json(&json!({ "name": "Nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // A receipt from this supplier shows up under /:id/inventory.
    let product = create_product(
        &client,
        &srv.base_url,
        &admin,
        json!({ "title": "Supplied", "listPrice": 10.0, "costPrice": 4.0, "quantity": 0 }),
    )
    .await;

    let res = client
        .post(format!("{}/api/inventory", srv.base_url))
        .header(AUTH_HEADER, &admin)
        .json(&json!({
            "product_id": product["id"],
            "supplier_id": supplier_id,
            "quantity_received": 6,
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .get(format!(
            "{}/api/suppliers/{}/inventory",
            srv.base_url, supplier_id
        ))
        .header(AUTH_HEADER, &user)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let receipts: serde_json::Value = res.json().await.unwrap();
    assert_eq!(receipts.as_array().unwrap().len(), 1);
    assert_eq!(receipts[0]["quantity_received"], 6);

    // Update and delete round out the surface.
    let res = client
        .put(format!("{}/api/suppliers/{}", srv.base_url, supplier_id))
        .header(AUTH_HEADER, &admin)
        .json(&json!({ "phone": "555-0101" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let updated: serde_json::Value = res.json().await.unwrap();
    assert_eq!(updated["name"], "Wax Wholesale");
    assert_eq!(updated["phone"], "555-0101");

    let res = client
        .delete(format!("{}/api/suppliers/{}", srv.base_url, supplier_id))
        .header(AUTH_HEADER, &admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/suppliers/{}", srv.base_url, supplier_id))
        .header(AUTH_HEADER, &admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
