use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stockroom_core::CustomerId;
use stockroom_parties::{CustomerDraft, CustomerPatch};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_customers).post(create_customer))
        .route(
            "/:id",
            get(get_customer)
                .put(update_customer)
                .delete(delete_customer),
        )
        .route("/:id/orders", get(get_customer_orders))
}

pub async fn list_customers(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
) -> axum::response::Response {
    if let Err(e) = authz::require_admin(&ctx) {
        return errors::domain_error_to_response(&e);
    }

    match services.customers_list().await {
        Ok(customers) => (StatusCode::OK, Json(customers)).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn create_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Json(body): Json<CustomerDraft>,
) -> axum::response::Response {
    if let Err(e) = authz::require_admin(&ctx) {
        return errors::domain_error_to_response(&e);
    }

    match services.customers_create(body).await {
        Ok(customer) => (StatusCode::CREATED, Json(customer)).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn get_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    if let Err(e) = authz::require_self_or_admin(&ctx, id) {
        return errors::domain_error_to_response(&e);
    }

    match services.customers_get(id).await {
        Ok(customer) => (StatusCode::OK, Json(customer)).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn update_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
    Json(body): Json<CustomerPatch>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    if let Err(e) = authz::require_self_or_admin(&ctx, id) {
        return errors::domain_error_to_response(&e);
    }

    match services.customers_update(id, body).await {
        Ok(customer) => (StatusCode::OK, Json(customer)).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn delete_customer(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = authz::require_admin(&ctx) {
        return errors::domain_error_to_response(&e);
    }

    let id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    match services.customers_delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "customer and related orders deleted successfully",
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn get_customer_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: CustomerId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    if let Err(e) = authz::require_self_or_admin(&ctx, id) {
        return errors::domain_error_to_response(&e);
    }

    match services.customer_orders(id).await {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}
