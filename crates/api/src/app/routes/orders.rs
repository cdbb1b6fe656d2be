use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stockroom_core::OrderId;
use stockroom_sales::{OrderDraft, OrderPatch};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_orders).post(create_order))
        .route(
            "/:id",
            get(get_order).put(update_order).delete(delete_order),
        )
        .route("/:id/items", get(get_order_items))
}

pub async fn list_orders(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
) -> axum::response::Response {
    if let Err(e) = authz::require_admin(&ctx) {
        return errors::domain_error_to_response(&e);
    }

    match services.orders_list().await {
        Ok(orders) => (StatusCode::OK, Json(orders)).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn create_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Json(body): Json<OrderDraft>,
) -> axum::response::Response {
    // Non-admin callers can only place orders for themselves.
    if !ctx.is_admin() && ctx.user_id().as_uuid() != body.customer_id.as_uuid() {
        return errors::domain_error_to_response(&stockroom_core::DomainError::forbidden(
            "can only create orders for yourself",
        ));
    }

    match services.orders_create(body).await {
        Ok(order) => (StatusCode::CREATED, Json(order)).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn get_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    let order = match services.orders_get(id).await {
        Ok(order) => order,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    if let Err(e) = authz::require_self_or_admin(&ctx, order.customer_id) {
        return errors::domain_error_to_response(&e);
    }

    match services.order_items(order.id).await {
        Ok(items) => (
            StatusCode::OK,
            Json(dto::order_with_items_to_json(&order, &items)),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn update_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
    Json(body): Json<OrderPatch>,
) -> axum::response::Response {
    if let Err(e) = authz::require_admin(&ctx) {
        return errors::domain_error_to_response(&e);
    }

    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    match services.orders_update(id, body).await {
        Ok(order) => (StatusCode::OK, Json(order)).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn delete_order(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = authz::require_admin(&ctx) {
        return errors::domain_error_to_response(&e);
    }

    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    match services.orders_delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "order and related items deleted successfully",
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn get_order_items(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: OrderId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    let order = match services.orders_get(id).await {
        Ok(order) => order,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    if let Err(e) = authz::require_self_or_admin(&ctx, order.customer_id) {
        return errors::domain_error_to_response(&e);
    }

    match services.order_items(order.id).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}
