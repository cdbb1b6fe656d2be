use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};

use stockroom_core::ProductId;
use stockroom_products::{ProductDraft, ProductPatch};

use crate::app::services::AppServices;
use crate::app::{dto, errors};
use crate::authz;
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route(
            "/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/location/:location", get(products_by_location))
        .route("/category/:category", get(products_by_category))
        .route("/sku/:sku", get(products_by_sku))
        .route("/batch/delete", delete(batch_delete_products))
}

pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.products_list().await {
        Ok(products) => (StatusCode::OK, Json(dto::products_to_json(&products))).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Json(body): Json<ProductDraft>,
) -> axum::response::Response {
    if let Err(e) = authz::require_admin(&ctx) {
        return errors::domain_error_to_response(&e);
    }

    match services.products_create(body).await {
        Ok(product) => {
            (StatusCode::CREATED, Json(dto::product_to_json(&product))).into_response()
        }
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    match services.products_get(id).await {
        Ok(product) => (StatusCode::OK, Json(dto::product_to_json(&product))).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
    Json(body): Json<ProductPatch>,
) -> axum::response::Response {
    if let Err(e) = authz::require_admin(&ctx) {
        return errors::domain_error_to_response(&e);
    }

    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    match services.products_update(id, body).await {
        Ok(product) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "product updated successfully",
                "product": dto::product_to_json(&product),
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = authz::require_admin(&ctx) {
        return errors::domain_error_to_response(&e);
    }

    let id: ProductId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    match services.products_delete(id).await {
        Ok(product) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "product deleted successfully",
                "product": dto::product_to_json(&product),
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn products_by_location(
    Extension(services): Extension<Arc<AppServices>>,
    Path(location): Path<String>,
) -> axum::response::Response {
    match services.products_by_location(&location).await {
        Ok(products) => (StatusCode::OK, Json(dto::products_to_json(&products))).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn products_by_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(category): Path<String>,
) -> axum::response::Response {
    match services.products_by_category(&category).await {
        Ok(products) => (StatusCode::OK, Json(dto::products_to_json(&products))).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn products_by_sku(
    Extension(services): Extension<Arc<AppServices>>,
    Path(sku): Path<String>,
) -> axum::response::Response {
    match services.products_by_sku(&sku).await {
        Ok(products) => (StatusCode::OK, Json(dto::products_to_json(&products))).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn batch_delete_products(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Json(body): Json<dto::BatchDeleteRequest>,
) -> axum::response::Response {
    if let Err(e) = authz::require_admin(&ctx) {
        return errors::domain_error_to_response(&e);
    }

    let mut ids = Vec::with_capacity(body.product_ids.len());
    for raw in &body.product_ids {
        match raw.parse::<ProductId>() {
            Ok(id) => ids.push(id),
            Err(e) => return errors::domain_error_to_response(&e),
        }
    }

    match services.products_batch_delete(&ids).await {
        Ok(deleted) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "products deleted successfully",
                "deletedCount": deleted,
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}
