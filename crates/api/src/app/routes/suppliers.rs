use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stockroom_core::SupplierId;
use stockroom_parties::{SupplierDraft, SupplierPatch};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_suppliers).post(create_supplier))
        .route(
            "/:id",
            get(get_supplier)
                .put(update_supplier)
                .delete(delete_supplier),
        )
        .route("/:id/inventory", get(get_supplier_inventory))
}

pub async fn list_suppliers(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.suppliers_list().await {
        Ok(suppliers) => (StatusCode::OK, Json(suppliers)).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn create_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Json(body): Json<SupplierDraft>,
) -> axum::response::Response {
    if let Err(e) = authz::require_admin(&ctx) {
        return errors::domain_error_to_response(&e);
    }

    match services.suppliers_create(body).await {
        Ok(supplier) => (StatusCode::CREATED, Json(supplier)).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn get_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: SupplierId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    match services.suppliers_get(id).await {
        Ok(supplier) => (StatusCode::OK, Json(supplier)).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn update_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
    Json(body): Json<SupplierPatch>,
) -> axum::response::Response {
    if let Err(e) = authz::require_admin(&ctx) {
        return errors::domain_error_to_response(&e);
    }

    let id: SupplierId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    match services.suppliers_update(id, body).await {
        Ok(supplier) => (StatusCode::OK, Json(supplier)).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn delete_supplier(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = authz::require_admin(&ctx) {
        return errors::domain_error_to_response(&e);
    }

    let id: SupplierId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    match services.suppliers_delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "supplier deleted successfully",
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn get_supplier_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: SupplierId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    match services.receipts_by_supplier(id).await {
        Ok(receipts) => (StatusCode::OK, Json(receipts)).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}
