use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use stockroom_core::ReceiptId;
use stockroom_inventory::{ReceiptDraft, ReceiptPatch};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::authz;
use crate::context::CallerContext;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_receipts).post(create_receipt))
        .route(
            "/:id",
            get(get_receipt).put(update_receipt).delete(delete_receipt),
        )
}

pub async fn list_receipts(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.receipts_list().await {
        Ok(receipts) => (StatusCode::OK, Json(receipts)).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn get_receipt(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: ReceiptId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    match services.receipts_get(id).await {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn create_receipt(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Json(body): Json<ReceiptDraft>,
) -> axum::response::Response {
    if let Err(e) = authz::require_admin(&ctx) {
        return errors::domain_error_to_response(&e);
    }

    match services.receipts_create(body).await {
        Ok(receipt) => (StatusCode::CREATED, Json(receipt)).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn update_receipt(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
    Json(body): Json<ReceiptPatch>,
) -> axum::response::Response {
    if let Err(e) = authz::require_admin(&ctx) {
        return errors::domain_error_to_response(&e);
    }

    let id: ReceiptId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    match services.receipts_update(id, body).await {
        Ok(receipt) => (StatusCode::OK, Json(receipt)).into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}

pub async fn delete_receipt(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(ctx): Extension<CallerContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    if let Err(e) = authz::require_admin(&ctx) {
        return errors::domain_error_to_response(&e);
    }

    let id: ReceiptId = match id.parse() {
        Ok(v) => v,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    match services.receipts_delete(id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "inventory entry deleted successfully",
            })),
        )
            .into_response(),
        Err(e) => errors::domain_error_to_response(&e),
    }
}
