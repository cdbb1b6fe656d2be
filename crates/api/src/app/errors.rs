use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use stockroom_core::DomainError;

/// Map a domain error onto the JSON error envelope.
pub fn domain_error_to_response(err: &DomainError) -> axum::response::Response {
    let (status, code) = match err {
        DomainError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
        DomainError::InvalidId(_) => (StatusCode::BAD_REQUEST, "invalid_id"),
        DomainError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        DomainError::Conflict(_) => (StatusCode::BAD_REQUEST, "conflict"),
        DomainError::Unauthenticated(_) => (StatusCode::UNAUTHORIZED, "unauthenticated"),
        DomainError::InvalidToken => (StatusCode::BAD_REQUEST, "invalid_token"),
        DomainError::Forbidden(_) => (StatusCode::FORBIDDEN, "forbidden"),
        DomainError::InsufficientStock(_) => (StatusCode::BAD_REQUEST, "insufficient_stock"),
        DomainError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "store_error"),
    };

    if status.is_server_error() {
        tracing::error!(error = %err, "request failed");
    }

    json_error(status, code, err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
