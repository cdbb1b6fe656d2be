use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use stockroom_auth::{Identity, TokenService};
use stockroom_core::DomainError;

use crate::app::errors;
use crate::context::CallerContext;

/// Header carrying the bearer token (kept for client compatibility).
pub const AUTH_HEADER: &str = "x-auth-token";

#[derive(Clone)]
pub struct AuthState {
    pub tokens: Arc<TokenService>,
}

/// Auth gate: requires a valid token and injects the caller's identity into
/// request extensions for downstream handlers.
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let token = match extract_token(req.headers()) {
        Ok(t) => t,
        Err(e) => return errors::domain_error_to_response(&e),
    };

    let claims = match state.tokens.verify(token) {
        Ok(c) => c,
        Err(_) => return errors::domain_error_to_response(&DomainError::InvalidToken),
    };

    req.extensions_mut()
        .insert(CallerContext::new(Identity::from(claims)));

    next.run(req).await
}

fn extract_token(headers: &HeaderMap) -> Result<&str, DomainError> {
    let header = headers
        .get(AUTH_HEADER)
        .ok_or_else(|| DomainError::unauthenticated("no token, authorization denied"))?;

    let token = header.to_str().map_err(|_| DomainError::InvalidToken)?.trim();
    if token.is_empty() {
        return Err(DomainError::unauthenticated("no token, authorization denied"));
    }

    Ok(token)
}
