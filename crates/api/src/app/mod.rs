//! HTTP API application wiring (Axum router + service wiring).
//!
//! Folder layout:
//! - `services.rs`: stores + token service + reconciliation workflow
//! - `routes/`: HTTP routes + handlers (one file per domain area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use stockroom_auth::TokenService;
use stockroom_infra::Stores;

use crate::config::{Config, StoreBackend};
use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use services::AppServices;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub async fn build_app(config: &Config) -> anyhow::Result<Router> {
    let stores = build_stores(&config.store_backend).await?;

    let tokens = Arc::new(TokenService::new(
        config.jwt_secret.as_bytes(),
        config.token_ttl_secs,
    ));
    let services = Arc::new(AppServices::new(stores, tokens.clone()));
    let auth_state = middleware::AuthState { tokens };

    // Protected routes: require a verified token + caller context.
    let protected = routes::router().layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn_with_state(
                auth_state,
                middleware::auth_middleware,
            ))
            .layer(Extension(services.clone())),
    );

    Ok(Router::new()
        .route("/health", get(routes::system::health))
        .nest("/api/auth", routes::auth::router().layer(Extension(services)))
        .merge(protected))
}

async fn build_stores(backend: &StoreBackend) -> anyhow::Result<Stores> {
    match backend {
        StoreBackend::Memory => Ok(Stores::in_memory()),
        StoreBackend::Postgres { database_url } => {
            #[cfg(feature = "postgres")]
            {
                let stores = Stores::postgres(database_url)
                    .await
                    .map_err(|e| anyhow::anyhow!("failed to initialize postgres stores: {e}"))?;
                Ok(stores)
            }
            #[cfg(not(feature = "postgres"))]
            {
                let _ = database_url;
                tracing::warn!(
                    "STORE_BACKEND=postgres but the postgres feature is not enabled, falling back to in-memory"
                );
                Ok(Stores::in_memory())
            }
        }
    }
}
