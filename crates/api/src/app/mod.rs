//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: store wiring (snapshot slot, order event store)
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Extension, Router};

use stockgate_infra::GatewayConfig;

use crate::middleware::{self, AuthState};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router from configuration (public entrypoint used by `main.rs`).
pub fn build_app(config: &GatewayConfig) -> Router {
    let auth = AuthState::new(config.partner_tokens.clone(), config.create_token.clone());
    build_app_with(auth, services::build_fs_services(config), config.max_body_bytes)
}

/// Build the router over explicit stores (tests inject in-memory ones).
///
/// `max_body_bytes` caps request bodies on every route, replacing axum's
/// 2 MiB default so full snapshots fit.
pub fn build_app_with(
    auth: AuthState,
    services: services::AppServices,
    max_body_bytes: usize,
) -> Router {
    let services = Arc::new(services);

    // Partner routes: any configured partner token.
    let partner = routes::partner_router()
        .layer(Extension(services.clone()))
        .layer(axum::middleware::from_fn_with_state(
            auth.clone(),
            middleware::partner_auth,
        ));

    // Supplier routes: the create token only.
    let supplier = routes::supplier_router()
        .layer(Extension(services))
        .layer(axum::middleware::from_fn_with_state(
            auth,
            middleware::supplier_auth,
        ));

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(partner)
        .merge(supplier)
        .layer(DefaultBodyLimit::max(max_body_bytes))
}
