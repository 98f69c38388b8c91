//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /health` - Health check with a storage probe (public)
//! - `/api/*`      - Vehicle inventory REST API (Bearer token required)
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket
//! - **Authentication** - Bearer token on all `/api` routes
//! - **Path normalization** - Trailing slash handling

use axum::routing::get;
use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let api_router = api::routes::protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer))
        .layer(rate_limit::secure_layer());

    let public_router = Router::new()
        .route("/health", get(health_handler))
        .layer(rate_limit::layer());

    let router = Router::new()
        .merge(public_router)
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
