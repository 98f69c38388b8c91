#![allow(dead_code)]

use axum::{Router, middleware, routing::get};
use std::sync::Arc;
use vehicle_registry::api::handlers::health_handler;
use vehicle_registry::api::middleware::auth;
use vehicle_registry::api::routes::protected_routes;
use vehicle_registry::application::services::{AuthService, VehicleService};
use vehicle_registry::config::StorageBackend;
use vehicle_registry::domain::repositories::{TokenRepository, TokenRole};
use vehicle_registry::infrastructure::persistence::{
    InMemoryTokenRepository, InMemoryVehicleRepository,
};
use vehicle_registry::state::AppState;
use vehicle_registry::utils::token::{generate_token, hash_token};

pub const TEST_SIGNING_SECRET: &str = "test-signing-secret";

/// Builds application state backed by in-memory repositories.
///
/// Returns the state together with the token repository so tests can seed
/// and revoke tokens directly.
pub fn create_test_state() -> (AppState, Arc<InMemoryTokenRepository>) {
    let vehicle_repo = Arc::new(InMemoryVehicleRepository::new());
    let token_repo = Arc::new(InMemoryTokenRepository::new());

    let vehicle_service = Arc::new(VehicleService::new(vehicle_repo));
    let auth_service = Arc::new(AuthService::new(
        token_repo.clone(),
        TEST_SIGNING_SECRET.to_string(),
    ));

    let state = AppState::new(vehicle_service, auth_service, StorageBackend::Memory);

    (state, token_repo)
}

/// Builds the application router with auth middleware but without rate
/// limiting, which needs a real socket peer address.
pub fn test_app(state: AppState) -> Router {
    let api_router = protected_routes()
        .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));

    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api_router)
        .with_state(state)
}

/// Seeds a token with the given role and returns the raw token value.
pub async fn seed_token(repo: &InMemoryTokenRepository, name: &str, role: TokenRole) -> String {
    let raw = generate_token();
    let hash = hash_token(TEST_SIGNING_SECRET, &raw);
    repo.create_token(name, &hash, role).await.unwrap();
    raw
}

pub async fn seed_admin_token(repo: &InMemoryTokenRepository) -> String {
    seed_token(repo, "test-admin", TokenRole::Admin).await
}

pub async fn seed_readonly_token(repo: &InMemoryTokenRepository) -> String {
    seed_token(repo, "test-readonly", TokenRole::ReadOnly).await
}

/// JSON payload for a valid vehicle registration.
pub fn vehicle_payload(plate: &str) -> serde_json::Value {
    serde_json::json!({
        "make": "Tesla",
        "model": "Model3",
        "year": 2024,
        "license_plate": plate,
    })
}
