//! API route definitions.

use axum::{Router, routing::get};

use crate::api::handlers::{
    create_vehicle_handler, delete_vehicle_handler, get_vehicle_handler, list_vehicles_handler,
    update_status_handler,
};
use crate::state::AppState;

/// Routes that require Bearer token authentication.
///
/// Mounted under `/api` with the auth middleware applied as a route layer.
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/vehicles",
            get(list_vehicles_handler).post(create_vehicle_handler),
        )
        .route(
            "/vehicles/{id}",
            get(get_vehicle_handler)
                .put(update_status_handler)
                .delete(delete_vehicle_handler),
        )
}
