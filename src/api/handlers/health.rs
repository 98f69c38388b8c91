//! Health check handler.

use axum::{Json, extract::State};
use tracing::error;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// `GET /health` - service health with a storage probe.
///
/// Unauthenticated so that load balancers and orchestrators can poll it.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let storage = match state.vehicle_service.list_vehicles(0, 1).await {
        Ok((_, total)) => CheckStatus {
            status: "ok".to_string(),
            message: Some(format!(
                "{} backend, {total} vehicles registered",
                state.storage
            )),
        },
        Err(err) => {
            error!(error = %err, "Health check storage probe failed");
            CheckStatus {
                status: "error".to_string(),
                message: Some(err.to_string()),
            }
        }
    };

    let status = if storage.status == "ok" {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks { storage },
    })
}
