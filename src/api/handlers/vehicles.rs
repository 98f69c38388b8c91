//! HTTP handlers for vehicle endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use tracing::info;
use validator::Validate;

use crate::api::dto::pagination::PaginationParams;
use crate::api::dto::vehicle::{
    CreateVehicleRequest, MessageResponse, UpdateStatusRequest, VehicleListResponse,
    VehicleResponse,
};
use crate::application::services::AuthContext;
use crate::domain::entities::{NewVehicle, VehicleStatus};
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/vehicles` - paginated inventory listing.
pub async fn list_vehicles_handler(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> Result<Json<VehicleListResponse>, AppError> {
    let (offset, limit) = pagination.offset_limit()?;

    let (vehicles, total) = state.vehicle_service.list_vehicles(offset, limit).await?;

    Ok(Json(VehicleListResponse {
        items: vehicles.into_iter().map(VehicleResponse::from).collect(),
        page: pagination.page(),
        page_size: pagination.page_size(),
        total,
    }))
}

/// `POST /api/vehicles` - register a new vehicle.
pub async fn create_vehicle_handler(
    ctx: AuthContext,
    State(state): State<AppState>,
    Json(payload): Json<CreateVehicleRequest>,
) -> Result<(StatusCode, Json<VehicleResponse>), AppError> {
    ctx.require_write()?;
    payload.validate()?;

    let status = match payload.status.as_deref() {
        Some(raw) => VehicleStatus::parse(raw)?,
        None => VehicleStatus::Disconnected,
    };

    let vehicle = state
        .vehicle_service
        .register_vehicle(NewVehicle {
            make: payload.make,
            model: payload.model,
            year: payload.year,
            license_plate: payload.license_plate,
            status,
        })
        .await?;

    info!(
        vehicle_id = vehicle.id,
        license_plate = %vehicle.license_plate,
        token = %ctx.token_name,
        "Vehicle registered"
    );

    Ok((StatusCode::CREATED, Json(vehicle.into())))
}

/// `GET /api/vehicles/{id}` - fetch a single vehicle.
pub async fn get_vehicle_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<VehicleResponse>, AppError> {
    let vehicle = state.vehicle_service.get_vehicle(id).await?;
    Ok(Json(vehicle.into()))
}

/// `PUT /api/vehicles/{id}` - update the connectivity status.
pub async fn update_status_handler(
    ctx: AuthContext,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UpdateStatusRequest>,
) -> Result<Json<VehicleResponse>, AppError> {
    ctx.require_write()?;

    let status = VehicleStatus::parse(&payload.status)?;
    let vehicle = state.vehicle_service.set_status(id, status).await?;

    info!(
        vehicle_id = id,
        status = %status,
        token = %ctx.token_name,
        "Vehicle status updated"
    );

    Ok(Json(vehicle.into()))
}

/// `DELETE /api/vehicles/{id}` - remove a vehicle from the inventory.
pub async fn delete_vehicle_handler(
    ctx: AuthContext,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, AppError> {
    ctx.require_write()?;

    state.vehicle_service.remove_vehicle(id).await?;

    info!(vehicle_id = id, token = %ctx.token_name, "Vehicle deleted");

    Ok(Json(MessageResponse {
        message: format!("Vehicle {id} deleted"),
    }))
}
