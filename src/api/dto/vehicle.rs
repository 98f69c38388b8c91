//! DTOs for vehicle endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::{Vehicle, VehicleStatus};

/// Request body for `POST /api/vehicles`.
///
/// `status` is carried as a raw string and parsed by the handler so that an
/// unknown value produces the API's own validation error instead of a
/// deserialization failure.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateVehicleRequest {
    #[validate(length(min = 1, max = 100))]
    pub make: String,

    #[validate(length(min = 1, max = 100))]
    pub model: String,

    /// Model year; 1886 is the year of the first automobile.
    #[validate(range(min = 1886, max = 2100))]
    pub year: i32,

    /// Validated by the service after trimming and upper-casing, so padded
    /// input like `"  abc1234 "` still normalizes to a valid plate.
    pub license_plate: String,

    /// Initial status; defaults to `DISCONNECTED` when absent.
    pub status: Option<String>,
}

/// Request body for `PUT /api/vehicles/{id}`.
///
/// Only the status field is updatable.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// JSON representation of a vehicle record.
#[derive(Debug, Serialize)]
pub struct VehicleResponse {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Vehicle> for VehicleResponse {
    fn from(vehicle: Vehicle) -> Self {
        Self {
            id: vehicle.id,
            make: vehicle.make,
            model: vehicle.model,
            year: vehicle.year,
            license_plate: vehicle.license_plate,
            status: vehicle.status,
            created_at: vehicle.created_at,
            updated_at: vehicle.updated_at,
        }
    }
}

/// Response for `GET /api/vehicles`.
#[derive(Debug, Serialize)]
pub struct VehicleListResponse {
    pub items: Vec<VehicleResponse>,
    pub page: u32,
    pub page_size: u32,
    pub total: i64,
}

/// Generic success message, returned by DELETE.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
