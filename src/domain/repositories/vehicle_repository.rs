//! Repository trait for vehicle data access.

use crate::domain::entities::{NewVehicle, Vehicle, VehicleStatus};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing vehicle records.
///
/// Provides the CRUD primitives consumed by the application layer. Concurrent
/// writes to the same record are serialized by the implementation.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVehicleRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryVehicleRepository`] - in-process map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Persists a new vehicle and assigns its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the license plate is already
    /// registered. Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_vehicle: NewVehicle) -> Result<Vehicle, AppError>;

    /// Finds a vehicle by its id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Vehicle))` if found
    /// - `Ok(None)` if not found
    async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>, AppError>;

    /// Finds a vehicle by its license plate.
    ///
    /// Used to check plate uniqueness before registration.
    async fn find_by_plate(&self, license_plate: &str) -> Result<Option<Vehicle>, AppError>;

    /// Lists vehicles ordered by id, with pagination.
    ///
    /// # Arguments
    ///
    /// - `offset` - number of records to skip
    /// - `limit` - maximum number of records to return
    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Vehicle>, AppError>;

    /// Counts all vehicle records.
    async fn count(&self) -> Result<i64, AppError>;

    /// Updates only the status field of an existing vehicle.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Vehicle))` with the updated record
    /// - `Ok(None)` if no vehicle matches `id`
    async fn update_status(
        &self,
        id: i64,
        status: VehicleStatus,
    ) -> Result<Option<Vehicle>, AppError>;

    /// Removes a vehicle record.
    ///
    /// Returns `Ok(true)` if the vehicle was found and deleted, `Ok(false)`
    /// if no record matches `id`.
    async fn delete(&self, id: i64) -> Result<bool, AppError>;
}
