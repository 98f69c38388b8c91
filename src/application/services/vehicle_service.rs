//! Vehicle registration and lifecycle service.

use std::sync::Arc;

use serde_json::json;

use crate::domain::entities::{NewVehicle, Vehicle, VehicleStatus};
use crate::domain::repositories::VehicleRepository;
use crate::error::AppError;

/// License plates are normalized to exactly this many characters.
const PLATE_LEN: usize = 7;

/// Service for managing the vehicle inventory.
///
/// Handles plate normalization and uniqueness, status transitions, and
/// not-found mapping so handlers stay thin.
pub struct VehicleService {
    repository: Arc<dyn VehicleRepository>,
}

impl VehicleService {
    /// Creates a new vehicle service.
    pub fn new(repository: Arc<dyn VehicleRepository>) -> Self {
        Self { repository }
    }

    /// Registers a new vehicle.
    ///
    /// The license plate is trimmed and upper-cased before storage so
    /// lookups are case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the normalized plate is not
    /// exactly 7 characters. Returns [`AppError::Conflict`] if the plate is
    /// already registered.
    pub async fn register_vehicle(&self, new_vehicle: NewVehicle) -> Result<Vehicle, AppError> {
        let license_plate = normalize_plate(&new_vehicle.license_plate)?;

        if self
            .repository
            .find_by_plate(&license_plate)
            .await?
            .is_some()
        {
            return Err(AppError::conflict(
                "License plate already registered",
                json!({ "license_plate": license_plate }),
            ));
        }

        self.repository
            .create(NewVehicle {
                license_plate,
                ..new_vehicle
            })
            .await
    }

    /// Retrieves a vehicle by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no vehicle matches `id`.
    pub async fn get_vehicle(&self, id: i64) -> Result<Vehicle, AppError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| vehicle_not_found(id))
    }

    /// Lists vehicles with the total record count.
    pub async fn list_vehicles(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Vehicle>, i64), AppError> {
        let vehicles = self.repository.list(offset, limit).await?;
        let total = self.repository.count().await?;
        Ok((vehicles, total))
    }

    /// Updates only the status of an existing vehicle.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no vehicle matches `id`.
    pub async fn set_status(
        &self,
        id: i64,
        status: VehicleStatus,
    ) -> Result<Vehicle, AppError> {
        self.repository
            .update_status(id, status)
            .await?
            .ok_or_else(|| vehicle_not_found(id))
    }

    /// Removes a vehicle from the inventory.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no vehicle matches `id`.
    pub async fn remove_vehicle(&self, id: i64) -> Result<(), AppError> {
        if self.repository.delete(id).await? {
            Ok(())
        } else {
            Err(vehicle_not_found(id))
        }
    }
}

fn vehicle_not_found(id: i64) -> AppError {
    AppError::not_found("Vehicle not found", json!({ "id": id }))
}

/// Trims and upper-cases a license plate, enforcing the fixed length.
fn normalize_plate(raw: &str) -> Result<String, AppError> {
    let plate = raw.trim().to_ascii_uppercase();

    if plate.chars().count() != PLATE_LEN {
        return Err(AppError::bad_request(
            "License plate must be exactly 7 characters",
            json!({ "license_plate": plate }),
        ));
    }

    Ok(plate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockVehicleRepository;
    use chrono::Utc;

    fn test_vehicle(id: i64, plate: &str, status: VehicleStatus) -> Vehicle {
        let now = Utc::now();
        Vehicle::new(
            id,
            "Tesla".to_string(),
            "Model3".to_string(),
            2024,
            plate.to_string(),
            status,
            now,
            now,
        )
    }

    fn new_vehicle(plate: &str) -> NewVehicle {
        NewVehicle {
            make: "Tesla".to_string(),
            model: "Model3".to_string(),
            year: 2024,
            license_plate: plate.to_string(),
            status: VehicleStatus::Disconnected,
        }
    }

    #[tokio::test]
    async fn test_register_vehicle_success() {
        let mut mock_repo = MockVehicleRepository::new();

        mock_repo
            .expect_find_by_plate()
            .withf(|plate| plate == "ABC1234")
            .times(1)
            .returning(|_| Ok(None));

        let created = test_vehicle(1, "ABC1234", VehicleStatus::Disconnected);
        mock_repo
            .expect_create()
            .withf(|nv| nv.license_plate == "ABC1234")
            .times(1)
            .returning(move |_| Ok(created.clone()));

        let service = VehicleService::new(Arc::new(mock_repo));

        let vehicle = service.register_vehicle(new_vehicle("ABC1234")).await.unwrap();

        assert_eq!(vehicle.id, 1);
        assert_eq!(vehicle.status, VehicleStatus::Disconnected);
    }

    #[tokio::test]
    async fn test_register_vehicle_normalizes_plate() {
        let mut mock_repo = MockVehicleRepository::new();

        mock_repo
            .expect_find_by_plate()
            .withf(|plate| plate == "ABC1234")
            .times(1)
            .returning(|_| Ok(None));

        let created = test_vehicle(1, "ABC1234", VehicleStatus::Disconnected);
        mock_repo
            .expect_create()
            .withf(|nv| nv.license_plate == "ABC1234")
            .times(1)
            .returning(move |_| Ok(created.clone()));

        let service = VehicleService::new(Arc::new(mock_repo));

        let result = service.register_vehicle(new_vehicle("  abc1234 ")).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_register_vehicle_rejects_bad_plate_length() {
        let mock_repo = MockVehicleRepository::new();
        let service = VehicleService::new(Arc::new(mock_repo));

        let result = service.register_vehicle(new_vehicle("AB12")).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_register_vehicle_duplicate_plate() {
        let mut mock_repo = MockVehicleRepository::new();

        let existing = test_vehicle(5, "ABC1234", VehicleStatus::Connected);
        mock_repo
            .expect_find_by_plate()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        mock_repo.expect_create().times(0);

        let service = VehicleService::new(Arc::new(mock_repo));

        let result = service.register_vehicle(new_vehicle("ABC1234")).await;

        assert!(matches!(result.unwrap_err(), AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_get_vehicle_not_found() {
        let mut mock_repo = MockVehicleRepository::new();
        mock_repo.expect_find_by_id().times(1).returning(|_| Ok(None));

        let service = VehicleService::new(Arc::new(mock_repo));

        let result = service.get_vehicle(42).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_set_status_updates_existing() {
        let mut mock_repo = MockVehicleRepository::new();

        let updated = test_vehicle(7, "ABC1234", VehicleStatus::Connected);
        mock_repo
            .expect_update_status()
            .withf(|id, status| *id == 7 && *status == VehicleStatus::Connected)
            .times(1)
            .returning(move |_, _| Ok(Some(updated.clone())));

        let service = VehicleService::new(Arc::new(mock_repo));

        let vehicle = service
            .set_status(7, VehicleStatus::Connected)
            .await
            .unwrap();

        assert!(vehicle.is_connected());
    }

    #[tokio::test]
    async fn test_set_status_not_found() {
        let mut mock_repo = MockVehicleRepository::new();
        mock_repo
            .expect_update_status()
            .times(1)
            .returning(|_, _| Ok(None));

        let service = VehicleService::new(Arc::new(mock_repo));

        let result = service.set_status(99, VehicleStatus::Connected).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_remove_vehicle_not_found() {
        let mut mock_repo = MockVehicleRepository::new();
        mock_repo.expect_delete().times(1).returning(|_| Ok(false));

        let service = VehicleService::new(Arc::new(mock_repo));

        let result = service.remove_vehicle(13).await;

        assert!(matches!(result.unwrap_err(), AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_vehicles_returns_items_and_total() {
        let mut mock_repo = MockVehicleRepository::new();

        let items = vec![
            test_vehicle(1, "AAA1111", VehicleStatus::Connected),
            test_vehicle(2, "BBB2222", VehicleStatus::Disconnected),
        ];
        mock_repo
            .expect_list()
            .withf(|offset, limit| *offset == 0 && *limit == 25)
            .times(1)
            .returning(move |_, _| Ok(items.clone()));
        mock_repo.expect_count().times(1).returning(|| Ok(2));

        let service = VehicleService::new(Arc::new(mock_repo));

        let (vehicles, total) = service.list_vehicles(0, 25).await.unwrap();

        assert_eq!(vehicles.len(), 2);
        assert_eq!(total, 2);
    }
}
