//! Vehicle entity representing one registered vehicle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::AppError;

/// Connectivity status of a vehicle.
///
/// The status field accepts exactly two values; anything else is rejected
/// with a validation error before the store is touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    Connected,
    Disconnected,
}

impl VehicleStatus {
    /// Wire representation of the status, as stored and serialized.
    pub const fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Connected => "CONNECTED",
            VehicleStatus::Disconnected => "DISCONNECTED",
        }
    }

    /// Parses a wire representation into a status.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for any value other than
    /// `CONNECTED` or `DISCONNECTED`.
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value {
            "CONNECTED" => Ok(VehicleStatus::Connected),
            "DISCONNECTED" => Ok(VehicleStatus::Disconnected),
            other => Err(AppError::bad_request(
                "Status must be CONNECTED or DISCONNECTED",
                json!({ "status": other }),
            )),
        }
    }
}

impl std::fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A registered vehicle, keyed by unique id.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    pub id: i64,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub status: VehicleStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Vehicle {
    /// Creates a new Vehicle instance.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: i64,
        make: String,
        model: String,
        year: i32,
        license_plate: String,
        status: VehicleStatus,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            make,
            model,
            year,
            license_plate,
            status,
            created_at,
            updated_at,
        }
    }

    /// Returns true if the vehicle currently reports as connected.
    pub fn is_connected(&self) -> bool {
        self.status == VehicleStatus::Connected
    }
}

/// Input data for registering a new vehicle.
#[derive(Debug, Clone)]
pub struct NewVehicle {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub license_plate: String,
    pub status: VehicleStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_vehicle(id: i64, status: VehicleStatus) -> Vehicle {
        let now = Utc::now();
        Vehicle::new(
            id,
            "Tesla".to_string(),
            "Model3".to_string(),
            2024,
            "ABC1234".to_string(),
            status,
            now,
            now,
        )
    }

    #[test]
    fn test_status_parse_valid() {
        assert_eq!(
            VehicleStatus::parse("CONNECTED").unwrap(),
            VehicleStatus::Connected
        );
        assert_eq!(
            VehicleStatus::parse("DISCONNECTED").unwrap(),
            VehicleStatus::Disconnected
        );
    }

    #[test]
    fn test_status_parse_rejects_unknown_values() {
        for value in ["connected", "Connected", "PARKED", "", "CONNECTED "] {
            let err = VehicleStatus::parse(value).unwrap_err();
            assert!(matches!(err, AppError::Validation { .. }), "{value:?}");
        }
    }

    #[test]
    fn test_status_round_trips_through_as_str() {
        for status in [VehicleStatus::Connected, VehicleStatus::Disconnected] {
            assert_eq!(VehicleStatus::parse(status.as_str()).unwrap(), status);
        }
    }

    #[test]
    fn test_status_serde_uses_screaming_case() {
        let json = serde_json::to_string(&VehicleStatus::Connected).unwrap();
        assert_eq!(json, "\"CONNECTED\"");

        let parsed: VehicleStatus = serde_json::from_str("\"DISCONNECTED\"").unwrap();
        assert_eq!(parsed, VehicleStatus::Disconnected);
    }

    #[test]
    fn test_vehicle_creation() {
        let vehicle = test_vehicle(1, VehicleStatus::Disconnected);

        assert_eq!(vehicle.id, 1);
        assert_eq!(vehicle.make, "Tesla");
        assert_eq!(vehicle.license_plate, "ABC1234");
        assert!(!vehicle.is_connected());
    }

    #[test]
    fn test_vehicle_is_connected() {
        assert!(test_vehicle(2, VehicleStatus::Connected).is_connected());
    }
}
