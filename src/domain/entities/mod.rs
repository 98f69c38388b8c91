//! Core business entities.

pub mod vehicle;

pub use vehicle::{NewVehicle, Vehicle, VehicleStatus};
