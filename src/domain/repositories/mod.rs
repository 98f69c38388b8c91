//! Repository traits implemented by the persistence layer.

pub mod token_repository;
pub mod vehicle_repository;

pub use token_repository::{ApiToken, TokenRepository, TokenRole};
pub use vehicle_repository::VehicleRepository;

#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use vehicle_repository::MockVehicleRepository;
