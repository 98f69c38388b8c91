//! Persistence implementations of the domain repository traits.

pub mod memory;
pub mod pg_token_repository;
pub mod pg_vehicle_repository;

pub use memory::{InMemoryTokenRepository, InMemoryVehicleRepository};
pub use pg_token_repository::PgTokenRepository;
pub use pg_vehicle_repository::PgVehicleRepository;
