//! Application services orchestrating domain operations.

pub mod auth_service;
pub mod vehicle_service;

pub use auth_service::{AuthContext, AuthService};
pub use vehicle_service::VehicleService;
