//! HTTP request handlers.

pub mod health;
pub mod vehicles;

pub use health::health_handler;
pub use vehicles::{
    create_vehicle_handler, delete_vehicle_handler, get_vehicle_handler, list_vehicles_handler,
    update_status_handler,
};
