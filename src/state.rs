//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{AuthService, VehicleService};
use crate::config::StorageBackend;

#[derive(Clone)]
pub struct AppState {
    pub vehicle_service: Arc<VehicleService>,
    pub auth_service: Arc<AuthService>,
    pub storage: StorageBackend,
}

impl AppState {
    pub fn new(
        vehicle_service: Arc<VehicleService>,
        auth_service: Arc<AuthService>,
        storage: StorageBackend,
    ) -> Self {
        Self {
            vehicle_service,
            auth_service,
            storage,
        }
    }
}
