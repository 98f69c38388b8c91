//! In-memory repository implementations.
//!
//! Backing store for `STORAGE=memory` deployments and for tests that need a
//! full stack without PostgreSQL. Writes are serialized through an
//! `RwLock`, so concurrent updates to the same record cannot be lost.

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::RwLock;

use crate::domain::entities::{NewVehicle, Vehicle, VehicleStatus};
use crate::domain::repositories::{
    ApiToken, TokenRepository, TokenRole, VehicleRepository,
};
use crate::error::AppError;

/// Vehicle store backed by an in-process map.
///
/// Ids are assigned from a monotonic counter and never reused within a
/// process run.
pub struct InMemoryVehicleRepository {
    vehicles: RwLock<HashMap<i64, Vehicle>>,
    next_id: AtomicI64,
}

impl InMemoryVehicleRepository {
    pub fn new() -> Self {
        Self {
            vehicles: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryVehicleRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl VehicleRepository for InMemoryVehicleRepository {
    async fn create(&self, new_vehicle: NewVehicle) -> Result<Vehicle, AppError> {
        let mut vehicles = self.vehicles.write().await;

        // Uniqueness is checked under the write lock to close the race the
        // service-level pre-check leaves open.
        if vehicles
            .values()
            .any(|v| v.license_plate == new_vehicle.license_plate)
        {
            return Err(AppError::conflict(
                "License plate already registered",
                json!({ "license_plate": new_vehicle.license_plate }),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let now = Utc::now();
        let vehicle = Vehicle::new(
            id,
            new_vehicle.make,
            new_vehicle.model,
            new_vehicle.year,
            new_vehicle.license_plate,
            new_vehicle.status,
            now,
            now,
        );

        vehicles.insert(id, vehicle.clone());
        Ok(vehicle)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>, AppError> {
        Ok(self.vehicles.read().await.get(&id).cloned())
    }

    async fn find_by_plate(&self, license_plate: &str) -> Result<Option<Vehicle>, AppError> {
        Ok(self
            .vehicles
            .read()
            .await
            .values()
            .find(|v| v.license_plate == license_plate)
            .cloned())
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Vehicle>, AppError> {
        let vehicles = self.vehicles.read().await;

        let mut all: Vec<Vehicle> = vehicles.values().cloned().collect();
        all.sort_by_key(|v| v.id);

        Ok(all
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.vehicles.read().await.len() as i64)
    }

    async fn update_status(
        &self,
        id: i64,
        status: VehicleStatus,
    ) -> Result<Option<Vehicle>, AppError> {
        let mut vehicles = self.vehicles.write().await;

        Ok(vehicles.get_mut(&id).map(|vehicle| {
            vehicle.status = status;
            vehicle.updated_at = Utc::now();
            vehicle.clone()
        }))
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(self.vehicles.write().await.remove(&id).is_some())
    }
}

/// Token store backed by an in-process map.
pub struct InMemoryTokenRepository {
    tokens: RwLock<HashMap<i64, ApiToken>>,
    next_id: AtomicI64,
}

impl InMemoryTokenRepository {
    pub fn new() -> Self {
        Self {
            tokens: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryTokenRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenRepository for InMemoryTokenRepository {
    async fn find_valid(&self, token_hash: &str) -> Result<Option<ApiToken>, AppError> {
        Ok(self
            .tokens
            .read()
            .await
            .values()
            .find(|t| t.token_hash == token_hash && !t.is_revoked())
            .cloned())
    }

    async fn update_last_used(&self, token_hash: &str) -> Result<(), AppError> {
        let mut tokens = self.tokens.write().await;

        if let Some(token) = tokens
            .values_mut()
            .find(|t| t.token_hash == token_hash && !t.is_revoked())
        {
            token.last_used_at = Some(Utc::now());
        }

        Ok(())
    }

    async fn create_token(
        &self,
        name: &str,
        token_hash: &str,
        role: TokenRole,
    ) -> Result<ApiToken, AppError> {
        let mut tokens = self.tokens.write().await;

        if tokens
            .values()
            .any(|t| t.name == name || t.token_hash == token_hash)
        {
            return Err(AppError::conflict(
                "Token with this name already exists",
                json!({ "name": name }),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let token = ApiToken {
            id,
            name: name.to_string(),
            token_hash: token_hash.to_string(),
            role,
            created_at: Utc::now(),
            last_used_at: None,
            revoked_at: None,
        };

        tokens.insert(id, token.clone());
        Ok(token)
    }

    async fn list_tokens(&self) -> Result<Vec<ApiToken>, AppError> {
        let tokens = self.tokens.read().await;

        let mut all: Vec<ApiToken> = tokens.values().cloned().collect();
        all.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(all)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ApiToken>, AppError> {
        Ok(self.tokens.read().await.get(&id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<ApiToken>, AppError> {
        Ok(self
            .tokens
            .read()
            .await
            .values()
            .find(|t| t.name == name)
            .cloned())
    }

    async fn revoke_token(&self, id: i64) -> Result<(), AppError> {
        let mut tokens = self.tokens.write().await;

        match tokens.get_mut(&id) {
            Some(token) if !token.is_revoked() => {
                token.revoked_at = Some(Utc::now());
                Ok(())
            }
            _ => Err(AppError::not_found(
                "Token not found or already revoked",
                json!({ "id": id }),
            )),
        }
    }
}
