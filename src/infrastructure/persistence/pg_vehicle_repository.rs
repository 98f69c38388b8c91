//! PostgreSQL implementation of the vehicle repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewVehicle, Vehicle, VehicleStatus};
use crate::domain::repositories::VehicleRepository;
use crate::error::AppError;
use serde_json::json;

/// Raw database row; `status` is validated when converting to the entity.
#[derive(sqlx::FromRow)]
struct VehicleRow {
    id: i64,
    make: String,
    model: String,
    year: i32,
    license_plate: String,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<VehicleRow> for Vehicle {
    type Error = AppError;

    fn try_from(row: VehicleRow) -> Result<Self, Self::Error> {
        // The CHECK constraint makes this unreachable for rows written by
        // this service.
        let status = VehicleStatus::parse(&row.status).map_err(|_| {
            AppError::internal(
                "Stored vehicle has invalid status",
                json!({ "id": row.id, "status": row.status }),
            )
        })?;

        Ok(Vehicle::new(
            row.id,
            row.make,
            row.model,
            row.year,
            row.license_plate,
            status,
            row.created_at,
            row.updated_at,
        ))
    }
}

/// PostgreSQL repository for vehicle storage and retrieval.
///
/// Uses SQLx prepared statements for SQL injection protection and type safety.
pub struct PgVehicleRepository {
    pool: Arc<PgPool>,
}

impl PgVehicleRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for PgVehicleRepository {
    async fn create(&self, new_vehicle: NewVehicle) -> Result<Vehicle, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            INSERT INTO vehicles (make, model, year, license_plate, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, make, model, year, license_plate, status, created_at, updated_at
            "#,
        )
        .bind(&new_vehicle.make)
        .bind(&new_vehicle.model)
        .bind(new_vehicle.year)
        .bind(&new_vehicle.license_plate)
        .bind(new_vehicle.status.as_str())
        .fetch_one(self.pool.as_ref())
        .await?;

        row.try_into()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Vehicle>, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT id, make, model, year, license_plate, status, created_at, updated_at
            FROM vehicles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn find_by_plate(&self, license_plate: &str) -> Result<Option<Vehicle>, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT id, make, model, year, license_plate, status, created_at, updated_at
            FROM vehicles
            WHERE license_plate = $1
            "#,
        )
        .bind(license_plate)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn list(&self, offset: i64, limit: i64) -> Result<Vec<Vehicle>, AppError> {
        let rows = sqlx::query_as::<_, VehicleRow>(
            r#"
            SELECT id, make, model, year, license_plate, status, created_at, updated_at
            FROM vehicles
            ORDER BY id
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        rows.into_iter().map(Vehicle::try_from).collect()
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM vehicles")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn update_status(
        &self,
        id: i64,
        status: VehicleStatus,
    ) -> Result<Option<Vehicle>, AppError> {
        let row = sqlx::query_as::<_, VehicleRow>(
            r#"
            UPDATE vehicles
            SET status = $2, updated_at = NOW()
            WHERE id = $1
            RETURNING id, make, model, year, license_plate, status, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Vehicle::try_from).transpose()
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
