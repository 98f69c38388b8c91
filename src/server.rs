//! HTTP server initialization and runtime setup.
//!
//! Handles storage backend selection, database connections, migrations, and
//! the Axum server lifecycle.

use crate::application::services::{AuthService, VehicleService};
use crate::config::{Config, StorageBackend};
use crate::domain::repositories::{TokenRepository, VehicleRepository};
use crate::infrastructure::persistence::{
    InMemoryTokenRepository, InMemoryVehicleRepository, PgTokenRepository, PgVehicleRepository,
};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Storage backend (PostgreSQL pool with migrations, or in-memory)
/// - Vehicle and auth services
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (vehicle_repository, token_repository): (
        Arc<dyn VehicleRepository>,
        Arc<dyn TokenRepository>,
    ) = match config.storage {
        StorageBackend::Postgres => {
            let database_url = config
                .database_url
                .as_deref()
                .context("DATABASE_URL is required for the postgres backend")?;

            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
                .idle_timeout(Duration::from_secs(config.db_idle_timeout))
                .max_lifetime(Duration::from_secs(config.db_max_lifetime))
                .connect(database_url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to apply migrations")?;

            let pool = Arc::new(pool);
            (
                Arc::new(PgVehicleRepository::new(pool.clone())),
                Arc::new(PgTokenRepository::new(pool)),
            )
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; data is lost on restart");
            (
                Arc::new(InMemoryVehicleRepository::new()),
                Arc::new(InMemoryTokenRepository::new()),
            )
        }
    };

    let vehicle_service = Arc::new(VehicleService::new(vehicle_repository));
    let auth_service = Arc::new(AuthService::new(
        token_repository,
        config.token_signing_secret.clone(),
    ));

    let state = AppState::new(vehicle_service, auth_service, config.storage);

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .await?;

    Ok(())
}
