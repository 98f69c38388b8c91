//! Domain layer: entities and repository contracts.
//!
//! This layer has no dependency on axum or sqlx types; persistence and
//! transport concerns live in the outer layers.

pub mod entities;
pub mod repositories;
