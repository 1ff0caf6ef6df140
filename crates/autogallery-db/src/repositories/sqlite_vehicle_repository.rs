//! `SQLite` implementation of the `VehicleRepository` trait.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::SqlitePool;

use autogallery_core::{NewVehicle, RepositoryError, Vehicle, VehicleRepository};

use super::row_mappers::{VEHICLE_SELECT_COLUMNS, map_sqlx_error, row_to_vehicle};

fn features_json(features: &[String]) -> Result<String, RepositoryError> {
    serde_json::to_string(features).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// `SQLite` implementation of the `VehicleRepository` trait.
pub struct SqliteVehicleRepository {
    pool: SqlitePool,
}

impl SqliteVehicleRepository {
    /// Create a new `SQLite` vehicle repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleRepository for SqliteVehicleRepository {
    async fn insert(&self, vehicle: &NewVehicle) -> Result<Vehicle, RepositoryError> {
        let now = Utc::now();
        let features = features_json(&vehicle.features)?;

        let result = sqlx::query(
            r#"
            INSERT INTO vehicles (
                name, price, range_km, description, features, badge, badge_color,
                rating, is_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&vehicle.name)
        .bind(&vehicle.price)
        .bind(&vehicle.range_km)
        .bind(&vehicle.description)
        .bind(&features)
        .bind(&vehicle.badge)
        .bind(&vehicle.badge_color)
        .bind(i64::from(vehicle.rating))
        .bind(vehicle.is_active)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        Ok(Vehicle {
            id: result.last_insert_rowid(),
            name: vehicle.name.clone(),
            price: vehicle.price.clone(),
            range_km: vehicle.range_km.clone(),
            description: vehicle.description.clone(),
            features: vehicle.features.clone(),
            badge: vehicle.badge.clone(),
            badge_color: vehicle.badge_color.clone(),
            rating: vehicle.rating,
            is_active: vehicle.is_active,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_by_id(&self, id: i64) -> Result<Vehicle, RepositoryError> {
        let query = format!("SELECT {VEHICLE_SELECT_COLUMNS} FROM vehicles WHERE id = ?");

        let row = sqlx::query(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or_else(|| RepositoryError::NotFound(format!("Vehicle with ID {id}")))?;

        row_to_vehicle(&row)
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Vehicle>, RepositoryError> {
        let filter = if active_only { "WHERE is_active = 1" } else { "" };
        let query = format!(
            "SELECT {VEHICLE_SELECT_COLUMNS} FROM vehicles {filter} ORDER BY created_at DESC, id DESC"
        );

        let rows = sqlx::query(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_vehicle).collect()
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<(), RepositoryError> {
        let features = features_json(&vehicle.features)?;

        let result = sqlx::query(
            r#"
            UPDATE vehicles SET
                name = ?, price = ?, range_km = ?, description = ?, features = ?,
                badge = ?, badge_color = ?, rating = ?, is_active = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&vehicle.name)
        .bind(&vehicle.price)
        .bind(&vehicle.range_km)
        .bind(&vehicle.description)
        .bind(&features)
        .bind(&vehicle.badge)
        .bind(&vehicle.badge_color)
        .bind(i64::from(vehicle.rating))
        .bind(vehicle.is_active)
        .bind(vehicle.updated_at)
        .bind(vehicle.id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!(
                "Vehicle with ID {}",
                vehicle.id
            )));
        }

        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM vehicles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Vehicle with ID {id}")));
        }

        Ok(())
    }
}
