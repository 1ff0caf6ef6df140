//! Vehicle repository port.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{NewVehicle, Vehicle};

/// Repository for vehicle persistence operations.
///
/// CRUD only. Gallery images are managed through `GalleryRepository`;
/// deleting a vehicle cascades to its image records but never to blobs.
#[async_trait]
pub trait VehicleRepository: Send + Sync {
    /// Insert a new vehicle and return it with its assigned ID.
    async fn insert(&self, vehicle: &NewVehicle) -> Result<Vehicle, RepositoryError>;

    /// Get a vehicle by ID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the vehicle doesn't exist.
    async fn get_by_id(&self, id: i64) -> Result<Vehicle, RepositoryError>;

    /// List vehicles, newest first.
    async fn list(&self, active_only: bool) -> Result<Vec<Vehicle>, RepositoryError>;

    /// Persist all fields of an existing vehicle.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the vehicle doesn't exist.
    async fn update(&self, vehicle: &Vehicle) -> Result<(), RepositoryError>;

    /// Delete a vehicle by ID.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the vehicle doesn't exist.
    async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
}
