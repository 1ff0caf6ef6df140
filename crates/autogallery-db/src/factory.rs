//! Composition utilities for building `AppCore` with `SQLite` backends.
//!
//! This module provides factory functions for wiring up the application
//! with `SQLite` repositories. It is focused purely on construction and
//! should not contain any domain logic.

use sqlx::SqlitePool;
use std::sync::Arc;

use autogallery_core::{AppCore, BlobStore, Repos, Settings};

use crate::repositories::{SqliteGalleryRepository, SqliteVehicleRepository};

/// Factory for creating repository instances with `SQLite` backends.
pub struct CoreFactory;

impl CoreFactory {
    /// Create a `SQLite` connection pool.
    ///
    /// # Arguments
    ///
    /// * `db_url` - `SQLite` connection URL (e.g., "sqlite:/var/lib/autogallery/data/autogallery.db")
    pub async fn create_pool(db_url: &str) -> anyhow::Result<SqlitePool> {
        let pool = SqlitePool::connect(db_url).await?;
        Ok(pool)
    }

    /// Build all `SQLite` repositories from a pool.
    pub fn build_repos(pool: SqlitePool) -> Repos {
        Repos::new(
            Self::vehicle_repository(pool.clone()),
            Self::gallery_repository(pool),
        )
    }

    /// Build a complete `AppCore` instance from a pool and blob store.
    ///
    /// Equivalent to:
    ///
    /// ```ignore
    /// let repos = CoreFactory::build_repos(pool);
    /// let core = AppCore::new(repos, blobs, settings);
    /// ```
    ///
    /// # Example
    ///
    /// ```ignore
    /// use autogallery_db::{CoreFactory, LocalBlobStore, setup_database};
    ///
    /// let pool = setup_database(&db_path).await?;
    /// let blobs = Arc::new(LocalBlobStore::new(uploads_dir));
    /// let core = CoreFactory::build_app_core(pool, blobs, Settings::from_env()?);
    /// ```
    pub fn build_app_core(
        pool: SqlitePool,
        blobs: Arc<dyn BlobStore>,
        settings: Settings,
    ) -> AppCore {
        AppCore::new(Self::build_repos(pool), blobs, settings)
    }

    /// Create a vehicle repository from a pool.
    pub fn vehicle_repository(pool: SqlitePool) -> Arc<SqliteVehicleRepository> {
        Arc::new(SqliteVehicleRepository::new(pool))
    }

    /// Create a gallery image repository from a pool.
    pub fn gallery_repository(pool: SqlitePool) -> Arc<SqliteGalleryRepository> {
        Arc::new(SqliteGalleryRepository::new(pool))
    }
}

/// Test database helper for integration tests.
///
/// Provides an in-memory `SQLite` database with the production schema applied.
#[cfg(any(test, feature = "test-utils"))]
pub struct TestDb {
    pool: SqlitePool,
}

#[cfg(any(test, feature = "test-utils"))]
impl TestDb {
    /// Create a new in-memory test database with full schema.
    pub async fn new() -> anyhow::Result<Self> {
        let pool = crate::setup::setup_test_database().await?;
        Ok(Self { pool })
    }

    /// Get the underlying pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create a vehicle repository using this test database.
    pub fn vehicle_repository(&self) -> SqliteVehicleRepository {
        SqliteVehicleRepository::new(self.pool.clone())
    }

    /// Create a gallery image repository using this test database.
    pub fn gallery_repository(&self) -> SqliteGalleryRepository {
        SqliteGalleryRepository::new(self.pool.clone())
    }

    /// Compose an `AppCore` over this database with default settings.
    pub fn app_core(&self, blobs: Arc<dyn BlobStore>) -> AppCore {
        CoreFactory::build_app_core(self.pool.clone(), blobs, Settings::with_defaults())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LocalBlobStore;
    use autogallery_core::{ImageUpload, NewVehicle};

    #[tokio::test]
    async fn test_build_app_core_over_test_db() {
        let db = TestDb::new().await.unwrap();
        let dir = tempfile::tempdir().unwrap();
        let core = db.app_core(Arc::new(LocalBlobStore::new(dir.path())));

        let listing = core
            .vehicles()
            .create(
                NewVehicle::new("Hatchback", "$31,000", "410 km"),
                vec![ImageUpload::new("/uploads/a.jpg")],
            )
            .await
            .unwrap();

        assert_eq!(listing.images.len(), 1);
        assert_eq!(listing.primary_image.as_deref(), Some("/uploads/a.jpg"));
        assert_eq!(
            core.gallery()
                .list_gallery(listing.vehicle.id)
                .await
                .unwrap()
                .len(),
            1
        );
    }
}
