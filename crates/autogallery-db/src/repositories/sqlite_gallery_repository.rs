//! `SQLite` implementation of the `GalleryRepository` trait.

use async_trait::async_trait;
use sqlx::SqlitePool;

use autogallery_core::{GalleryImage, GalleryRepository, NewGalleryImage, RepositoryError};

use super::row_mappers::{IMAGE_SELECT_COLUMNS, map_sqlx_error, row_to_image};

/// `SQLite` implementation of the `GalleryRepository` trait.
///
/// Multi-statement mutations run inside a transaction so concurrent readers
/// never see a half-applied primary change.
pub struct SqliteGalleryRepository {
    pool: SqlitePool,
}

impl SqliteGalleryRepository {
    /// Create a new `SQLite` gallery repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GalleryRepository for SqliteGalleryRepository {
    async fn insert_images(
        &self,
        parent_id: i64,
        images: &[NewGalleryImage],
    ) -> Result<Vec<GalleryImage>, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let parent: Option<(i64,)> = sqlx::query_as("SELECT id FROM vehicles WHERE id = ?")
            .bind(parent_id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;
        if parent.is_none() {
            return Err(RepositoryError::NotFound(format!(
                "Vehicle with ID {parent_id}"
            )));
        }

        let mut inserted = Vec::with_capacity(images.len());
        for image in images {
            let result = sqlx::query(
                "INSERT INTO vehicle_images (vehicle_id, image_url, is_primary, created_at) VALUES (?, ?, ?, ?)",
            )
            .bind(parent_id)
            .bind(&image.location)
            .bind(image.is_primary)
            .bind(image.created_at)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

            inserted.push(GalleryImage {
                id: result.last_insert_rowid(),
                parent_id,
                location: image.location.clone(),
                is_primary: image.is_primary,
                created_at: image.created_at,
            });
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(inserted)
    }

    async fn get_image(&self, image_id: i64) -> Result<Option<GalleryImage>, RepositoryError> {
        let query = format!("SELECT {IMAGE_SELECT_COLUMNS} FROM vehicle_images WHERE id = ?");

        let row = sqlx::query(&query)
            .bind(image_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        row.as_ref().map(row_to_image).transpose()
    }

    async fn list_images(&self, parent_id: i64) -> Result<Vec<GalleryImage>, RepositoryError> {
        let query = format!(
            "SELECT {IMAGE_SELECT_COLUMNS} FROM vehicle_images WHERE vehicle_id = ? ORDER BY id"
        );

        let rows = sqlx::query(&query)
            .bind(parent_id)
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter().map(row_to_image).collect()
    }

    async fn update_image_primary(
        &self,
        image_id: i64,
        is_primary: bool,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE vehicle_images SET is_primary = ? WHERE id = ?")
            .bind(is_primary)
            .bind(image_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(format!("Image with ID {image_id}")));
        }

        Ok(())
    }

    async fn set_primary(&self, parent_id: i64, image_id: i64) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        // Clear first so the one-primary index never sees two flagged rows.
        sqlx::query("UPDATE vehicle_images SET is_primary = 0 WHERE vehicle_id = ? AND id != ?")
            .bind(parent_id)
            .bind(image_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        let result =
            sqlx::query("UPDATE vehicle_images SET is_primary = 1 WHERE id = ? AND vehicle_id = ?")
                .bind(image_id)
                .bind(parent_id)
                .execute(&mut *tx)
                .await
                .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls back the cleared flags.
            return Err(RepositoryError::NotFound(format!(
                "Image with ID {image_id} for vehicle {parent_id}"
            )));
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn delete_image(
        &self,
        image_id: i64,
        successor: Option<i64>,
    ) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(map_sqlx_error)?;

        let parent_id: i64 =
            sqlx::query_scalar("SELECT vehicle_id FROM vehicle_images WHERE id = ?")
                .bind(image_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(map_sqlx_error)?
                .ok_or_else(|| RepositoryError::NotFound(format!("Image with ID {image_id}")))?;

        sqlx::query("DELETE FROM vehicle_images WHERE id = ?")
            .bind(image_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

        if let Some(next) = successor {
            let result = sqlx::query(
                "UPDATE vehicle_images SET is_primary = 1 WHERE id = ? AND vehicle_id = ?",
            )
            .bind(next)
            .bind(parent_id)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_error)?;

            if result.rows_affected() == 0 {
                // Dropping the transaction restores the deleted row.
                return Err(RepositoryError::NotFound(format!(
                    "Image with ID {next} for vehicle {parent_id}"
                )));
            }
        }

        tx.commit().await.map_err(map_sqlx_error)?;
        Ok(())
    }

    async fn delete_images_for_parent(&self, parent_id: i64) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM vehicle_images WHERE vehicle_id = ?")
            .bind(parent_id)
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::SqliteVehicleRepository;
    use crate::setup::setup_test_database;
    use autogallery_core::{NewVehicle, VehicleRepository};
    use chrono::{Duration, Utc};

    async fn repo_with_vehicle() -> (SqliteGalleryRepository, i64) {
        let pool = setup_test_database().await.unwrap();
        let vehicle = SqliteVehicleRepository::new(pool.clone())
            .insert(&NewVehicle::new("Sedan", "1", "300km"))
            .await
            .unwrap();
        (SqliteGalleryRepository::new(pool), vehicle.id)
    }

    fn batch(locations: &[&str], primary: Option<usize>) -> Vec<NewGalleryImage> {
        let base = Utc::now();
        locations
            .iter()
            .enumerate()
            .map(|(i, location)| NewGalleryImage {
                location: (*location).to_string(),
                is_primary: primary == Some(i),
                created_at: base + Duration::seconds(i as i64),
            })
            .collect()
    }

    #[tokio::test]
    async fn test_insert_and_list() {
        let (repo, vehicle) = repo_with_vehicle().await;
        let inserted = repo
            .insert_images(vehicle, &batch(&["/uploads/a.jpg", "/uploads/b.jpg"], Some(0)))
            .await
            .unwrap();
        assert_eq!(inserted.len(), 2);

        let listed = repo.list_images(vehicle).await.unwrap();
        assert_eq!(listed, inserted);

        let fetched = repo.get_image(inserted[1].id).await.unwrap().unwrap();
        assert_eq!(fetched.location, "/uploads/b.jpg");
        assert!(!fetched.is_primary);
        assert_eq!(fetched.created_at, inserted[1].created_at);
    }

    #[tokio::test]
    async fn test_insert_for_missing_vehicle() {
        let (repo, _) = repo_with_vehicle().await;
        let err = repo
            .insert_images(999, &batch(&["/uploads/a.jpg"], Some(0)))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_second_primary_is_a_constraint_error() {
        let (repo, vehicle) = repo_with_vehicle().await;
        repo.insert_images(vehicle, &batch(&["/uploads/a.jpg"], Some(0)))
            .await
            .unwrap();

        let err = repo
            .insert_images(vehicle, &batch(&["/uploads/b.jpg"], Some(0)))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Constraint(_)));
        // The failed batch rolled back.
        assert_eq!(repo.list_images(vehicle).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_set_primary_moves_flag() {
        let (repo, vehicle) = repo_with_vehicle().await;
        let inserted = repo
            .insert_images(
                vehicle,
                &batch(&["/uploads/a.jpg", "/uploads/b.jpg", "/uploads/c.jpg"], Some(0)),
            )
            .await
            .unwrap();

        repo.set_primary(vehicle, inserted[2].id).await.unwrap();

        let flags: Vec<bool> = repo
            .list_images(vehicle)
            .await
            .unwrap()
            .iter()
            .map(|i| i.is_primary)
            .collect();
        assert_eq!(flags, vec![false, false, true]);
    }

    #[tokio::test]
    async fn test_set_primary_for_foreign_image_rolls_back() {
        let (repo, vehicle) = repo_with_vehicle().await;
        let inserted = repo
            .insert_images(vehicle, &batch(&["/uploads/a.jpg"], Some(0)))
            .await
            .unwrap();

        let err = repo.set_primary(vehicle, 4242).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));

        let image = repo.get_image(inserted[0].id).await.unwrap().unwrap();
        assert!(image.is_primary);
    }

    #[tokio::test]
    async fn test_delete_promotes_successor() {
        let (repo, vehicle) = repo_with_vehicle().await;
        let inserted = repo
            .insert_images(vehicle, &batch(&["/uploads/a.jpg", "/uploads/b.jpg"], Some(0)))
            .await
            .unwrap();

        repo.delete_image(inserted[0].id, Some(inserted[1].id))
            .await
            .unwrap();

        let listed = repo.list_images(vehicle).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert!(listed[0].is_primary);

        let err = repo.delete_image(inserted[0].id, None).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_with_foreign_successor_rolls_back() {
        let (repo, vehicle) = repo_with_vehicle().await;
        let other = SqliteVehicleRepository::new(repo.pool.clone())
            .insert(&NewVehicle::new("Coupe", "2", "120km"))
            .await
            .unwrap();
        let ours = repo
            .insert_images(vehicle, &batch(&["/uploads/a.jpg", "/uploads/b.jpg"], Some(0)))
            .await
            .unwrap();
        let theirs = repo
            .insert_images(other.id, &batch(&["/uploads/x.jpg", "/uploads/y.jpg"], Some(0)))
            .await
            .unwrap();

        for successor in [theirs[1].id, 4242] {
            let err = repo
                .delete_image(ours[0].id, Some(successor))
                .await
                .unwrap_err();
            assert!(matches!(err, RepositoryError::NotFound(_)));
        }

        assert_eq!(repo.list_images(vehicle).await.unwrap(), ours);
        assert_eq!(repo.list_images(other.id).await.unwrap(), theirs);
    }

    #[tokio::test]
    async fn test_update_flag_and_delete_all() {
        let (repo, vehicle) = repo_with_vehicle().await;
        let inserted = repo
            .insert_images(vehicle, &batch(&["/uploads/a.jpg", "/uploads/b.jpg"], None))
            .await
            .unwrap();

        repo.update_image_primary(inserted[1].id, true).await.unwrap();
        assert!(repo.get_image(inserted[1].id).await.unwrap().unwrap().is_primary);
        assert!(matches!(
            repo.update_image_primary(777, true).await,
            Err(RepositoryError::NotFound(_))
        ));

        assert_eq!(repo.delete_images_for_parent(vehicle).await.unwrap(), 2);
        assert!(repo.list_images(vehicle).await.unwrap().is_empty());
        assert!(repo.get_image(inserted[0].id).await.unwrap().is_none());
    }
}
