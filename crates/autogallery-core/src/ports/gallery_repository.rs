//! Gallery record store port.
//!
//! This port defines the persistence operations the gallery manager needs
//! for image records. Implementations must handle all storage details.

use async_trait::async_trait;

use super::RepositoryError;
use crate::domain::{GalleryImage, NewGalleryImage};

/// Record store for gallery images.
///
/// # Design Rules
///
/// - No `sqlx` types in signatures
/// - Listing order is unspecified; callers apply canonical ordering
/// - Multi-step mutations (`insert_images`, `set_primary`, `delete_image`
///   with a successor) must be atomic with respect to concurrent readers
#[async_trait]
pub trait GalleryRepository: Send + Sync {
    /// Insert a batch of images for a parent in one unit.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the parent doesn't exist.
    async fn insert_images(
        &self,
        parent_id: i64,
        images: &[NewGalleryImage],
    ) -> Result<Vec<GalleryImage>, RepositoryError>;

    /// Get a single image by ID.
    async fn get_image(&self, image_id: i64) -> Result<Option<GalleryImage>, RepositoryError>;

    /// List all images of a parent, in any order.
    async fn list_images(&self, parent_id: i64) -> Result<Vec<GalleryImage>, RepositoryError>;

    /// Set the primary flag of a single image.
    async fn update_image_primary(
        &self,
        image_id: i64,
        is_primary: bool,
    ) -> Result<(), RepositoryError>;

    /// Make `image_id` the only primary image of `parent_id`.
    ///
    /// Clearing the siblings and flagging the target happen atomically.
    async fn set_primary(&self, parent_id: i64, image_id: i64) -> Result<(), RepositoryError>;

    /// Delete an image, promoting `successor` to primary in the same unit.
    ///
    /// Returns `Err(RepositoryError::NotFound)` if the image doesn't exist.
    async fn delete_image(
        &self,
        image_id: i64,
        successor: Option<i64>,
    ) -> Result<(), RepositoryError>;

    /// Delete every image of a parent. Returns the number of records removed.
    async fn delete_images_for_parent(&self, parent_id: i64) -> Result<u64, RepositoryError>;
}
