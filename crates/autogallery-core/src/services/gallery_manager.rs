//! Gallery manager - owns the primary-image invariants of a parent's gallery.
//!
//! Every gallery mutation goes through this service. It keeps exactly one
//! primary image per non-empty gallery, reassigns primary status when the
//! current primary is detached, and couples record removal with blob
//! cleanup. Durable state lives behind the `GalleryRepository` and
//! `BlobStore` ports; the manager itself holds no gallery state between
//! calls beyond the per-parent lock table.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use super::deadline::within;
use super::parent_locks::ParentLocks;
use crate::domain::{
    BlobWarning, DetachOutcome, GalleryImage, ImageUpload, NewGalleryImage, PurgeOutcome,
    canonical_order, headline_image, next_primary_candidate, primary_count,
};
use crate::ports::{BlobError, BlobStore, CoreError, GalleryRepository};
use crate::settings::Settings;

/// Service maintaining single-primary and ordering invariants over galleries.
pub struct GalleryManager {
    images: Arc<dyn GalleryRepository>,
    blobs: Arc<dyn BlobStore>,
    locks: ParentLocks,
    settings: Settings,
}

impl GalleryManager {
    /// Create a gallery manager over the given stores.
    pub fn new(
        images: Arc<dyn GalleryRepository>,
        blobs: Arc<dyn BlobStore>,
        settings: Settings,
    ) -> Self {
        Self {
            images,
            blobs,
            locks: ParentLocks::new(),
            settings,
        }
    }

    const fn timeout(&self) -> Duration {
        self.settings.storage_timeout()
    }

    /// Attach a batch of already-stored images to `parent_id`.
    ///
    /// The first image of the batch (or `explicit_primary`) becomes primary
    /// only when the gallery was empty. A gallery that already has a primary
    /// keeps it; a gallery with images but no primary gets the first new
    /// image as primary.
    pub async fn attach(
        &self,
        parent_id: i64,
        uploads: Vec<ImageUpload>,
        explicit_primary: Option<usize>,
    ) -> Result<Vec<GalleryImage>, CoreError> {
        self.validate_batch(&uploads, explicit_primary)?;

        let _guard = self.locks.lock(parent_id).await;
        let existing = self.fetch(parent_id).await?;
        ensure_single_primary(parent_id, &existing)?;

        let primary_index = if existing.is_empty() {
            Some(explicit_primary.unwrap_or(0))
        } else if primary_count(&existing) == 0 {
            warn!(parent_id, "Gallery has images but no primary; promoting first new image");
            Some(0)
        } else {
            None
        };

        let created_at = Utc::now();
        let batch: Vec<NewGalleryImage> = uploads
            .into_iter()
            .enumerate()
            .map(|(index, upload)| NewGalleryImage {
                location: upload.location,
                is_primary: primary_index == Some(index),
                created_at,
            })
            .collect();

        let inserted = within(
            "insert images",
            self.timeout(),
            self.images.insert_images(parent_id, &batch),
        )
        .await?;
        info!(parent_id, count = inserted.len(), "Attached images");

        // The write is committed; build the result without another read.
        let mut gallery = existing;
        gallery.extend(inserted);
        canonical_order(&mut gallery);
        Ok(gallery)
    }

    /// Remove one image, deleting its blob and reassigning primary if needed.
    ///
    /// Blob failures are reported as warnings in the outcome; the record is
    /// removed regardless.
    pub async fn detach(&self, parent_id: i64, image_id: i64) -> Result<DetachOutcome, CoreError> {
        let _guard = self.locks.lock(parent_id).await;
        let image = self.owned_image(parent_id, image_id).await?;
        let gallery = self.fetch(parent_id).await?;
        ensure_single_primary(parent_id, &gallery)?;

        let warnings: Vec<BlobWarning> = self.discard_blob(&image).await.into_iter().collect();

        let successor = if image.is_primary || primary_count(&gallery) == 0 {
            next_primary_candidate(&gallery, image.id).map(|next| next.id)
        } else {
            None
        };

        within(
            "delete image",
            self.timeout(),
            self.images.delete_image(image.id, successor),
        )
        .await?;
        info!(parent_id, image_id, ?successor, "Detached image");

        let mut remaining: Vec<GalleryImage> = gallery
            .into_iter()
            .filter(|other| other.id != image.id)
            .collect();
        if let Some(next) = successor {
            for other in &mut remaining {
                if other.id == next {
                    other.is_primary = true;
                }
            }
        }
        canonical_order(&mut remaining);

        Ok(DetachOutcome {
            gallery: remaining,
            warnings,
        })
    }

    /// Make `image_id` the sole primary image of `parent_id`.
    pub async fn designate_primary(
        &self,
        parent_id: i64,
        image_id: i64,
    ) -> Result<Vec<GalleryImage>, CoreError> {
        let _guard = self.locks.lock(parent_id).await;
        let image = self.owned_image(parent_id, image_id).await?;
        let mut gallery = self.fetch(parent_id).await?;
        ensure_single_primary(parent_id, &gallery)?;

        if image.is_primary {
            debug!(parent_id, image_id, "Image is already primary");
            return Ok(gallery);
        }

        within(
            "set primary image",
            self.timeout(),
            self.images.set_primary(parent_id, image_id),
        )
        .await?;
        info!(parent_id, image_id, "Designated primary image");

        for other in &mut gallery {
            other.is_primary = other.id == image_id;
        }
        canonical_order(&mut gallery);
        Ok(gallery)
    }

    /// List a parent's gallery in canonical order.
    ///
    /// An unknown or empty parent yields an empty gallery.
    pub async fn list_gallery(&self, parent_id: i64) -> Result<Vec<GalleryImage>, CoreError> {
        self.fetch(parent_id).await
    }

    /// The headline image of a parent, if it has any images.
    pub async fn primary_image(&self, parent_id: i64) -> Result<Option<GalleryImage>, CoreError> {
        let gallery = self.fetch(parent_id).await?;
        Ok(headline_image(&gallery).cloned())
    }

    /// Remove every image of `parent_id`, blobs first.
    ///
    /// Called before the parent itself is deleted so blobs are not orphaned
    /// by a cascading record delete.
    pub async fn delete_all(&self, parent_id: i64) -> Result<PurgeOutcome, CoreError> {
        let _guard = self.locks.lock(parent_id).await;
        self.purge(parent_id).await
    }

    /// Remove every image of `parent_id`, then run `remove_parent`, holding
    /// the parent's lock across both so no attach can slip in between.
    pub async fn delete_parent<F>(
        &self,
        parent_id: i64,
        remove_parent: F,
    ) -> Result<PurgeOutcome, CoreError>
    where
        F: Future<Output = Result<(), CoreError>>,
    {
        let _guard = self.locks.lock(parent_id).await;
        let outcome = self.purge(parent_id).await?;
        remove_parent.await?;
        Ok(outcome)
    }

    async fn purge(&self, parent_id: i64) -> Result<PurgeOutcome, CoreError> {
        let gallery = self.fetch(parent_id).await?;

        let mut warnings = Vec::new();
        for image in &gallery {
            if let Some(warning) = self.discard_blob(image).await {
                warnings.push(warning);
            }
        }

        let removed = within(
            "delete images",
            self.timeout(),
            self.images.delete_images_for_parent(parent_id),
        )
        .await?;
        info!(parent_id, removed, "Removed gallery");

        Ok(PurgeOutcome {
            removed: usize::try_from(removed).unwrap_or(usize::MAX),
            warnings,
        })
    }

    /// Check a batch before any storage call is made.
    pub fn validate_batch(
        &self,
        uploads: &[ImageUpload],
        explicit_primary: Option<usize>,
    ) -> Result<(), CoreError> {
        if uploads.is_empty() {
            return Err(CoreError::InvalidInput(
                "at least one image is required".to_string(),
            ));
        }

        let limit = self.settings.max_images_per_upload as usize;
        if uploads.len() > limit {
            return Err(CoreError::InvalidInput(format!(
                "{} images exceeds the limit of {limit} per upload",
                uploads.len()
            )));
        }

        if let Some(position) = uploads.iter().position(|u| u.location.trim().is_empty()) {
            return Err(CoreError::InvalidInput(format!(
                "image {position} has an empty location"
            )));
        }

        if let Some(index) = explicit_primary {
            if index >= uploads.len() {
                return Err(CoreError::InvalidInput(format!(
                    "primary index {index} is out of range for {} images",
                    uploads.len()
                )));
            }
        }

        Ok(())
    }

    async fn fetch(&self, parent_id: i64) -> Result<Vec<GalleryImage>, CoreError> {
        let mut gallery = within(
            "list images",
            self.timeout(),
            self.images.list_images(parent_id),
        )
        .await?;
        canonical_order(&mut gallery);
        Ok(gallery)
    }

    async fn owned_image(&self, parent_id: i64, image_id: i64) -> Result<GalleryImage, CoreError> {
        within("get image", self.timeout(), self.images.get_image(image_id))
            .await?
            .filter(|image| image.parent_id == parent_id)
            .ok_or_else(|| {
                CoreError::NotFound(format!("image {image_id} of vehicle {parent_id}"))
            })
    }

    async fn discard_blob(&self, image: &GalleryImage) -> Option<BlobWarning> {
        let reason = match tokio::time::timeout(
            self.timeout(),
            self.blobs.delete_blob(&image.location),
        )
        .await
        {
            Ok(Ok(())) => {
                debug!(image_id = image.id, location = %image.location, "Deleted blob");
                return None;
            }
            Ok(Err(BlobError::NotFound(_))) => {
                debug!(image_id = image.id, location = %image.location, "Blob already gone");
                return None;
            }
            Ok(Err(e)) => e.to_string(),
            Err(_) => format!(
                "blob delete timed out after {} ms",
                self.timeout().as_millis()
            ),
        };

        warn!(
            image_id = image.id,
            location = %image.location,
            error = %reason,
            "Failed to delete blob; removing record anyway"
        );
        Some(BlobWarning {
            image_id: image.id,
            location: image.location.clone(),
            reason,
        })
    }
}

fn ensure_single_primary(parent_id: i64, gallery: &[GalleryImage]) -> Result<(), CoreError> {
    let count = primary_count(gallery);
    if count > 1 {
        error!(parent_id, count, "Gallery has more than one primary image");
        return Err(CoreError::InvariantViolation(format!(
            "vehicle {parent_id} has {count} primary images"
        )));
    }
    Ok(())
}
