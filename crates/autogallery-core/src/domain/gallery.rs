//! Gallery domain types.
//!
//! A gallery is the ordered set of images attached to one parent entity
//! (a vehicle). These types carry no storage details; the canonical
//! ordering rules live here so every caller derives them the same way.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An image attached to a parent entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Identifier assigned by the record store.
    pub id: i64,
    /// Owning parent. Never changes after creation.
    pub parent_id: i64,
    /// Opaque blob location (path or URL). Never changes after creation.
    pub location: String,
    /// Whether this is the parent's primary image.
    pub is_primary: bool,
    /// Creation time, used only for ordering.
    pub created_at: DateTime<Utc>,
}

/// An image to attach whose blob has already been stored by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUpload {
    pub location: String,
}

impl ImageUpload {
    pub fn new(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
        }
    }
}

/// Record data handed to the record store when inserting a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewGalleryImage {
    pub location: String,
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}

/// A blob deletion that failed without failing the surrounding operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlobWarning {
    pub image_id: i64,
    pub location: String,
    pub reason: String,
}

/// Result of detaching a single image.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetachOutcome {
    /// Remaining images in canonical order.
    pub gallery: Vec<GalleryImage>,
    pub warnings: Vec<BlobWarning>,
}

/// Result of removing every image of a parent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PurgeOutcome {
    /// Number of image records removed.
    pub removed: usize,
    pub warnings: Vec<BlobWarning>,
}

/// Compare two images under canonical gallery ordering.
///
/// Primary first, then ascending `created_at`, then ascending `id` so that
/// images created in the same instant still order deterministically.
pub fn compare_canonical(a: &GalleryImage, b: &GalleryImage) -> Ordering {
    b.is_primary
        .cmp(&a.is_primary)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

/// Sort a gallery into canonical order in place.
pub fn canonical_order(images: &mut [GalleryImage]) {
    images.sort_by(compare_canonical);
}

/// Pick the image that should become primary when the current one goes away.
///
/// Returns the first image under canonical ordering, skipping `excluded`.
pub fn next_primary_candidate(images: &[GalleryImage], excluded: i64) -> Option<&GalleryImage> {
    images
        .iter()
        .filter(|image| image.id != excluded)
        .min_by(|a, b| compare_canonical(a, b))
}

/// Count images flagged as primary.
pub fn primary_count(images: &[GalleryImage]) -> usize {
    images.iter().filter(|image| image.is_primary).count()
}

/// The image a listing should show as the headline photo.
///
/// Falls back to the first image in canonical order when nothing is flagged.
pub fn headline_image(images: &[GalleryImage]) -> Option<&GalleryImage> {
    images.iter().min_by(|a, b| compare_canonical(a, b))
}
