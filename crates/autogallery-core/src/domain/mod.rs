//! Domain types for the vehicle catalog and its image galleries.
//!
//! These types are independent of any storage or transport concerns.

pub mod gallery;
pub mod vehicle;

pub use gallery::{
    BlobWarning, DetachOutcome, GalleryImage, ImageUpload, NewGalleryImage, PurgeOutcome,
    canonical_order, compare_canonical, headline_image, next_primary_candidate, primary_count,
};
pub use vehicle::{
    DEFAULT_RATING, NewVehicle, Vehicle, VehicleListing, VehicleUpdate, parse_features,
};
