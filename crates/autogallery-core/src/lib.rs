//! Core domain types, ports and services for autogallery.
//!
//! The crate owns the gallery rules for the vehicle catalog: each vehicle has
//! at most one primary image, galleries list primary-first then oldest-first,
//! and removing images removes their blobs. Storage lives behind the traits in
//! [`ports`]; `autogallery-db` provides the `SQLite` and disk adapters.

#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod paths;
pub mod ports;
pub mod services;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    BlobWarning, DetachOutcome, GalleryImage, ImageUpload, NewGalleryImage, NewVehicle,
    PurgeOutcome, Vehicle, VehicleListing, VehicleUpdate, canonical_order, parse_features,
};
pub use ports::{
    BlobError, BlobStore, CoreError, GalleryRepository, Repos, RepositoryError, VehicleRepository,
};
pub use services::{AppCore, GalleryManager, ParentLocks, VehicleService};
pub use settings::{Settings, SettingsError, validate_settings};

