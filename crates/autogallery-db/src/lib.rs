//! `SQLite` repositories and local-disk blob storage for autogallery.
//!
//! This crate implements the ports defined in `autogallery-core`:
//! vehicle and gallery image records live in `SQLite` (via `sqlx`), and
//! uploaded image bytes live under the uploads directory on disk.

#![deny(unsafe_code)]

pub mod blobs;
pub mod factory;
pub mod repositories;
pub mod setup;

// Re-export factory for convenient access
pub use factory::CoreFactory;

// Re-export TestDb for integration tests
#[cfg(any(test, feature = "test-utils"))]
pub use factory::TestDb;

pub use blobs::{LocalBlobStore, MAX_BLOB_BYTES};
pub use repositories::{SqliteGalleryRepository, SqliteVehicleRepository};

// Re-export setup functions for convenient access
pub use setup::setup_database;
#[cfg(any(test, feature = "test-utils"))]
pub use setup::setup_test_database;

// Linked for the bundled SQLite build only.
use libsqlite3_sys as _;
