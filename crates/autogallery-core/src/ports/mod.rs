//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No `sqlx` types in any signature
//! - No filesystem implementation details
//! - Traits are minimal and CRUD-focused for repositories

pub mod blob_store;
pub mod gallery_repository;
pub mod vehicle_repository;

use std::sync::Arc;
use thiserror::Error;

pub use blob_store::{BlobError, BlobStore};
pub use gallery_repository::GalleryRepository;
pub use vehicle_repository::VehicleRepository;

/// Container for all repository trait objects.
///
/// Lets adapters wire repositories without coupling the core to concrete
/// implementations.
#[derive(Clone)]
pub struct Repos {
    /// Vehicle records.
    pub vehicles: Arc<dyn VehicleRepository>,
    /// Gallery image records.
    pub images: Arc<dyn GalleryRepository>,
}

impl Repos {
    /// Create a new Repos container.
    pub fn new(vehicles: Arc<dyn VehicleRepository>, images: Arc<dyn GalleryRepository>) -> Self {
        Self { vehicles, images }
    }
}

/// Domain-specific errors for repository operations.
///
/// This error type abstracts away storage implementation details (e.g., sqlx errors)
/// and provides a clean interface for services to handle storage failures.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage backend error (database, filesystem, etc.).
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A constraint was violated (e.g., foreign key, check constraint).
    #[error("Constraint violation: {0}")]
    Constraint(String),
}

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (CLI exit codes, HTTP statuses).
#[derive(Debug, Error)]
pub enum CoreError {
    /// A parent or image reference does not resolve.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request itself is malformed.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A store call failed or timed out during `step`.
    #[error("Storage unavailable during {step}: {reason}")]
    StorageUnavailable { step: &'static str, reason: String },

    /// Stored state breaks an invariant the operation relies on.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

impl CoreError {
    /// Map a repository failure that happened during `step`.
    pub fn from_repository(step: &'static str, err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(what) => Self::NotFound(what),
            other => Self::StorageUnavailable {
                step,
                reason: other.to_string(),
            },
        }
    }

    /// Whether retrying after re-reading state could succeed.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::StorageUnavailable { .. })
    }
}
