//! Blob store port.
//!
//! Blobs are the stored image bytes behind a gallery record's `location`.

use async_trait::async_trait;
use thiserror::Error;

/// Errors reported by a blob store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BlobError {
    /// Nothing is stored at the location.
    #[error("Blob not found: {0}")]
    NotFound(String),

    /// The blob was refused (unsupported type, too large, bad location).
    #[error("Blob rejected: {0}")]
    Rejected(String),

    /// Underlying storage failure.
    #[error("Blob I/O error: {0}")]
    Io(String),
}

/// Storage for image bytes addressed by location strings.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` for a file originally named `original_name`.
    ///
    /// Returns the location to record on the gallery image.
    async fn put_blob(&self, original_name: &str, bytes: &[u8]) -> Result<String, BlobError>;

    /// Delete the blob at `location`.
    ///
    /// Returns `Err(BlobError::NotFound)` if nothing is stored there.
    async fn delete_blob(&self, location: &str) -> Result<(), BlobError>;
}
