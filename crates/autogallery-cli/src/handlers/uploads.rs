//! Turning image files on disk into stored blobs.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use autogallery_core::{BlobStore, ImageUpload};

use crate::error::CliError;

/// Read each file and store it through the blob store.
///
/// If any file fails, blobs stored so far are removed again before the
/// error is returned.
pub async fn store_files(blobs: &dyn BlobStore, files: &[PathBuf]) -> Result<Vec<ImageUpload>> {
    let mut uploads = Vec::with_capacity(files.len());

    for path in files {
        match store_file(blobs, path).await {
            Ok(location) => uploads.push(ImageUpload::new(location)),
            Err(e) => {
                discard(blobs, &uploads).await;
                return Err(e);
            }
        }
    }

    Ok(uploads)
}

async fn store_file(blobs: &dyn BlobStore, path: &Path) -> Result<String> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(CliError::from)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| CliError::Arguments(format!("{} is not a file name", path.display())))?;

    let location = blobs
        .put_blob(name, &bytes)
        .await
        .map_err(CliError::from)
        .with_context(|| format!("Failed to store {}", path.display()))?;
    tracing::debug!(file = %path.display(), %location, "Stored upload");

    Ok(location)
}

/// Best-effort removal of blobs that never made it into a gallery.
pub async fn discard(blobs: &dyn BlobStore, uploads: &[ImageUpload]) {
    for upload in uploads {
        if let Err(e) = blobs.delete_blob(&upload.location).await {
            tracing::warn!(location = %upload.location, error = %e, "Failed to remove unused upload");
        }
    }
}
