//! Local-disk implementation of the `BlobStore` port.
//!
//! Blobs live as flat files in the uploads directory and are addressed by
//! their public URL path, `/uploads/<file name>`.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use autogallery_core::{BlobError, BlobStore};

/// Largest accepted upload.
pub const MAX_BLOB_BYTES: usize = 5 * 1024 * 1024;

/// Public path prefix for stored blobs.
const LOCATION_PREFIX: &str = "/uploads/";

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "avif"];

/// Blob store backed by a directory on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalBlobStore {
    root: PathBuf,
}

impl LocalBlobStore {
    /// Create a store rooted at `root` (normally the uploads directory).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory blobs are written to.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a location to a file path under the root.
    ///
    /// Only `/uploads/<single file name>` is accepted.
    pub fn resolve(&self, location: &str) -> Result<PathBuf, BlobError> {
        let name = location
            .strip_prefix(LOCATION_PREFIX)
            .ok_or_else(|| BlobError::Rejected(format!("not an uploads location: {location}")))?;

        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(file)), None) if !name.contains('\\') => {
                Ok(self.root.join(file))
            }
            _ => Err(BlobError::Rejected(format!(
                "location escapes the uploads directory: {location}"
            ))),
        }
    }
}

/// Lower-cased image extension of `original_name`, if it is an accepted type.
fn image_extension(original_name: &str) -> Result<String, BlobError> {
    let ext = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(ext)
    } else {
        Err(BlobError::Rejected(format!(
            "only image files are allowed: {original_name}"
        )))
    }
}

fn blob_file_name(ext: &str) -> String {
    let random = Uuid::new_v4().simple().to_string();
    format!(
        "vehicle-{}-{}.{ext}",
        Utc::now().timestamp_millis(),
        &random[..12]
    )
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put_blob(&self, original_name: &str, bytes: &[u8]) -> Result<String, BlobError> {
        let ext = image_extension(original_name)?;
        if bytes.len() > MAX_BLOB_BYTES {
            return Err(BlobError::Rejected(format!(
                "{original_name} is {} bytes, limit is {MAX_BLOB_BYTES}",
                bytes.len()
            )));
        }

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| BlobError::Io(e.to_string()))?;

        let file_name = blob_file_name(&ext);
        tokio::fs::write(self.root.join(&file_name), bytes)
            .await
            .map_err(|e| BlobError::Io(e.to_string()))?;

        let location = format!("{LOCATION_PREFIX}{file_name}");
        tracing::debug!(%location, size = bytes.len(), "Stored blob");
        Ok(location)
    }

    async fn delete_blob(&self, location: &str) -> Result<(), BlobError> {
        let path = self.resolve(location)?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::debug!(%location, "Deleted blob");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(BlobError::NotFound(location.to_string()))
            }
            Err(e) => Err(BlobError::Io(e.to_string())),
        }
    }
}
