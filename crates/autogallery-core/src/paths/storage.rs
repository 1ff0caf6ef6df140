//! Database and uploads locations under the data root.

use std::fs;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Database file name inside `<root>/data`.
pub const DATABASE_FILE_NAME: &str = "autogallery.db";

/// Directory holding uploaded image blobs, relative to the root.
pub const UPLOADS_DIR_NAME: &str = "uploads";

/// Get the path to the database file, creating its directory.
pub fn database_path(root: &Path) -> Result<PathBuf, PathError> {
    let data_dir = ensure_directory(&root.join("data"))?;
    Ok(data_dir.join(DATABASE_FILE_NAME))
}

/// Get the uploads directory, creating it if needed.
pub fn uploads_dir(root: &Path) -> Result<PathBuf, PathError> {
    ensure_directory(&root.join(UPLOADS_DIR_NAME))
}

/// Create `path` (and parents) if missing and check it is a directory.
pub fn ensure_directory(path: &Path) -> Result<PathBuf, PathError> {
    if path.exists() && !path.is_dir() {
        return Err(PathError::NotADirectory(path.to_path_buf()));
    }

    fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(path.to_path_buf())
}
