//! Data root resolution.

use std::env;
use std::path::{Path, PathBuf};

use super::error::PathError;

/// Environment variable that overrides the data root.
pub const DATA_DIR_ENV: &str = "AUTOGALLERY_DATA_DIR";

const APP_DIR_NAME: &str = "autogallery";

/// Get the root directory for application data (database, uploads).
///
/// Resolution order:
/// 1. `explicit` (e.g. a `--data-dir` flag)
/// 2. `AUTOGALLERY_DATA_DIR` environment variable
/// 3. System data directory (e.g., `~/.local/share/autogallery`)
pub fn data_root(explicit: Option<&Path>) -> Result<PathBuf, PathError> {
    if let Some(path) = explicit {
        return non_empty(path.to_path_buf());
    }

    if let Ok(value) = env::var(DATA_DIR_ENV) {
        if !value.trim().is_empty() {
            return non_empty(PathBuf::from(value.trim()));
        }
    }

    dirs::data_dir()
        .map(|dir| dir.join(APP_DIR_NAME))
        .ok_or(PathError::NoDataDir)
}

fn non_empty(path: PathBuf) -> Result<PathBuf, PathError> {
    if path.as_os_str().is_empty() {
        Err(PathError::EmptyPath)
    } else {
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_root_wins() {
        let root = data_root(Some(Path::new("/srv/autogallery"))).unwrap();
        assert_eq!(root, PathBuf::from("/srv/autogallery"));
    }

    #[test]
    fn test_empty_explicit_root_is_rejected() {
        assert!(matches!(
            data_root(Some(Path::new(""))),
            Err(PathError::EmptyPath)
        ));
    }
}
