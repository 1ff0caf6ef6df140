//! Filesystem locations used by autogallery.
//!
//! Everything lives under a single data root: the `SQLite` database in
//! `data/` and uploaded image blobs in `uploads/`.

mod error;
mod platform;
mod storage;

pub use error::PathError;
pub use platform::{DATA_DIR_ENV, data_root};
pub use storage::{
    DATABASE_FILE_NAME, UPLOADS_DIR_NAME, database_path, ensure_directory, uploads_dir,
};
