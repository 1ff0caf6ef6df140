//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Database pool and repositories (via autogallery-db)
//! - Local blob store rooted at the uploads directory
//! - Core services (via autogallery-core)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use autogallery_core::paths::{data_root, database_path, uploads_dir};
use autogallery_core::{AppCore, Settings};
use autogallery_db::{CoreFactory, LocalBlobStore, setup_database};

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Root for the database and uploads.
    pub data_root: PathBuf,
    /// Gallery settings.
    pub settings: Settings,
}

impl CliConfig {
    /// Resolve the data root (explicit override first) and read settings
    /// from the environment.
    pub fn resolve(data_dir: Option<PathBuf>) -> Result<Self> {
        Ok(Self {
            data_root: data_root(data_dir.as_deref())?,
            settings: Settings::from_env()?,
        })
    }

    /// Path of the `SQLite` database file.
    pub fn database_path(&self) -> Result<PathBuf> {
        Ok(database_path(&self.data_root)?)
    }

    /// Directory holding uploaded image blobs.
    pub fn uploads_dir(&self) -> Result<PathBuf> {
        Ok(uploads_dir(&self.data_root)?)
    }
}

/// Fully composed application context for CLI commands.
pub struct CliContext {
    /// The core application facade.
    pub app: AppCore,
    /// Directory blobs are stored in.
    pub uploads_dir: PathBuf,
}

impl CliContext {
    /// Access the `AppCore`.
    pub fn app(&self) -> &AppCore {
        &self.app
    }
}

/// Bootstrap the CLI application.
///
/// Creates the database (applying the schema), the blob store and the
/// `AppCore` facade.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let db_path = config.database_path()?;
    let uploads_dir = config.uploads_dir()?;
    tracing::debug!(
        database = %db_path.display(),
        uploads = %uploads_dir.display(),
        "Bootstrapping"
    );

    let pool = setup_database(&db_path).await?;
    let blobs = Arc::new(LocalBlobStore::new(uploads_dir.clone()));
    let app = CoreFactory::build_app_core(pool, blobs, config.settings);

    Ok(CliContext { app, uploads_dir })
}
