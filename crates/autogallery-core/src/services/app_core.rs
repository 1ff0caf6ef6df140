//! `AppCore` - the primary application facade.
//!
//! This is the composition root for core services. Adapters (CLI, web
//! handlers) receive an `AppCore` instance and use it to access all
//! functionality.

use std::sync::Arc;

use super::{GalleryManager, VehicleService};
use crate::ports::{BlobStore, Repos};
use crate::settings::Settings;

/// The core application facade.
///
/// # Example
///
/// ```ignore
/// let repos = Repos::new(vehicle_repo, image_repo);
/// let core = AppCore::new(repos, blobs, Settings::from_env()?);
///
/// let listings = core.vehicles().list(true).await?;
/// ```
pub struct AppCore {
    gallery: Arc<GalleryManager>,
    vehicles: VehicleService,
    blobs: Arc<dyn BlobStore>,
    settings: Settings,
}

impl AppCore {
    /// Create a new `AppCore` with the given repositories and blob store.
    pub fn new(repos: Repos, blobs: Arc<dyn BlobStore>, settings: Settings) -> Self {
        let gallery = Arc::new(GalleryManager::new(
            repos.images,
            Arc::clone(&blobs),
            settings,
        ));
        Self {
            vehicles: VehicleService::new(repos.vehicles, Arc::clone(&gallery), settings),
            gallery,
            blobs,
            settings,
        }
    }

    /// Access the gallery manager.
    pub fn gallery(&self) -> &GalleryManager {
        &self.gallery
    }

    /// Access the vehicle service.
    pub const fn vehicles(&self) -> &VehicleService {
        &self.vehicles
    }

    /// Access the blob store, for storing uploads before attaching them.
    pub fn blobs(&self) -> &Arc<dyn BlobStore> {
        &self.blobs
    }

    /// The settings this core was built with.
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }
}
