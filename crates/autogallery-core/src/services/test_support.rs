//! In-memory port fakes shared by the service tests.

use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::domain::{GalleryImage, NewGalleryImage, NewVehicle, Vehicle};
use crate::ports::{
    BlobStore, GalleryRepository, RepositoryError, VehicleRepository, blob_store::MockBlobStore,
};

#[derive(Default)]
struct State {
    parents: HashSet<i64>,
    vehicles: BTreeMap<i64, Vehicle>,
    images: BTreeMap<i64, GalleryImage>,
    next_image_id: i64,
    next_vehicle_id: i64,
}

/// Record store holding vehicles and images in memory.
///
/// Deleting a vehicle cascades to its images, like the `SQLite` schema.
#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn with_parents(parents: &[i64]) -> Arc<Self> {
        let store = Self::default();
        {
            let mut state = store.state.lock().unwrap();
            state.parents.extend(parents.iter().copied());
        }
        Arc::new(store)
    }

    /// Insert a record as-is, bypassing the manager (for corrupt-state tests).
    pub fn seed(&self, parent_id: i64, location: &str, is_primary: bool, secs: i64) -> i64 {
        let mut state = self.state.lock().unwrap();
        state.next_image_id += 1;
        let id = state.next_image_id;
        state.images.insert(
            id,
            GalleryImage {
                id,
                parent_id,
                location: location.to_string(),
                is_primary,
                created_at: at(secs),
            },
        );
        id
    }

    pub fn image_count(&self) -> usize {
        self.state.lock().unwrap().images.len()
    }
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

/// Blob store that accepts every delete.
pub fn accepting_blobs() -> Arc<dyn BlobStore> {
    let mut blobs = MockBlobStore::new();
    blobs.expect_delete_blob().returning(|_| Ok(()));
    blobs
        .expect_put_blob()
        .returning(|name, _| Ok(format!("/uploads/{name}")));
    Arc::new(blobs)
}

#[async_trait]
impl GalleryRepository for InMemoryStore {
    async fn insert_images(
        &self,
        parent_id: i64,
        images: &[NewGalleryImage],
    ) -> Result<Vec<GalleryImage>, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if !state.parents.contains(&parent_id) {
            return Err(RepositoryError::NotFound(format!("Vehicle with ID {parent_id}")));
        }
        let mut inserted = Vec::with_capacity(images.len());
        for image in images {
            state.next_image_id += 1;
            let record = GalleryImage {
                id: state.next_image_id,
                parent_id,
                location: image.location.clone(),
                is_primary: image.is_primary,
                created_at: image.created_at,
            };
            state.images.insert(record.id, record.clone());
            inserted.push(record);
        }
        Ok(inserted)
    }

    async fn get_image(&self, image_id: i64) -> Result<Option<GalleryImage>, RepositoryError> {
        Ok(self.state.lock().unwrap().images.get(&image_id).cloned())
    }

    async fn list_images(&self, parent_id: i64) -> Result<Vec<GalleryImage>, RepositoryError> {
        // Reverse order so callers can't lean on insertion order.
        Ok(self
            .state
            .lock()
            .unwrap()
            .images
            .values()
            .rev()
            .filter(|image| image.parent_id == parent_id)
            .cloned()
            .collect())
    }

    async fn update_image_primary(
        &self,
        image_id: i64,
        is_primary: bool,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let image = state
            .images
            .get_mut(&image_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Image with ID {image_id}")))?;
        image.is_primary = is_primary;
        Ok(())
    }

    async fn set_primary(&self, parent_id: i64, image_id: i64) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let owned = state
            .images
            .get(&image_id)
            .is_some_and(|image| image.parent_id == parent_id);
        if !owned {
            return Err(RepositoryError::NotFound(format!("Image with ID {image_id}")));
        }
        for image in state.images.values_mut() {
            if image.parent_id == parent_id {
                image.is_primary = image.id == image_id;
            }
        }
        Ok(())
    }

    async fn delete_image(
        &self,
        image_id: i64,
        successor: Option<i64>,
    ) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let parent_id = state
            .images
            .get(&image_id)
            .map(|image| image.parent_id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Image with ID {image_id}")))?;
        if let Some(next) = successor {
            let sibling = next != image_id
                && state
                    .images
                    .get(&next)
                    .is_some_and(|image| image.parent_id == parent_id);
            if !sibling {
                return Err(RepositoryError::NotFound(format!("Image with ID {next}")));
            }
        }
        state.images.remove(&image_id);
        if let Some(next) = successor.and_then(|id| state.images.get_mut(&id)) {
            next.is_primary = true;
        }
        Ok(())
    }

    async fn delete_images_for_parent(&self, parent_id: i64) -> Result<u64, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let before = state.images.len();
        state.images.retain(|_, image| image.parent_id != parent_id);
        Ok((before - state.images.len()) as u64)
    }
}

#[async_trait]
impl VehicleRepository for InMemoryStore {
    async fn insert(&self, vehicle: &NewVehicle) -> Result<Vehicle, RepositoryError> {
        let mut state = self.state.lock().unwrap();
        state.next_vehicle_id += 1;
        let id = state.next_vehicle_id;
        let now = at(id);
        let record = Vehicle {
            id,
            name: vehicle.name.clone(),
            price: vehicle.price.clone(),
            range_km: vehicle.range_km.clone(),
            description: vehicle.description.clone(),
            features: vehicle.features.clone(),
            badge: vehicle.badge.clone(),
            badge_color: vehicle.badge_color.clone(),
            rating: vehicle.rating,
            is_active: vehicle.is_active,
            created_at: now,
            updated_at: now,
        };
        state.parents.insert(id);
        state.vehicles.insert(id, record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: i64) -> Result<Vehicle, RepositoryError> {
        self.state
            .lock()
            .unwrap()
            .vehicles
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("Vehicle with ID {id}")))
    }

    async fn list(&self, active_only: bool) -> Result<Vec<Vehicle>, RepositoryError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .vehicles
            .values()
            .rev()
            .filter(|vehicle| !active_only || vehicle.is_active)
            .cloned()
            .collect())
    }

    async fn update(&self, vehicle: &Vehicle) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        let slot = state
            .vehicles
            .get_mut(&vehicle.id)
            .ok_or_else(|| RepositoryError::NotFound(format!("Vehicle with ID {}", vehicle.id)))?;
        *slot = vehicle.clone();
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), RepositoryError> {
        let mut state = self.state.lock().unwrap();
        if state.vehicles.remove(&id).is_none() {
            return Err(RepositoryError::NotFound(format!("Vehicle with ID {id}")));
        }
        state.parents.remove(&id);
        state.images.retain(|_, image| image.parent_id != id);
        Ok(())
    }
}

/// How a `FlakyStore` treats record writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteFault {
    None,
    Fail,
    Hang,
}

/// Gallery store wrapper that injects storage failures around an
/// `InMemoryStore`.
pub struct FlakyStore {
    inner: Arc<InMemoryStore>,
    healthy_lists: Option<usize>,
    list_calls: AtomicUsize,
    writes: WriteFault,
}

impl FlakyStore {
    /// Serve `healthy` `list_images` calls, then fail every later one.
    pub fn failing_reads_after(inner: &Arc<InMemoryStore>, healthy: usize) -> Arc<Self> {
        Arc::new(Self {
            inner: inner.clone(),
            healthy_lists: Some(healthy),
            list_calls: AtomicUsize::new(0),
            writes: WriteFault::None,
        })
    }

    /// Reads pass through; every write behaves as `fault`.
    pub fn with_writes(inner: &Arc<InMemoryStore>, fault: WriteFault) -> Arc<Self> {
        Arc::new(Self {
            inner: inner.clone(),
            healthy_lists: None,
            list_calls: AtomicUsize::new(0),
            writes: fault,
        })
    }

    async fn write_fault(&self) -> Result<(), RepositoryError> {
        match self.writes {
            WriteFault::None => Ok(()),
            WriteFault::Fail => Err(RepositoryError::Storage("database is locked".to_string())),
            WriteFault::Hang => std::future::pending().await,
        }
    }
}

#[async_trait]
impl GalleryRepository for FlakyStore {
    async fn insert_images(
        &self,
        parent_id: i64,
        images: &[NewGalleryImage],
    ) -> Result<Vec<GalleryImage>, RepositoryError> {
        self.write_fault().await?;
        self.inner.insert_images(parent_id, images).await
    }

    async fn get_image(&self, image_id: i64) -> Result<Option<GalleryImage>, RepositoryError> {
        self.inner.get_image(image_id).await
    }

    async fn list_images(&self, parent_id: i64) -> Result<Vec<GalleryImage>, RepositoryError> {
        let call = self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.healthy_lists.is_some_and(|healthy| call >= healthy) {
            return Err(RepositoryError::Storage("connection reset".to_string()));
        }
        self.inner.list_images(parent_id).await
    }

    async fn update_image_primary(
        &self,
        image_id: i64,
        is_primary: bool,
    ) -> Result<(), RepositoryError> {
        self.write_fault().await?;
        self.inner.update_image_primary(image_id, is_primary).await
    }

    async fn set_primary(&self, parent_id: i64, image_id: i64) -> Result<(), RepositoryError> {
        self.write_fault().await?;
        self.inner.set_primary(parent_id, image_id).await
    }

    async fn delete_image(
        &self,
        image_id: i64,
        successor: Option<i64>,
    ) -> Result<(), RepositoryError> {
        self.write_fault().await?;
        self.inner.delete_image(image_id, successor).await
    }

    async fn delete_images_for_parent(&self, parent_id: i64) -> Result<u64, RepositoryError> {
        self.write_fault().await?;
        self.inner.delete_images_for_parent(parent_id).await
    }
}
