//! Vehicle service - catalog CRUD with gallery-aware create and delete.

use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::GalleryManager;
use super::deadline::within;
use crate::domain::{
    ImageUpload, NewVehicle, PurgeOutcome, Vehicle, VehicleListing, VehicleUpdate, headline_image,
};
use crate::ports::{CoreError, VehicleRepository};
use crate::settings::Settings;

/// Service for vehicle catalog operations.
///
/// Image handling is delegated to the shared [`GalleryManager`] so that
/// vehicle creation, update and deletion follow the same gallery rules as
/// the standalone image operations.
pub struct VehicleService {
    repo: Arc<dyn VehicleRepository>,
    gallery: Arc<GalleryManager>,
    settings: Settings,
}

impl VehicleService {
    /// Create a new vehicle service.
    pub fn new(
        repo: Arc<dyn VehicleRepository>,
        gallery: Arc<GalleryManager>,
        settings: Settings,
    ) -> Self {
        Self {
            repo,
            gallery,
            settings,
        }
    }

    /// Create a vehicle and attach its initial images (first one primary).
    pub async fn create(
        &self,
        vehicle: NewVehicle,
        uploads: Vec<ImageUpload>,
    ) -> Result<VehicleListing, CoreError> {
        validate_text("name", &vehicle.name)?;
        validate_text("price", &vehicle.price)?;
        validate_text("range", &vehicle.range_km)?;
        validate_rating(vehicle.rating)?;
        if !uploads.is_empty() {
            self.gallery.validate_batch(&uploads, None)?;
        }

        let created = within(
            "insert vehicle",
            self.settings.storage_timeout(),
            self.repo.insert(&vehicle),
        )
        .await?;
        info!(vehicle_id = created.id, name = %created.name, "Created vehicle");

        if !uploads.is_empty() {
            if let Err(e) = self.gallery.attach(created.id, uploads, None).await {
                // Don't leave a half-created vehicle behind.
                if let Err(rollback) = self.repo.delete(created.id).await {
                    warn!(
                        vehicle_id = created.id,
                        error = %rollback,
                        "Failed to roll back vehicle after image attach failed"
                    );
                }
                return Err(e);
            }
        }

        self.listing(created).await
    }

    /// Apply `update` and append any additional images.
    ///
    /// New images never take over primary status from an existing one.
    pub async fn update(
        &self,
        id: i64,
        update: VehicleUpdate,
        uploads: Vec<ImageUpload>,
    ) -> Result<VehicleListing, CoreError> {
        validate_update(&update)?;
        if !uploads.is_empty() {
            self.gallery.validate_batch(&uploads, None)?;
        }

        let mut vehicle = self.find(id).await?;
        if !update.is_empty() {
            update.apply_to(&mut vehicle);
            vehicle.updated_at = Utc::now();
            within(
                "update vehicle",
                self.settings.storage_timeout(),
                self.repo.update(&vehicle),
            )
            .await?;
            info!(vehicle_id = id, "Updated vehicle");
        }

        if !uploads.is_empty() {
            self.gallery.attach(id, uploads, None).await?;
        }

        self.listing(vehicle).await
    }

    /// Get a vehicle with its gallery.
    pub async fn get(&self, id: i64) -> Result<VehicleListing, CoreError> {
        let vehicle = self.find(id).await?;
        self.listing(vehicle).await
    }

    /// List vehicles with their galleries, newest first.
    ///
    /// The public catalog passes `active_only = true`; the admin view lists all.
    pub async fn list(&self, active_only: bool) -> Result<Vec<VehicleListing>, CoreError> {
        let vehicles = within(
            "list vehicles",
            self.settings.storage_timeout(),
            self.repo.list(active_only),
        )
        .await?;

        let mut listings = Vec::with_capacity(vehicles.len());
        for vehicle in vehicles {
            listings.push(self.listing(vehicle).await?);
        }
        Ok(listings)
    }

    /// Delete a vehicle, removing its image blobs first.
    pub async fn delete(&self, id: i64) -> Result<PurgeOutcome, CoreError> {
        self.find(id).await?;
        let remove_vehicle = within(
            "delete vehicle",
            self.settings.storage_timeout(),
            self.repo.delete(id),
        );
        let outcome = self.gallery.delete_parent(id, remove_vehicle).await?;
        info!(vehicle_id = id, images = outcome.removed, "Deleted vehicle");

        Ok(outcome)
    }

    async fn find(&self, id: i64) -> Result<Vehicle, CoreError> {
        within(
            "get vehicle",
            self.settings.storage_timeout(),
            self.repo.get_by_id(id),
        )
        .await
    }

    async fn listing(&self, vehicle: Vehicle) -> Result<VehicleListing, CoreError> {
        let images = self.gallery.list_gallery(vehicle.id).await?;
        let primary_image = headline_image(&images).map(|image| image.location.clone());
        Ok(VehicleListing {
            vehicle,
            images,
            primary_image,
        })
    }
}

fn validate_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::InvalidInput(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn validate_rating(rating: u8) -> Result<(), CoreError> {
    if !(1..=5).contains(&rating) {
        return Err(CoreError::InvalidInput(format!(
            "rating must be between 1 and 5, got {rating}"
        )));
    }
    Ok(())
}

fn validate_update(update: &VehicleUpdate) -> Result<(), CoreError> {
    if let Some(ref name) = update.name {
        validate_text("name", name)?;
    }
    if let Some(ref price) = update.price {
        validate_text("price", price)?;
    }
    if let Some(ref range_km) = update.range_km {
        validate_text("range", range_km)?;
    }
    if let Some(rating) = update.rating {
        validate_rating(rating)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{BlobError, blob_store::MockBlobStore};
    use crate::services::test_support::{InMemoryStore, accepting_blobs};

    fn service(store: &Arc<InMemoryStore>) -> VehicleService {
        let gallery = Arc::new(GalleryManager::new(
            store.clone(),
            accepting_blobs(),
            Settings::default(),
        ));
        VehicleService::new(store.clone(), gallery, Settings::default())
    }

    fn uploads(locations: &[&str]) -> Vec<ImageUpload> {
        locations.iter().map(|l| ImageUpload::new(*l)).collect()
    }

    #[tokio::test]
    async fn test_create_with_images() {
        let store = InMemoryStore::with_parents(&[]);
        let vehicles = service(&store);

        let listing = vehicles
            .create(
                NewVehicle::new("Fazona Sedan", "₦20,000,000", "300km"),
                uploads(&["/uploads/front.jpg", "/uploads/side.jpg"]),
            )
            .await
            .unwrap();

        assert_eq!(listing.images.len(), 2);
        assert_eq!(listing.primary_image.as_deref(), Some("/uploads/front.jpg"));
        assert!(listing.images[0].is_primary);
    }

    #[tokio::test]
    async fn test_create_without_images() {
        let store = InMemoryStore::with_parents(&[]);
        let vehicles = service(&store);

        let listing = vehicles
            .create(NewVehicle::new("Scooter", "1", "80km"), vec![])
            .await
            .unwrap();
        assert!(listing.images.is_empty());
        assert!(listing.primary_image.is_none());
    }

    #[tokio::test]
    async fn test_create_validates_before_writing() {
        let store = InMemoryStore::with_parents(&[]);
        let vehicles = service(&store);

        let mut bad_rating = NewVehicle::new("Van", "2", "100km");
        bad_rating.rating = 9;
        let err = vehicles.create(bad_rating, vec![]).await.unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));

        let err = vehicles
            .create(NewVehicle::new(" ", "2", "100km"), vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));

        let too_many: Vec<String> = (0..11).map(|i| format!("/uploads/{i}.jpg")).collect();
        let too_many: Vec<&str> = too_many.iter().map(String::as_str).collect();
        let err = vehicles
            .create(NewVehicle::new("Van", "2", "100km"), uploads(&too_many))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidInput(_)));

        assert!(vehicles.list(false).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_appends_without_stealing_primary() {
        let store = InMemoryStore::with_parents(&[]);
        let vehicles = service(&store);
        let created = vehicles
            .create(
                NewVehicle::new("Sedan", "1", "300km"),
                uploads(&["/uploads/a.jpg"]),
            )
            .await
            .unwrap();

        let updated = vehicles
            .update(
                created.vehicle.id,
                VehicleUpdate {
                    price: Some("2".to_string()),
                    ..Default::default()
                },
                uploads(&["/uploads/b.jpg"]),
            )
            .await
            .unwrap();

        assert_eq!(updated.vehicle.price, "2");
        assert_eq!(updated.images.len(), 2);
        assert_eq!(updated.primary_image.as_deref(), Some("/uploads/a.jpg"));
    }

    #[tokio::test]
    async fn test_update_unknown_vehicle() {
        let store = InMemoryStore::with_parents(&[]);
        let vehicles = service(&store);
        let err = vehicles
            .update(5, VehicleUpdate::default(), vec![])
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_list_filters_inactive() {
        let store = InMemoryStore::with_parents(&[]);
        let vehicles = service(&store);
        vehicles
            .create(NewVehicle::new("Active", "1", "1km"), vec![])
            .await
            .unwrap();
        let mut hidden = NewVehicle::new("Hidden", "1", "1km");
        hidden.is_active = false;
        vehicles.create(hidden, vec![]).await.unwrap();

        assert_eq!(vehicles.list(true).await.unwrap().len(), 1);
        let all = vehicles.list(false).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].vehicle.name, "Hidden");
    }

    #[tokio::test]
    async fn test_delete_cleans_blobs_before_record() {
        let store = InMemoryStore::with_parents(&[]);
        let mut blobs = MockBlobStore::new();
        blobs
            .expect_delete_blob()
            .times(2)
            .returning(|location| Err(BlobError::NotFound(location.to_string())));
        let gallery = Arc::new(GalleryManager::new(
            store.clone(),
            Arc::new(blobs),
            Settings::default(),
        ));
        let vehicles = VehicleService::new(store.clone(), gallery, Settings::default());

        let created = vehicles
            .create(
                NewVehicle::new("Truck", "1", "200km"),
                uploads(&["/uploads/a.jpg", "/uploads/b.jpg"]),
            )
            .await
            .unwrap();

        let outcome = vehicles.delete(created.vehicle.id).await.unwrap();
        assert_eq!(outcome.removed, 2);
        assert!(outcome.warnings.is_empty());

        let err = vehicles.get(created.vehicle.id).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound(_)));
        assert_eq!(store.image_count(), 0);
    }
}
