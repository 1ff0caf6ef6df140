//! Vehicle domain types.
//!
//! Vehicles are the parent entities that own image galleries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::gallery::GalleryImage;

/// Default rating for a newly listed vehicle.
pub const DEFAULT_RATING: u8 = 5;

/// A vehicle in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub range_km: String,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub badge: Option<String>,
    pub badge_color: Option<String>,
    pub rating: u8,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewVehicle {
    pub name: String,
    pub price: String,
    pub range_km: String,
    pub description: Option<String>,
    pub features: Vec<String>,
    pub badge: Option<String>,
    pub badge_color: Option<String>,
    pub rating: u8,
    pub is_active: bool,
}

impl NewVehicle {
    /// Create a vehicle with the required fields and catalog defaults.
    pub fn new(
        name: impl Into<String>,
        price: impl Into<String>,
        range_km: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            price: price.into(),
            range_km: range_km.into(),
            description: None,
            features: Vec::new(),
            badge: None,
            badge_color: None,
            rating: DEFAULT_RATING,
            is_active: true,
        }
    }
}

/// Partial vehicle update.
///
/// `None` leaves a field unchanged. For nullable fields use `Some(None)`
/// to clear and `Some(Some(value))` to set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleUpdate {
    pub name: Option<String>,
    pub price: Option<String>,
    pub range_km: Option<String>,
    pub description: Option<Option<String>>,
    pub features: Option<Vec<String>>,
    pub badge: Option<Option<String>>,
    pub badge_color: Option<Option<String>>,
    pub rating: Option<u8>,
    pub is_active: Option<bool>,
}

impl VehicleUpdate {
    /// Whether the update changes nothing.
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.range_km.is_none()
            && self.description.is_none()
            && self.features.is_none()
            && self.badge.is_none()
            && self.badge_color.is_none()
            && self.rating.is_none()
            && self.is_active.is_none()
    }

    /// Apply this update on top of an existing vehicle.
    pub fn apply_to(&self, vehicle: &mut Vehicle) {
        if let Some(ref name) = self.name {
            vehicle.name.clone_from(name);
        }
        if let Some(ref price) = self.price {
            vehicle.price.clone_from(price);
        }
        if let Some(ref range_km) = self.range_km {
            vehicle.range_km.clone_from(range_km);
        }
        if let Some(ref description) = self.description {
            vehicle.description.clone_from(description);
        }
        if let Some(ref features) = self.features {
            vehicle.features.clone_from(features);
        }
        if let Some(ref badge) = self.badge {
            vehicle.badge.clone_from(badge);
        }
        if let Some(ref badge_color) = self.badge_color {
            vehicle.badge_color.clone_from(badge_color);
        }
        if let Some(rating) = self.rating {
            vehicle.rating = rating;
        }
        if let Some(is_active) = self.is_active {
            vehicle.is_active = is_active;
        }
    }
}

/// A vehicle together with its gallery, as shown in catalog listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VehicleListing {
    pub vehicle: Vehicle,
    /// Images in canonical order.
    pub images: Vec<GalleryImage>,
    /// Location of the headline image, if the vehicle has any images.
    pub primary_image: Option<String>,
}

/// Split a comma-separated feature list, trimming entries and dropping blanks.
pub fn parse_features(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|feature| !feature.is_empty())
        .map(ToString::to_string)
        .collect()
}
