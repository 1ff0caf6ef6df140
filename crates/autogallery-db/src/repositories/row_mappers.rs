//! Row mapping helpers for `SQLite` queries.

use autogallery_core::{GalleryImage, RepositoryError, Vehicle};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// Shared SELECT column list for gallery image queries.
pub const IMAGE_SELECT_COLUMNS: &str = "id, vehicle_id, image_url, is_primary, created_at";

/// Shared SELECT column list for vehicle queries.
pub const VEHICLE_SELECT_COLUMNS: &str = "id, name, price, range_km, description, features, badge, badge_color, rating, is_active, created_at, updated_at";

/// Map a `sqlx` error onto the repository error taxonomy.
pub fn map_sqlx_error(err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::RowNotFound => RepositoryError::NotFound(err.to_string()),
        sqlx::Error::Database(db)
            if db.is_foreign_key_violation() || db.is_unique_violation() || db.is_check_violation() =>
        {
            RepositoryError::Constraint(db.message().to_string())
        }
        _ => RepositoryError::Storage(err.to_string()),
    }
}

fn column<'r, T>(row: &'r SqliteRow, name: &str) -> Result<T, RepositoryError>
where
    T: sqlx::Decode<'r, sqlx::Sqlite> + sqlx::Type<sqlx::Sqlite>,
{
    row.try_get(name)
        .map_err(|e| RepositoryError::Storage(e.to_string()))
}

/// Parse a database row into a `GalleryImage`.
pub fn row_to_image(row: &SqliteRow) -> Result<GalleryImage, RepositoryError> {
    Ok(GalleryImage {
        id: column(row, "id")?,
        parent_id: column(row, "vehicle_id")?,
        location: column(row, "image_url")?,
        is_primary: column(row, "is_primary")?,
        created_at: column(row, "created_at")?,
    })
}

/// Parse a database row into a `Vehicle`.
pub fn row_to_vehicle(row: &SqliteRow) -> Result<Vehicle, RepositoryError> {
    let features_json: String = column(row, "features")?;
    let rating: i64 = column(row, "rating")?;

    Ok(Vehicle {
        id: column(row, "id")?,
        name: column(row, "name")?,
        price: column(row, "price")?,
        range_km: column(row, "range_km")?,
        description: column(row, "description")?,
        features: serde_json::from_str(&features_json)
            .map_err(|e| RepositoryError::Serialization(e.to_string()))?,
        badge: column(row, "badge")?,
        badge_color: column(row, "badge_color")?,
        rating: u8::try_from(rating)
            .map_err(|_| RepositoryError::Serialization(format!("rating {rating} out of range")))?,
        is_active: column(row, "is_active")?,
        created_at: column(row, "created_at")?,
        updated_at: column(row, "updated_at")?,
    })
}
