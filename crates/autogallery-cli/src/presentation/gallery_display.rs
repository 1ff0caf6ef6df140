//! Vehicle and gallery display for CLI output.

use autogallery_core::{BlobWarning, GalleryImage, VehicleListing};

use super::tables::{format_optional, print_separator, truncate_string};

/// Print a gallery as a table, primary image marked with `*`.
pub fn print_gallery(images: &[GalleryImage]) {
    if images.is_empty() {
        println!("No images.");
        return;
    }

    println!("{:<6} {:<8} {:<20} Location", "ID", "Primary", "Added");
    print_separator(80);
    for image in images {
        println!(
            "{:<6} {:<8} {:<20} {}",
            image.id,
            if image.is_primary { "*" } else { "" },
            image.created_at.format("%Y-%m-%d %H:%M:%S"),
            image.location
        );
    }
}

/// Print one vehicle with all its fields and gallery.
pub fn print_listing(listing: &VehicleListing) {
    let vehicle = &listing.vehicle;
    println!("Vehicle {}: {}", vehicle.id, vehicle.name);
    println!("  Price:       {}", vehicle.price);
    println!("  Range:       {}", vehicle.range_km);
    println!("  Rating:      {}/5", vehicle.rating);
    println!(
        "  Status:      {}",
        if vehicle.is_active { "active" } else { "inactive" }
    );
    println!("  Badge:       {}", format_optional(&vehicle.badge, "--"));
    println!("  Badge color: {}", format_optional(&vehicle.badge_color, "--"));
    if !vehicle.features.is_empty() {
        println!("  Features:    {}", vehicle.features.join(", "));
    }
    if let Some(description) = &vehicle.description {
        println!("  Description: {}", truncate_string(description, 200));
    }
    println!(
        "  Updated:     {}",
        vehicle.updated_at.format("%Y-%m-%d %H:%M:%S")
    );
    println!();
    print_gallery(&listing.images);
}

/// Report blobs that could not be removed.
pub fn print_warnings(warnings: &[BlobWarning]) {
    for warning in warnings {
        eprintln!(
            "Warning: image {} left its file at {}: {}",
            warning.image_id, warning.location, warning.reason
        );
    }
}
