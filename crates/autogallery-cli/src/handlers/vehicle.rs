//! Vehicle command handlers.

use anyhow::Result;
use autogallery_core::{BlobStore, NewVehicle, VehicleUpdate, parse_features};

use super::uploads;
use crate::bootstrap::CliContext;
use crate::presentation::{print_listing, print_separator, print_warnings, truncate_string};
use crate::utils::input;
use crate::vehicle_commands::{AddVehicleArgs, UpdateVehicleArgs, VehicleCommand};

/// Dispatch a `vehicle` subcommand.
pub async fn execute(ctx: &CliContext, command: VehicleCommand) -> Result<()> {
    match command {
        VehicleCommand::Add(args) => add(ctx, args).await,
        VehicleCommand::List { all } => list(ctx, all).await,
        VehicleCommand::Show { id } => show(ctx, id).await,
        VehicleCommand::Update(args) => update(ctx, args).await,
        VehicleCommand::Remove { id, force } => remove(ctx, id, force).await,
    }
}

fn new_vehicle(args: AddVehicleArgs) -> NewVehicle {
    let mut vehicle = NewVehicle::new(args.name, args.price, args.range_km);
    vehicle.description = args.description;
    vehicle.features = args.features.as_deref().map(parse_features).unwrap_or_default();
    vehicle.badge = args.badge;
    vehicle.badge_color = args.badge_color;
    if let Some(rating) = args.rating {
        vehicle.rating = rating;
    }
    vehicle.is_active = !args.inactive;
    vehicle
}

fn vehicle_update(args: &UpdateVehicleArgs) -> VehicleUpdate {
    VehicleUpdate {
        name: args.name.clone(),
        price: args.price.clone(),
        range_km: args.range_km.clone(),
        description: if args.clear_description {
            Some(None)
        } else {
            args.description.clone().map(Some)
        },
        features: args.features.as_deref().map(parse_features),
        badge: if args.clear_badge {
            Some(None)
        } else {
            args.badge.clone().map(Some)
        },
        badge_color: args.badge_color.clone().map(Some),
        rating: args.rating,
        is_active: match (args.activate, args.deactivate) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        },
    }
}

async fn add(ctx: &CliContext, mut args: AddVehicleArgs) -> Result<()> {
    let files = std::mem::take(&mut args.images);
    let blobs: &dyn BlobStore = &**ctx.app().blobs();
    let batch = uploads::store_files(blobs, &files).await?;

    let listing = match ctx
        .app()
        .vehicles()
        .create(new_vehicle(args), batch.clone())
        .await
    {
        Ok(listing) => listing,
        Err(e) => {
            uploads::discard(blobs, &batch).await;
            return Err(e.into());
        }
    };

    println!(
        "Added vehicle '{}' (ID {}) with {} image(s).",
        listing.vehicle.name,
        listing.vehicle.id,
        listing.images.len()
    );
    Ok(())
}

async fn list(ctx: &CliContext, all: bool) -> Result<()> {
    let listings = ctx.app().vehicles().list(!all).await?;

    if listings.is_empty() {
        println!("No vehicles found.");
        println!("Use 'autogallery vehicle add' to add your first vehicle.");
        return Ok(());
    }

    println!(
        "{:<5} {:<25} {:<12} {:<10} {:<8} {:<7} Primary image",
        "ID", "Name", "Price", "Range", "Status", "Images"
    );
    print_separator(100);

    for listing in &listings {
        let vehicle = &listing.vehicle;
        println!(
            "{:<5} {:<25} {:<12} {:<10} {:<8} {:<7} {}",
            vehicle.id,
            truncate_string(&vehicle.name, 24),
            truncate_string(&vehicle.price, 11),
            truncate_string(&vehicle.range_km, 9),
            if vehicle.is_active { "active" } else { "hidden" },
            listing.images.len(),
            listing.primary_image.as_deref().unwrap_or("--")
        );
    }

    Ok(())
}

async fn show(ctx: &CliContext, id: i64) -> Result<()> {
    let listing = ctx.app().vehicles().get(id).await?;
    print_listing(&listing);
    Ok(())
}

async fn update(ctx: &CliContext, args: UpdateVehicleArgs) -> Result<()> {
    let update = vehicle_update(&args);
    let blobs: &dyn BlobStore = &**ctx.app().blobs();
    let batch = uploads::store_files(blobs, &args.images).await?;

    let listing = match ctx
        .app()
        .vehicles()
        .update(args.id, update, batch.clone())
        .await
    {
        Ok(listing) => listing,
        Err(e) => {
            uploads::discard(blobs, &batch).await;
            return Err(e.into());
        }
    };

    println!(
        "Updated vehicle '{}' (ID {}); gallery has {} image(s).",
        listing.vehicle.name,
        listing.vehicle.id,
        listing.images.len()
    );
    Ok(())
}

async fn remove(ctx: &CliContext, id: i64, force: bool) -> Result<()> {
    if !force {
        let listing = ctx.app().vehicles().get(id).await?;
        print_listing(&listing);
        println!();

        let confirm = input::prompt_confirmation(
            "Are you sure you want to remove this vehicle and all of its images?",
        )?;
        if !confirm {
            println!("Remove operation cancelled.");
            return Ok(());
        }
    }

    let outcome = ctx.app().vehicles().delete(id).await?;
    print_warnings(&outcome.warnings);
    println!("Removed vehicle {id} and {} image(s).", outcome.removed);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn update_args() -> UpdateVehicleArgs {
        UpdateVehicleArgs {
            id: 1,
            name: None,
            price: None,
            range_km: None,
            description: None,
            clear_description: false,
            features: None,
            badge: None,
            clear_badge: false,
            badge_color: None,
            rating: None,
            activate: false,
            deactivate: false,
            images: Vec::new(),
        }
    }

    #[test]
    fn test_new_vehicle_from_args() {
        let vehicle = new_vehicle(AddVehicleArgs {
            name: "Roadster".into(),
            price: "$89,000".into(),
            range_km: "620 km".into(),
            description: None,
            features: Some("Autopilot, ,Glass roof".into()),
            badge: Some("New".into()),
            badge_color: None,
            rating: None,
            inactive: true,
            images: vec![PathBuf::from("a.jpg")],
        });
        assert_eq!(vehicle.features, vec!["Autopilot", "Glass roof"]);
        assert_eq!(vehicle.rating, 5);
        assert!(!vehicle.is_active);
    }

    #[test]
    fn test_empty_update_changes_nothing() {
        assert!(vehicle_update(&update_args()).is_empty());
    }

    #[test]
    fn test_clear_flags_and_activation() {
        let mut args = update_args();
        args.clear_badge = true;
        args.description = Some("Facelift".into());
        args.deactivate = true;

        let update = vehicle_update(&args);
        assert_eq!(update.badge, Some(None));
        assert_eq!(update.description, Some(Some("Facelift".into())));
        assert_eq!(update.is_active, Some(false));
        assert_eq!(update.badge_color, None);
    }
}
