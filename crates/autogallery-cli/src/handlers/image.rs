//! Gallery image command handlers.

use anyhow::Result;
use autogallery_core::{BlobStore, ImageUpload};

use super::uploads;
use crate::bootstrap::CliContext;
use crate::image_commands::ImageCommand;
use crate::presentation::{print_gallery, print_warnings};

/// Dispatch an `image` subcommand.
pub async fn execute(ctx: &CliContext, command: ImageCommand) -> Result<()> {
    let gallery = ctx.app().gallery();

    match command {
        ImageCommand::List { vehicle_id } => {
            print_gallery(&gallery.list_gallery(vehicle_id).await?);
        }
        ImageCommand::Attach {
            vehicle_id,
            files,
            primary,
        } => {
            // Fail fast on bad counts or indexes before any file is stored.
            let placeholders: Vec<_> = files
                .iter()
                .map(|f| ImageUpload::new(f.display().to_string()))
                .collect();
            gallery.validate_batch(&placeholders, primary)?;

            let blobs: &dyn BlobStore = &**ctx.app().blobs();
            let batch = uploads::store_files(blobs, &files).await?;
            let images = match gallery.attach(vehicle_id, batch.clone(), primary).await {
                Ok(images) => images,
                Err(e) => {
                    uploads::discard(blobs, &batch).await;
                    return Err(e.into());
                }
            };
            println!("Attached {} image(s) to vehicle {vehicle_id}.", batch.len());
            print_gallery(&images);
        }
        ImageCommand::Detach {
            vehicle_id,
            image_id,
        } => {
            let outcome = gallery.detach(vehicle_id, image_id).await?;
            print_warnings(&outcome.warnings);
            println!("Detached image {image_id} from vehicle {vehicle_id}.");
            print_gallery(&outcome.gallery);
        }
        ImageCommand::Primary {
            vehicle_id,
            image_id,
        } => {
            let images = gallery.designate_primary(vehicle_id, image_id).await?;
            println!("Image {image_id} is now the primary image of vehicle {vehicle_id}.");
            print_gallery(&images);
        }
    }

    Ok(())
}
