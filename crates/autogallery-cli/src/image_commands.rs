//! Gallery image subcommands.

use std::path::PathBuf;

use clap::Subcommand;

/// Image command variants.
#[derive(Subcommand)]
pub enum ImageCommand {
    /// List a vehicle's gallery (primary first)
    List {
        /// Vehicle ID
        vehicle_id: i64,
    },

    /// Upload image files and attach them to a vehicle
    Attach {
        /// Vehicle ID
        vehicle_id: i64,
        /// Image files to upload
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Zero-based index of the file to make primary (only used when the
        /// gallery is empty)
        #[arg(long)]
        primary: Option<usize>,
    },

    /// Remove an image from a vehicle's gallery
    Detach {
        /// Vehicle ID
        vehicle_id: i64,
        /// Image ID
        image_id: i64,
    },

    /// Make an image the vehicle's primary image
    Primary {
        /// Vehicle ID
        vehicle_id: i64,
        /// Image ID
        image_id: i64,
    },
}
