//! Main commands enum.
//!
//! This module defines the available top-level commands for the CLI tool.

use clap::Subcommand;

use crate::image_commands::ImageCommand;
use crate::vehicle_commands::VehicleCommand;

/// Available top-level commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage vehicles in the catalog
    Vehicle {
        #[command(subcommand)]
        command: VehicleCommand,
    },

    /// Manage a vehicle's image gallery
    Image {
        #[command(subcommand)]
        command: ImageCommand,
    },

    /// Show resolved paths for the data directory, database and uploads
    Paths,
}
