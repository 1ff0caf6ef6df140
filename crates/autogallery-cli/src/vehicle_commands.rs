//! Vehicle management subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};

/// Vehicle command variants.
#[derive(Subcommand)]
pub enum VehicleCommand {
    /// Add a vehicle, optionally with images (the first becomes primary)
    Add(AddVehicleArgs),

    /// List vehicles, newest first
    List {
        /// Include inactive vehicles
        #[arg(long)]
        all: bool,
    },

    /// Show a vehicle and its gallery
    Show {
        /// Vehicle ID
        id: i64,
    },

    /// Update vehicle fields and append images
    Update(UpdateVehicleArgs),

    /// Remove a vehicle together with its images
    Remove {
        /// Vehicle ID
        id: i64,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Arguments for `vehicle add`.
#[derive(Args, Debug)]
pub struct AddVehicleArgs {
    /// Display name
    #[arg(long)]
    pub name: String,

    /// Price as displayed in the catalog (e.g. "$45,900")
    #[arg(long)]
    pub price: String,

    /// Range as displayed in the catalog (e.g. "480 km")
    #[arg(long = "range")]
    pub range_km: String,

    /// Longer description
    #[arg(long)]
    pub description: Option<String>,

    /// Comma-separated feature list
    #[arg(long)]
    pub features: Option<String>,

    /// Badge text (e.g. "New")
    #[arg(long)]
    pub badge: Option<String>,

    /// Badge color
    #[arg(long)]
    pub badge_color: Option<String>,

    /// Rating from 1 to 5 (default 5)
    #[arg(long)]
    pub rating: Option<u8>,

    /// Hide the vehicle from the public catalog
    #[arg(long)]
    pub inactive: bool,

    /// Image files to upload
    pub images: Vec<PathBuf>,
}

/// Arguments for `vehicle update`.
#[derive(Args, Debug)]
pub struct UpdateVehicleArgs {
    /// Vehicle ID
    pub id: i64,

    /// New display name
    #[arg(long)]
    pub name: Option<String>,

    /// New price
    #[arg(long)]
    pub price: Option<String>,

    /// New range
    #[arg(long = "range")]
    pub range_km: Option<String>,

    /// New description
    #[arg(long, conflicts_with = "clear_description")]
    pub description: Option<String>,

    /// Remove the description
    #[arg(long)]
    pub clear_description: bool,

    /// Replace the feature list (comma-separated)
    #[arg(long)]
    pub features: Option<String>,

    /// New badge text
    #[arg(long, conflicts_with = "clear_badge")]
    pub badge: Option<String>,

    /// Remove the badge
    #[arg(long)]
    pub clear_badge: bool,

    /// New badge color
    #[arg(long)]
    pub badge_color: Option<String>,

    /// New rating from 1 to 5
    #[arg(long)]
    pub rating: Option<u8>,

    /// Show the vehicle in the public catalog
    #[arg(long, conflicts_with = "deactivate")]
    pub activate: bool,

    /// Hide the vehicle from the public catalog
    #[arg(long)]
    pub deactivate: bool,

    /// Additional image files to upload
    pub images: Vec<PathBuf>,
}
