//! Admin command-line interface for autogallery.
//!
//! `bootstrap` wires the `SQLite` and disk adapters into `AppCore`; the
//! handlers read image files, store them as blobs and call the core services.

#![deny(unsafe_code)]
#![deny(unused_crate_dependencies)]

#[cfg(test)]
use tempfile as _;

// Used by the binary target only.
use dotenvy as _;
use tracing_subscriber as _;

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod image_commands;
pub mod parser;
pub mod presentation;
pub mod utils;
pub mod vehicle_commands;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use image_commands::ImageCommand;
pub use parser::Cli;
pub use vehicle_commands::VehicleCommand;
