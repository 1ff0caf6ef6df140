//! Main CLI parser and top-level argument handling.
//!
//! This module defines the root CLI structure with global options.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for managing the vehicle catalog and its image
/// galleries.
#[derive(Parser)]
#[command(name = "autogallery")]
#[command(about = "Manage vehicles and their image galleries")]
#[command(version)]
pub struct Cli {
    /// Override the data directory (database and uploads) for this invocation
    #[arg(long = "data-dir", env = "AUTOGALLERY_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
