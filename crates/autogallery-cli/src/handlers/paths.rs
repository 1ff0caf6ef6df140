//! Paths command handler.
//!
//! Displays all resolved paths for diagnostics and debugging.

use anyhow::Result;

use crate::bootstrap::CliConfig;

/// Execute the paths command.
///
/// Prints the data root, database file and uploads directory in
/// `key = value` format.
pub fn execute(config: &CliConfig) -> Result<()> {
    println!("data_root = {}", config.data_root.display());
    println!("database = {}", config.database_path()?.display());
    println!("uploads = {}", config.uploads_dir()?.display());
    Ok(())
}
