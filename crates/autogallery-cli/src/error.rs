//! CLI-specific error types and mappings.
//!
//! This module provides error types for the CLI adapter and mappings
//! from `CoreError` to exit codes and user-facing messages.

use autogallery_core::paths::PathError;
use autogallery_core::{BlobError, CoreError, SettingsError};
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A vehicle or image reference does not resolve.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Argument or input validation error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// Storage failed or timed out; the command may succeed if retried.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Stored gallery state is inconsistent.
    #[error("Internal error: {0}")]
    Invariant(String),

    /// IO error (file not found, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 0: Success
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Reserved for specific error categories (see sysexits.h)
    pub fn exit_code(&self) -> u8 {
        match self {
            CliError::NotFound(_) => 66,    // EX_NOINPUT
            CliError::Arguments(_) => 2,    // EX_USAGE
            CliError::Unavailable(_) => 75, // EX_TEMPFAIL
            CliError::Invariant(_) => 70,   // EX_SOFTWARE
            CliError::Io(_) => 74,          // EX_IOERR
            CliError::Config(_) => 78,      // EX_CONFIG
        }
    }

    /// Recover a `CliError` from an error that bubbled up through `anyhow`.
    ///
    /// Anything unrecognized keeps its message and exits with 1.
    pub fn exit_code_for(err: &anyhow::Error) -> u8 {
        if let Some(cli) = err.downcast_ref::<CliError>() {
            return cli.exit_code();
        }
        if let Some(core) = err.downcast_ref::<CoreError>() {
            return Self::from_core_ref(core).exit_code();
        }
        if err.downcast_ref::<SettingsError>().is_some()
            || err.downcast_ref::<PathError>().is_some()
        {
            return 78;
        }
        if err.downcast_ref::<std::io::Error>().is_some() {
            return 74;
        }
        1
    }

    fn from_core_ref(err: &CoreError) -> Self {
        match err {
            CoreError::NotFound(what) => CliError::NotFound(what.clone()),
            CoreError::InvalidInput(msg) => CliError::Arguments(msg.clone()),
            CoreError::StorageUnavailable { .. } => CliError::Unavailable(err.to_string()),
            CoreError::InvariantViolation(msg) => CliError::Invariant(msg.clone()),
        }
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        Self::from_core_ref(&err)
    }
}

impl From<BlobError> for CliError {
    fn from(err: BlobError) -> Self {
        match err {
            BlobError::Rejected(msg) => CliError::Arguments(msg),
            BlobError::NotFound(msg) => CliError::NotFound(msg),
            BlobError::Io(msg) => CliError::Io(msg),
        }
    }
}

impl From<SettingsError> for CliError {
    fn from(err: SettingsError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<PathError> for CliError {
    fn from(err: PathError) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Io(err.to_string())
    }
}
