//! Settings domain types and validation.
//!
//! Pure domain types with no infrastructure dependencies. Values come from
//! the environment (see [`Settings::from_env`]) with defaults for anything
//! unset.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Default cap on images per attach batch (matches the admin upload form).
pub const DEFAULT_MAX_IMAGES_PER_UPLOAD: u32 = 10;

/// Default deadline for a single record or blob store call.
pub const DEFAULT_STORAGE_TIMEOUT_MS: u64 = 5_000;

/// Environment variable overriding `max_images_per_upload`.
pub const MAX_IMAGES_ENV: &str = "AUTOGALLERY_MAX_IMAGES_PER_UPLOAD";

/// Environment variable overriding `storage_timeout_ms`.
pub const STORAGE_TIMEOUT_ENV: &str = "AUTOGALLERY_STORAGE_TIMEOUT_MS";

/// Gallery settings.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Maximum number of images accepted by one attach call (1-100).
    pub max_images_per_upload: u32,

    /// Deadline for each store call in milliseconds (100-600000).
    pub storage_timeout_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub const fn with_defaults() -> Self {
        Self {
            max_images_per_upload: DEFAULT_MAX_IMAGES_PER_UPLOAD,
            storage_timeout_ms: DEFAULT_STORAGE_TIMEOUT_MS,
        }
    }

    /// Read settings from the process environment and validate them.
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::with_defaults();

        if let Some(raw) = lookup(MAX_IMAGES_ENV) {
            settings.max_images_per_upload = raw.trim().parse().map_err(|_| {
                SettingsError::Unparseable {
                    key: MAX_IMAGES_ENV,
                    value: raw.clone(),
                }
            })?;
        }
        if let Some(raw) = lookup(STORAGE_TIMEOUT_ENV) {
            settings.storage_timeout_ms = raw.trim().parse().map_err(|_| {
                SettingsError::Unparseable {
                    key: STORAGE_TIMEOUT_ENV,
                    value: raw.clone(),
                }
            })?;
        }

        validate_settings(&settings)?;
        Ok(settings)
    }

    /// The per-call storage deadline.
    #[must_use]
    pub const fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.storage_timeout_ms)
    }
}

/// Settings validation error.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("Max images per upload must be between 1 and 100, got {0}")]
    InvalidMaxImages(u32),

    #[error("Storage timeout must be between 100 and 600000 ms, got {0}")]
    InvalidStorageTimeout(u64),

    #[error("Cannot parse {key}={value}")]
    Unparseable { key: &'static str, value: String },
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.max_images_per_upload < 1 || settings.max_images_per_upload > 100 {
        return Err(SettingsError::InvalidMaxImages(
            settings.max_images_per_upload,
        ));
    }
    if settings.storage_timeout_ms < 100 || settings.storage_timeout_ms > 600_000 {
        return Err(SettingsError::InvalidStorageTimeout(
            settings.storage_timeout_ms,
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        assert!(validate_settings(&Settings::with_defaults()).is_ok());
        assert_eq!(
            Settings::with_defaults().storage_timeout(),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_lookup_overrides_defaults() {
        let settings = Settings::from_lookup(lookup_from(&[
            (MAX_IMAGES_ENV, "4"),
            (STORAGE_TIMEOUT_ENV, " 250 "),
        ]))
        .unwrap();
        assert_eq!(settings.max_images_per_upload, 4);
        assert_eq!(settings.storage_timeout_ms, 250);
    }

    #[test]
    fn test_lookup_rejects_garbage() {
        let err = Settings::from_lookup(lookup_from(&[(MAX_IMAGES_ENV, "lots")])).unwrap_err();
        assert!(matches!(err, SettingsError::Unparseable { .. }));
    }

    #[test]
    fn test_out_of_range_values() {
        let zero = Settings {
            max_images_per_upload: 0,
            ..Settings::with_defaults()
        };
        assert_eq!(
            validate_settings(&zero),
            Err(SettingsError::InvalidMaxImages(0))
        );

        let fast = Settings {
            storage_timeout_ms: 10,
            ..Settings::with_defaults()
        };
        assert_eq!(
            validate_settings(&fast),
            Err(SettingsError::InvalidStorageTimeout(10))
        );
    }
}
