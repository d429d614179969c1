//! User settings for the budget engine
//!
//! Manages the budget currency, display preferences, and the default log
//! level.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::paths::EnvelopePaths;
use crate::error::EnvelopeError;
use crate::models::Currency;
use crate::storage::file_io::write_json_atomic;

/// User settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency the budget is kept in
    #[serde(default)]
    pub currency: Currency,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Default tracing filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Width of rendered progress bars in characters
    #[serde(default = "default_bar_width")]
    pub bar_width: usize,
}

fn default_schema_version() -> u32 {
    1
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_bar_width() -> usize {
    20
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency: Currency::default(),
            date_format: default_date_format(),
            log_level: default_log_level(),
            bar_width: default_bar_width(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use defaults if the file doesn't exist
    pub fn load_or_create(paths: &EnvelopePaths) -> Result<Self, EnvelopeError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                EnvelopeError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                EnvelopeError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            debug!(path = %settings_path.display(), "Loaded settings");
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &EnvelopePaths) -> Result<(), EnvelopeError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }

    /// Reject values the renderer cannot work with
    pub fn validate(&self) -> Result<(), EnvelopeError> {
        if !(4..=200).contains(&self.bar_width) {
            return Err(EnvelopeError::Config(format!(
                "bar_width must be between 4 and 200, got {}",
                self.bar_width
            )));
        }

        if self.date_format.trim().is_empty() {
            return Err(EnvelopeError::Config("date_format cannot be empty".into()));
        }

        Ok(())
    }
}
