//! Path management for the budget engine
//!
//! ## Path Resolution Order
//!
//! 1. `ENVELOPE_ENGINE_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/envelope-engine` on Linux,
//!    `~/Library/Application Support/envelope-engine` on macOS,
//!    `%APPDATA%\envelope-engine` on Windows)

use directories::ProjectDirs;
use std::path::PathBuf;

use crate::error::EnvelopeError;

/// Environment variable overriding the base directory
pub const DIR_ENV_VAR: &str = "ENVELOPE_ENGINE_DIR";

/// Manages all paths used by the engine
#[derive(Debug, Clone)]
pub struct EnvelopePaths {
    /// Base directory for settings and snapshots
    base_dir: PathBuf,
}

impl EnvelopePaths {
    /// Create a new EnvelopePaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no platform config directory can be determined.
    pub fn new() -> Result<Self, EnvelopeError> {
        let base_dir = match std::env::var(DIR_ENV_VAR) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create EnvelopePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Directory where snapshots are looked up by default
    pub fn snapshot_dir(&self) -> PathBuf {
        self.base_dir.join("snapshots")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the base and snapshot directories exist
    pub fn ensure_directories(&self) -> Result<(), EnvelopeError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| EnvelopeError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.snapshot_dir()).map_err(|e| {
            EnvelopeError::Io(format!("Failed to create snapshot directory: {}", e))
        })?;

        Ok(())
    }

    /// Check if a settings file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, EnvelopeError> {
    ProjectDirs::from("", "", "envelope-engine")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| EnvelopeError::Config("Could not determine a config directory".into()))
}
