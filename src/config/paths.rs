//! Path management for the envelope ledger
//!
//! ## Path Resolution Order
//!
//! 1. `ENVELOPE_LEDGER_CONFIG_DIR` environment variable (if set)
//! 2. The platform config directory (`~/.config/envelope-ledger` on Linux,
//!    `~/Library/Application Support/envelope-ledger` on macOS,
//!    `%APPDATA%\envelope-ledger\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::LedgerError;

/// Environment variable that overrides the config directory
pub const CONFIG_DIR_ENV: &str = "ENVELOPE_LEDGER_CONFIG_DIR";

/// Manages the paths used by the envelope ledger
#[derive(Debug, Clone)]
pub struct LedgerPaths {
    config_dir: PathBuf,
}

impl LedgerPaths {
    /// Resolve paths from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, LedgerError> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(custom) => PathBuf::from(custom),
            None => ProjectDirs::from("", "", "envelope-ledger")
                .map(|dirs| dirs.config_dir().to_path_buf())
                .ok_or_else(|| {
                    LedgerError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { config_dir })
    }

    /// Create paths rooted at a custom directory (useful for testing)
    pub fn with_config_dir(config_dir: PathBuf) -> Self {
        Self { config_dir }
    }

    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("config.json")
    }

    /// Ensure the config directory exists
    pub fn ensure_directories(&self) -> Result<(), LedgerError> {
        std::fs::create_dir_all(&self.config_dir).map_err(|e| {
            LedgerError::Io(format!("Failed to create config directory: {}", e))
        })
    }
}
