//! User settings for the envelope ledger
//!
//! Holds the total budget a session starts with and display preferences.

use serde::{Deserialize, Serialize};

use super::paths::LedgerPaths;
use crate::error::LedgerError;
use crate::models::Money;

/// User settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Ceiling for the sum of all envelope budgets, in cents
    #[serde(default = "default_total_budget")]
    pub total_budget: Money,

    /// Currency symbol used when printing amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_total_budget() -> Money {
    Money::from_units(2000)
}

fn default_currency() -> String {
    "$".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            total_budget: default_total_budget(),
            currency_symbol: default_currency(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &LedgerPaths) -> Result<Self, LedgerError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LedgerError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            LedgerError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LedgerPaths) -> Result<(), LedgerError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LedgerError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LedgerError::Io(format!("Failed to write settings file: {}", e)))
    }

    pub fn validate(&self) -> Result<(), LedgerError> {
        if !self.total_budget.is_positive() {
            return Err(LedgerError::Config(format!(
                "total_budget must be positive, got {}",
                self.total_budget
            )));
        }
        Ok(())
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn temp_paths() -> (TempDir, LedgerPaths) {
        let temp_dir = TempDir::new().unwrap();
        let paths = LedgerPaths::with_config_dir(temp_dir.path().to_path_buf());
        (temp_dir, paths)
    }

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.total_budget, Money::from_units(2000));
        assert_eq!(settings.currency_symbol, "$");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let (_temp_dir, paths) = temp_paths();
        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings, Settings::default());
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let (_temp_dir, paths) = temp_paths();

        let settings = Settings {
            total_budget: Money::from_units(3500),
            currency_symbol: "€".into(),
            ..Settings::default()
        };
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.total_budget, Money::from_units(3500));
        assert_eq!(loaded.format_money(Money::from_cents(1250)), "€12.50");
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let (_temp_dir, paths) = temp_paths();
        std::fs::write(paths.settings_file(), r#"{"total_budget": 150000}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.total_budget, Money::from_units(1500));
        assert_eq!(loaded.currency_symbol, "$");
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let (_temp_dir, paths) = temp_paths();

        std::fs::write(paths.settings_file(), "not json").unwrap();
        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(LedgerError::Config(_))
        ));

        std::fs::write(paths.settings_file(), r#"{"total_budget": 0}"#).unwrap();
        assert!(matches!(
            Settings::load_or_create(&paths),
            Err(LedgerError::Config(_))
        ));
    }
}
