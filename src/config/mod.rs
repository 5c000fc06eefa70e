//! Configuration module for the envelope ledger
//!
//! - Config directory resolution
//! - Persisted user settings (total budget, currency symbol)

pub mod paths;
pub mod settings;

pub use paths::LedgerPaths;
pub use settings::Settings;
