//! Application settings loading from config.toml
//!
//! The file holds the audit policy and the optional seed data used to
//! populate an empty database on startup.

use crate::config::seed::SeedData;
use crate::core::audit::AuditPolicy;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming an alternative settings file
pub const CONFIG_PATH_VAR: &str = "VENDOR_MARKET_CONFIG";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    /// Change log behavior
    #[serde(default)]
    pub audit: AuditSettings,
    /// Rows inserted into an empty database
    #[serde(default)]
    pub seed: SeedData,
}

/// The `[audit]` table
///
/// Update operations take the policy as an argument; callers pass
/// `settings.audit.policy` to them.
#[derive(Debug, Default, Deserialize, Clone, Copy)]
pub struct AuditSettings {
    /// When update interceptors write log rows
    #[serde(default)]
    pub policy: AuditPolicy,
}

/// Loads settings from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - An enum field holds a value outside its allowed set
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Settings> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path_ref.display()),
    })?;

    parse_config(&contents)
}

/// Parses settings from TOML text
pub fn parse_config(contents: &str) -> Result<Settings> {
    toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads settings from `$VENDOR_MARKET_CONFIG`, or ./config.toml when unset
pub fn load_default_config() -> Result<Settings> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| "config.toml".to_string());
    load_config(path)
}
