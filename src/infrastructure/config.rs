//! Configuration file management.
//!
//! Handles loading and creating the TOML configuration file.

use std::fs;
use std::path::Path;

use crate::domain::{AppConfig, AppError, Result};

/// Default configuration file content.
const DEFAULT_CONFIG: &str = r#"# rxp-leads configuration
# Auto-generated - edit as needed

[export]
# How exported values are escaped:
#   "legacy"   - written verbatim (same bytes as the site's export buttons)
#   "standard" - RFC 4180 quoting for CSV, RFC 6350 escaping for VCF
escaping = "legacy"

# File names used by `export-all`
contacts_file = "contacts.vcf"
messages_file = "messages.csv"

[paths]
# Custom data directory (optional, defaults to ~/.rxp-leads)
# data_dir = "/custom/path"
"#;

/// Load configuration from `path`, or defaults if the file does not exist.
///
/// # Errors
/// Returns error if file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<AppConfig> {
    if path.exists() {
        load_config_from_file(path)
    } else {
        tracing::debug!(path = %path.display(), "No config file, using defaults");
        Ok(AppConfig::default())
    }
}

/// Load configuration from a specific file.
///
/// # Errors
/// Returns error if file cannot be read or parsed.
pub fn load_config_from_file(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::io(format!("Failed to read config file: {}", path.display()), e))?;

    toml::from_str(&content).map_err(|e| AppError::Config {
        message: format!("Failed to parse config file: {e}"),
    })
}

/// Create the default configuration file if it doesn't exist.
///
/// Returns `true` when a file was written.
///
/// # Errors
/// Returns error if file cannot be created.
pub fn ensure_config_exists(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| AppError::io("Failed to create config directory", e))?;
    }

    fs::write(path, DEFAULT_CONFIG)
        .map_err(|e| AppError::io("Failed to create default config", e))?;

    tracing::info!(path = %path.display(), "Created default configuration");

    Ok(true)
}
