//! Application configuration types.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// How field values are escaped when exporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Escaping {
    /// Values are written verbatim, byte-compatible with the site's exports.
    #[default]
    Legacy,
    /// RFC 4180 quoting for CSV, RFC 6350 backslash escaping for VCF.
    Standard,
}

impl std::str::FromStr for Escaping {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "legacy" | "none" => Ok(Self::Legacy),
            "standard" | "rfc" => Ok(Self::Standard),
            _ => Err(format!("Unknown escaping: {s}. Use: legacy, standard")),
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Escaping policy for exported values.
    #[serde(default)]
    pub escaping: Escaping,

    /// File name used for the contacts export.
    #[serde(default = "default_contacts_file")]
    pub contacts_file: String,

    /// File name used for the messages export.
    #[serde(default = "default_messages_file")]
    pub messages_file: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            escaping: Escaping::default(),
            contacts_file: default_contacts_file(),
            messages_file: default_messages_file(),
        }
    }
}

fn default_contacts_file() -> String {
    "contacts.vcf".to_string()
}

fn default_messages_file() -> String {
    "messages.csv".to_string()
}

/// Path configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathConfig {
    /// Base data directory.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
}

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    /// Export configuration.
    #[serde(default)]
    pub export: ExportConfig,

    /// Path configuration.
    #[serde(default)]
    pub paths: PathConfig,
}

impl AppConfig {
    /// Get the data directory, using default if not configured.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.paths
            .data_dir
            .clone()
            .unwrap_or_else(Self::default_data_dir)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".rxp-leads")
    }

    /// Get the record database path.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.data_dir().join("leads.db")
    }

    /// Get the config file path.
    #[must_use]
    pub fn config_file_path(&self) -> PathBuf {
        self.data_dir().join("config.toml")
    }
}
