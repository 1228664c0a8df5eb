//! Configuration management for dw-connect.
//!
//! Holds the operational ODBC parameters (driver name, port, login timeout)
//! loaded from a TOML file, with defaults for SQL Server.

use crate::error::{DwError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for dw-connect.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// ODBC connection settings.
    #[serde(default)]
    pub odbc: OdbcSettings,
}

/// Driver-level connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OdbcSettings {
    /// Installed ODBC driver name, without braces.
    #[serde(default = "default_driver")]
    pub driver: String,

    /// Server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Login timeout passed to the driver. `None` keeps the driver default.
    #[serde(default)]
    pub login_timeout_secs: Option<u32>,
}

fn default_driver() -> String {
    "ODBC Driver 17 for SQL Server".to_string()
}

fn default_port() -> u16 {
    1433
}

impl Default for OdbcSettings {
    fn default() -> Self {
        Self {
            driver: default_driver(),
            port: default_port(),
            login_timeout_secs: None,
        }
    }
}

impl OdbcSettings {
    /// Applies command-line overrides on top of these settings.
    pub fn with_overrides(mut self, driver: Option<&str>, port: Option<u16>) -> Self {
        if let Some(driver) = driver {
            self.driver = driver.to_string();
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}

impl Config {
    /// Returns the default config file path for the current platform.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("dw-connect")
            .join("config.toml")
    }

    /// Loads configuration from a TOML file. A missing file yields defaults.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| DwError::config(format!("Failed to read config file: {e}")))?;

        Self::parse_toml(&content, path)
    }

    fn parse_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|e| {
            DwError::config(format!(
                "Configuration error in {}:\n  {}",
                path.display(),
                e
            ))
        })
    }
}
