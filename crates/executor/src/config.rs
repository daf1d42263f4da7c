//! Contract configuration via `waybill.toml`
//!
//! [`Executor::open`](crate::Executor::open) writes a default `waybill.toml`
//! on first use. To change settings, edit the file and restart.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "waybill.toml";

/// Contract configuration loaded from `waybill.toml`.
///
/// # Example
///
/// ```toml
/// name = "supplychain"
///
/// # Key range listed by queryAllProduct, [range_start, range_end)
/// range_start = "PRODUCT0"
/// range_end = "PRODUCT999"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractConfig {
    /// Contract name, attached to every log span
    #[serde(default = "default_name")]
    pub name: String,
    /// Inclusive start of the `queryAllProduct` range
    #[serde(default = "default_range_start")]
    pub range_start: String,
    /// Exclusive end of the `queryAllProduct` range
    #[serde(default = "default_range_end")]
    pub range_end: String,
}

fn default_name() -> String {
    "supplychain".to_string()
}

fn default_range_start() -> String {
    "PRODUCT0".to_string()
}

fn default_range_end() -> String {
    "PRODUCT999".to_string()
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            range_start: default_range_start(),
            range_end: default_range_end(),
        }
    }
}

impl ContractConfig {
    /// Check that the listing range is non-empty.
    ///
    /// # Errors
    ///
    /// Returns `Config` if `range_start >= range_end` or the name is empty.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::Config {
                reason: "contract name cannot be empty".to_string(),
            });
        }
        if self.range_start >= self.range_end {
            return Err(Error::Config {
                reason: format!(
                    "range_start '{}' must sort before range_end '{}'",
                    self.range_start, self.range_end
                ),
            });
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Waybill contract configuration
#
# Contract name, recorded on every log span
name = "supplychain"

# Key range listed by queryAllProduct: [range_start, range_end)
# Products created outside this range are stored but not listed.
range_start = "PRODUCT0"
range_end = "PRODUCT999"
"#
    }

    /// Parse and validate config from TOML text.
    ///
    /// # Errors
    ///
    /// Returns `Config` if the text cannot be parsed or fails validation.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ContractConfig = toml::from_str(content).map_err(|e| Error::Config {
            reason: format!("Failed to parse config: {}", e),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::Config {
            reason: format!("Failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&content).map_err(|e| match e {
            Error::Config { reason } => Error::Config {
                reason: format!("{} ({})", reason, path.display()),
            },
            other => other,
        })
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> Result<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| Error::Config {
                reason: format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ),
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| Error::Config {
            reason: format!("Failed to serialize config: {}", e),
        })?;
        std::fs::write(path, content).map_err(|e| Error::Config {
            reason: format!("Failed to write config file '{}': {}", path.display(), e),
        })
    }
}
