//! Engine configuration via `tempora.toml`
//!
//! The configuration holds the two defaults the algebra cannot infer from
//! its inputs: the zone used when a value has none, and what to do with an
//! interval whose endpoints arrive reversed.
//!
//! A configuration is installed at most once per process. Until then (or if
//! it never happens) every reader sees [`EngineConfig::default`].

use crate::zone::Zone;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tempora_core::{Error, Result};
use tracing::info;

/// Config file name
pub const CONFIG_FILE_NAME: &str = "tempora.toml";

static INSTALLED: OnceCell<ResolvedConfig> = OnceCell::new();

/// Handling of interval endpoints given as `start > end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalOrder {
    /// Fail with `InvalidInterval`
    #[default]
    Reject,
    /// Swap the endpoints
    Normalize,
}

/// Engine configuration loaded from `tempora.toml`.
///
/// # Example
///
/// ```toml
/// # Zone for values that carry none: "UTC" or a fixed offset like "+05:30"
/// default_zone = "UTC"
///
/// # Reversed interval endpoints: "reject" (default) or "normalize"
/// interval_order = "reject"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Zone identifier used when a value carries no zone
    #[serde(default = "default_zone_str")]
    pub default_zone: String,
    /// Handling of reversed interval endpoints
    #[serde(default)]
    pub interval_order: IntervalOrder,
}

fn default_zone_str() -> String {
    "UTC".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_zone: default_zone_str(),
            interval_order: IntervalOrder::Reject,
        }
    }
}

/// Configuration with the zone already resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Default zone
    pub zone: Zone,
    /// Handling of reversed interval endpoints
    pub interval_order: IntervalOrder,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            zone: Zone::UTC,
            interval_order: IntervalOrder::Reject,
        }
    }
}

impl EngineConfig {
    /// Parse from TOML text
    ///
    /// # Errors
    ///
    /// Returns `Config` if the text is not valid TOML for this structure.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config(e.to_string()))
    }

    /// Load from a file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    /// Serialize to TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Config(e.to_string()))
    }

    /// Resolve the zone identifier
    ///
    /// # Errors
    ///
    /// Returns `Config` if `default_zone` does not name a known zone.
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let zone = Zone::for_id(&self.default_zone).map_err(|_| {
            Error::Config(format!(
                "Invalid default_zone '{}' in {}. Expected \"UTC\" or a fixed offset like \"+05:30\".",
                self.default_zone, CONFIG_FILE_NAME
            ))
        })?;
        Ok(ResolvedConfig {
            zone,
            interval_order: self.interval_order,
        })
    }

    /// Install this configuration for the process
    ///
    /// # Errors
    ///
    /// Returns `Config` if the configuration does not resolve or one is
    /// already installed.
    pub fn install(&self) -> Result<()> {
        let resolved = self.resolve()?;
        INSTALLED
            .set(resolved)
            .map_err(|_| Error::Config("configuration already installed".to_string()))?;
        info!(
            zone = %resolved.zone,
            interval_order = ?resolved.interval_order,
            "tempora engine configuration installed"
        );
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Tempora engine configuration
#
# Zone used for values that carry none (partials viewed from an instant,
# date-times built from a field map without a "zone" key).
#   "UTC" (default) or a fixed offset such as "+05:30" or "-08:00"
default_zone = "UTC"

# Interval endpoints given as start > end:
#   "reject"    = fail with InvalidInterval (default)
#   "normalize" = swap the endpoints
interval_order = "reject"
"#
    }
}

/// The installed configuration, or the default
pub fn current() -> ResolvedConfig {
    INSTALLED.get().copied().unwrap_or_default()
}

/// The default zone of the installed configuration
pub fn default_zone() -> Zone {
    current().zone
}
