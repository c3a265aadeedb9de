//! CLI configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use grt_cart::{PricingRules, DEFAULT_STORAGE_KEY};
use serde::{Deserialize, Serialize};

/// Default tracing filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "grt_cart=info,grt_cache=info";

/// Configuration file (`grt.toml` or `grt.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GrtConfig {
    /// Where the cart payload lives.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Shipping and tax rules for the order summary.
    #[serde(default)]
    pub pricing: PricingRules,

    /// Log filtering.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl GrtConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        let config: Self = if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))?
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))?
        };

        config
            .pricing
            .validate()
            .with_context(|| format!("Invalid [pricing] in {}", path))?;
        Ok(config)
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }
}

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Payload files in `storage.dir`.
    #[default]
    File,
    /// Nothing outlives the process.
    Memory,
}

/// Storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: Backend,
    /// Directory for the file backend, relative to the config file.
    pub dir: PathBuf,
    /// Key the cart is stored under.
    pub key: String,
    /// Optional session id; scopes the key as `<key>:<session>`.
    pub session: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Backend::File,
            dir: PathBuf::from(".grt"),
            key: DEFAULT_STORAGE_KEY.to_string(),
            session: None,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` filter directive, e.g. `grt_cart=debug`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: GrtConfig = toml::from_str("").unwrap();
        assert_eq!(config, GrtConfig::default());
        assert_eq!(config.storage.key, "grtCart");
        assert_eq!(config.pricing.shipping_fee, 150.0);
    }

    #[test]
    fn test_partial_sections() {
        let config: GrtConfig = toml::from_str(
            r#"
            [storage]
            backend = "memory"
            session = "sess_1"

            [pricing]
            tax_rate = 0.05
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, Backend::Memory);
        assert_eq!(config.storage.session.as_deref(), Some("sess_1"));
        assert_eq!(config.storage.dir, PathBuf::from(".grt"));
        assert_eq!(config.pricing.tax_rate, 0.05);
        assert_eq!(config.pricing.free_shipping_threshold, 1000.0);
    }

    #[test]
    fn test_load_and_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grt.toml");
        let path = path.to_str().unwrap();

        let mut config = GrtConfig::default();
        config.logging.filter = "grt_cart=debug".to_string();
        config.save(path).unwrap();

        assert_eq!(GrtConfig::load(path).unwrap(), config);
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grt.json");
        std::fs::write(&path, r#"{"storage":{"key":"cart"}}"#).unwrap();

        let config = GrtConfig::load(path.to_str().unwrap()).unwrap();
        assert_eq!(config.storage.key, "cart");
    }

    #[test]
    fn test_invalid_pricing_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("grt.toml");
        std::fs::write(&path, "[pricing]\ntax_rate = 2.0\n").unwrap();

        assert!(GrtConfig::load(path.to_str().unwrap()).is_err());
    }
}
