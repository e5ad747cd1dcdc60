//! # Client Configuration
//!
//! Where the lookup services live and how the two components behave.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     ORDERDESK_BASE_URL=https://shop.example.com                        │
//! │     ORDERDESK_API_KEY=...                                              │
//! │     ORDERDESK_DEBOUNCE_MS=300                                          │
//! │     ORDERDESK_STALE_RESULTS=discard                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/orderdesk/orderdesk.toml (Linux)                         │
//! │     ~/Library/Application Support/com.orderdesk.orderdesk/... (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [service]
//! base_url = "http://localhost:8000"
//! api_key = "warehouse-page"
//! timeout_secs = 10
//!
//! [table]
//! currency_symbol = "€"
//! stale_results = "accumulate"   # accumulate | discard
//!
//! [suggest]
//! debounce_ms = 300
//! mirror_selection = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};

use orderdesk_core::{StaleResultPolicy, TableOptions, DEFAULT_CURRENCY_SYMBOL, DEFAULT_DEBOUNCE_MS};

use crate::error::{ClientError, ClientResult};

// =============================================================================
// Service Settings
// =============================================================================

/// Remote lookup service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceSettings {
    /// Scheme and host the `/api/v1/...` paths hang off.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Access credential sent as the `apikey` query parameter.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Per-request timeout (seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    10
}

impl Default for ServiceSettings {
    fn default() -> Self {
        ServiceSettings {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

impl ServiceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// =============================================================================
// Table Settings
// =============================================================================

/// Order table settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSettings {
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// What to do with lookup results that arrive after a newer change.
    #[serde(default)]
    pub stale_results: StaleResultPolicy,
}

fn default_currency_symbol() -> String {
    DEFAULT_CURRENCY_SYMBOL.to_string()
}

impl Default for TableSettings {
    fn default() -> Self {
        TableSettings {
            currency_symbol: default_currency_symbol(),
            stale_results: StaleResultPolicy::default(),
        }
    }
}

impl TableSettings {
    /// Engine options for these settings.
    pub fn options(&self) -> TableOptions {
        TableOptions {
            stale_results: self.stale_results,
            currency_symbol: self.currency_symbol.clone(),
        }
    }
}

// =============================================================================
// Suggestion Settings
// =============================================================================

/// Supplier product suggestion settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestSettings {
    /// Quiet interval before a search fires (milliseconds).
    #[serde(default = "default_debounce")]
    pub debounce_ms: u64,

    /// Mirror the matched entry into the hidden name/SKU fields.
    #[serde(default = "default_true")]
    pub mirror_selection: bool,
}

fn default_debounce() -> u64 {
    DEFAULT_DEBOUNCE_MS
}

fn default_true() -> bool {
    true
}

impl Default for SuggestSettings {
    fn default() -> Self {
        SuggestSettings {
            debounce_ms: default_debounce(),
            mirror_selection: true,
        }
    }
}

impl SuggestSettings {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

// =============================================================================
// Main Client Configuration
// =============================================================================

/// Complete client configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub service: ServiceSettings,

    #[serde(default)]
    pub table: TableSettings,

    #[serde(default)]
    pub suggest: SuggestSettings,
}

impl ClientConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (orderdesk.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ClientResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading client config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|e| ClientError::ConfigLoadFailed(e.to_string()))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load client config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ClientResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ClientError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ClientError::ConfigSaveFailed(e.to_string()))?;

        info!(?path, "Client config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ClientResult<()> {
        let url = &self.service.base_url;
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(format!(
                "Base URL must start with http:// or https://, got: {}",
                url
            )));
        }

        if self.service.timeout_secs == 0 {
            return Err(ClientError::InvalidConfig(
                "timeout_secs must be greater than 0".into(),
            ));
        }

        if self.table.currency_symbol.is_empty() {
            return Err(ClientError::InvalidConfig(
                "currency_symbol must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("ORDERDESK_BASE_URL") {
            debug!(url = %url, "Overriding base URL from environment");
            self.service.base_url = url;
        }

        if let Ok(key) = std::env::var("ORDERDESK_API_KEY") {
            self.service.api_key = Some(key);
        }

        if let Ok(ms) = std::env::var("ORDERDESK_DEBOUNCE_MS") {
            match ms.parse::<u64>() {
                Ok(ms) => self.suggest.debounce_ms = ms,
                Err(_) => warn!(value = %ms, "Ignoring non-numeric ORDERDESK_DEBOUNCE_MS"),
            }
        }

        if let Ok(policy) = std::env::var("ORDERDESK_STALE_RESULTS") {
            match policy.parse() {
                Ok(parsed) => {
                    debug!(policy = %policy, "Overriding stale result policy from environment");
                    self.table.stale_results = parsed;
                }
                Err(e) => warn!("{}", e),
            }
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "orderdesk", "orderdesk")
            .map(|dirs| dirs.config_dir().join("orderdesk.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.suggest.debounce_ms, 300);
        assert!(config.suggest.mirror_selection);
        assert_eq!(config.table.currency_symbol, "€");
        assert_eq!(config.table.stale_results, StaleResultPolicy::Accumulate);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = ClientConfig::default();

        config.service.base_url = "ftp://shop.local".into();
        assert!(matches!(config.validate(), Err(ClientError::InvalidUrl(_))));

        config.service.base_url = "https://shop.local".into();
        config.service.timeout_secs = 0;
        assert!(matches!(config.validate(), Err(ClientError::InvalidConfig(_))));

        config.service.timeout_secs = 5;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: ClientConfig = toml::from_str(
            r#"
            [service]
            base_url = "https://shop.local"

            [table]
            stale_results = "discard"
            "#,
        )
        .unwrap();

        assert_eq!(config.service.base_url, "https://shop.local");
        assert_eq!(config.service.timeout_secs, 10);
        assert_eq!(config.table.stale_results, StaleResultPolicy::DiscardStale);
        assert_eq!(config.suggest, SuggestSettings::default());
    }

    #[test]
    fn test_table_options() {
        let mut settings = TableSettings::default();
        settings.currency_symbol = "$".into();
        let options = settings.options();
        assert_eq!(options.currency_symbol, "$");
        assert_eq!(options.stale_results, StaleResultPolicy::Accumulate);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = std::env::temp_dir().join(format!("orderdesk-test-{}.toml", std::process::id()));
        let mut config = ClientConfig::default();
        config.suggest.debounce_ms = 450;
        config.save(Some(path.clone())).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[suggest]"));
        let loaded: ClientConfig = toml::from_str(&contents).unwrap();
        assert_eq!(loaded.suggest.debounce_ms, 450);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_load_or_default_falls_back_on_bad_file() {
        let path = std::env::temp_dir().join(format!("orderdesk-bad-{}.toml", std::process::id()));
        std::fs::write(&path, "[suggest]\ndebounce_ms = \"soon\"\n").unwrap();

        assert!(matches!(
            ClientConfig::load(Some(path.clone())),
            Err(ClientError::ConfigLoadFailed(_))
        ));
        let config = ClientConfig::load_or_default(Some(path.clone()));
        assert_eq!(config.suggest.debounce_ms, 300);

        std::fs::remove_file(&path).unwrap();
    }
}
