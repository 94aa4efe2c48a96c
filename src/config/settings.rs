//! User settings for fairshare
//!
//! Chooses the store backend and holds display and logging preferences.
//! Every field has a serde default so older or hand-edited config files
//! keep loading.

use serde::{Deserialize, Serialize};

use super::paths::FairsharePaths;
use crate::error::FairshareError;
use crate::models::DEFAULT_CURRENCY;

/// Environment variable that forces the remote backend at the given URL
pub const API_URL_ENV: &str = "FAIRSHARE_API_URL";

/// Where people and expenses are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// JSON files under the data directory
    #[default]
    Local,
    /// A REST service at `api_url`
    Remote,
}

/// User settings for fairshare
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    #[serde(default)]
    pub backend: Backend,

    /// Base URL of the REST service used by the remote backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Currency tag given to new expenses
    #[serde(default = "default_currency")]
    pub default_currency: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Default tracing filter; `RUST_LOG` wins when set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Timeout for each request to the remote backend
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_api_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

fn default_currency_symbol() -> String {
    "₹".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backend: Backend::default(),
            api_url: default_api_url(),
            default_currency: default_currency(),
            currency_symbol: default_currency_symbol(),
            date_format: default_date_format(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &FairsharePaths) -> Result<Self, FairshareError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                FairshareError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                FairshareError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Apply environment overrides on top of the loaded values
    ///
    /// The result is only for this run; persist the settings returned by
    /// [`Settings::load_or_create`] instead.
    pub fn with_env_overrides(self) -> Self {
        self.with_api_url_override(std::env::var(API_URL_ENV).ok().as_deref())
    }

    /// A non-blank URL switches to the remote backend at that address
    pub fn with_api_url_override(mut self, url: Option<&str>) -> Self {
        if let Some(url) = url.map(str::trim).filter(|u| !u.is_empty()) {
            self.backend = Backend::Remote;
            self.api_url = url.to_string();
        }
        self
    }

    /// Format an amount with the configured currency symbol
    pub fn format_money(&self, amount: crate::models::Money) -> String {
        amount.format_with_symbol(&self.currency_symbol)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FairsharePaths) -> Result<(), FairshareError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            FairshareError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            FairshareError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}
