use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use crate::delivery::retry::{Backoff, RetryPolicy};
use crate::message::filters::FilterOrder;

// =============================================================================
// Delivery constants
// =============================================================================

/// Maximum number of delivery attempts per notification (500 * 5s ≈ 41 minutes)
pub const MAX_TRIES: u32 = 500;

/// Delay between delivery attempts in milliseconds (5 seconds)
pub const TRIES_TIMEOUT_MS: u64 = 5_000;

// =============================================================================
// Links and assets
// =============================================================================

/// Extension-relative path of the alert popup style sheet
pub const ALERT_STYLES_PATH: &str = "/assets/css/alert-popup.css";

/// Changelog link shown in the version updated popup
pub const CHANGELOG_HREF: &str = "https://link.adtidy.org/forward.html?action=github_version_popup&from=version_popup&app=browser_extension";

/// Offer link used when no structured promo notification is active
pub const DEFAULT_OFFER_HREF: &str = "https://link.adtidy.org/forward.html?action=learn_about_adguard&from=version_popup&app=browser_extension";

/// Suffix appended to a promo notification url for the offer button
pub const PROMO_HREF_SUFFIX: &str = "&from=version_popup";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Top-level configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct ToastsConfig {
    pub delivery: DeliveryConfig,
    pub links: LinksConfig,
    pub updated_filters_order: FilterOrder,
    /// Where the alert style sheet is fetched from during `Toasts::init`
    pub styles_url: String,
}

impl Default for ToastsConfig {
    fn default() -> Self {
        Self {
            delivery: DeliveryConfig::default(),
            links: LinksConfig::default(),
            updated_filters_order: FilterOrder::default(),
            styles_url: ALERT_STYLES_PATH.to_string(),
        }
    }
}

impl ToastsConfig {
    /// Reads a JSON config file. Missing fields fall back to defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Retry settings for tab delivery
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DeliveryConfig {
    pub max_tries: u32,
    /// Delay before the second attempt in milliseconds
    pub retry_interval_ms: u64,
    pub backoff: BackoffConfig,
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            max_tries: MAX_TRIES,
            retry_interval_ms: TRIES_TIMEOUT_MS,
            backoff: BackoffConfig::Fixed,
        }
    }
}

impl DeliveryConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        let backoff = match self.backoff {
            BackoffConfig::Fixed => Backoff::Fixed,
            BackoffConfig::Exponential { max_interval_ms } => Backoff::Exponential {
                max_interval: Duration::from_millis(max_interval_ms),
            },
        };
        RetryPolicy {
            max_tries: self.max_tries,
            interval: Duration::from_millis(self.retry_interval_ms),
            backoff,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BackoffConfig {
    #[default]
    Fixed,
    #[serde(rename_all = "camelCase")]
    Exponential { max_interval_ms: u64 },
}

/// Outbound links embedded in the version updated popup
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct LinksConfig {
    pub changelog: String,
    pub default_offer: String,
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            changelog: CHANGELOG_HREF.to_string(),
            default_offer: DEFAULT_OFFER_HREF.to_string(),
        }
    }
}

/// Returns the path to the data directory for toast-relay.
/// Uses $XDG_DATA_HOME/toast-relay if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/toast-relay,
/// or ./toast-relay if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join("toast-relay.log")
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("toast-relay")
}
