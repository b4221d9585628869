//! Runtime configuration, read from the environment after `.env` is loaded

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::page::PageLayout;

pub const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_CHART_DIR: &str = "charts";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key} must be a positive number of seconds, got `{value}`")]
    InvalidTimeout { key: &'static str, value: String },
    #[error("{key} must be one of single, range, combined; got `{value}`")]
    InvalidLayout { key: &'static str, value: String },
    #[error("{key} must be an http(s) URL, got `{value}`")]
    InvalidBaseUrl { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base_url: String,
    /// `None` leaves requests without a client-side deadline
    pub request_timeout: Option<Duration>,
    pub page_layout: PageLayout,
    pub chart_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: None,
            page_layout: PageLayout::default(),
            chart_dir: PathBuf::from(DEFAULT_CHART_DIR),
        }
    }
}

impl Config {
    const BASE_URL_KEY: &'static str = "FRAUD_API_BASE_URL";
    const TIMEOUT_KEY: &'static str = "FRAUD_REQUEST_TIMEOUT_SECS";
    const LAYOUT_KEY: &'static str = "FRAUD_PAGE_LAYOUT";
    const CHART_DIR_KEY: &'static str = "FRAUD_CHART_DIR";

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; blank values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let mut config = Config::default();

        if let Some(url) = get(Self::BASE_URL_KEY) {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidBaseUrl {
                    key: Self::BASE_URL_KEY,
                    value: url,
                });
            }
            config.api_base_url = url.trim_end_matches('/').to_string();
        }

        if let Some(raw) = get(Self::TIMEOUT_KEY) {
            let seconds = raw
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout {
                    key: Self::TIMEOUT_KEY,
                    value: raw.clone(),
                })?;
            config.request_timeout = Some(Duration::from_secs(seconds));
        }

        if let Some(raw) = get(Self::LAYOUT_KEY) {
            config.page_layout = match raw.to_lowercase().as_str() {
                "single" => PageLayout::SingleTransaction,
                "range" => PageLayout::TransactionRange,
                "combined" => PageLayout::Combined,
                _ => {
                    return Err(ConfigError::InvalidLayout {
                        key: Self::LAYOUT_KEY,
                        value: raw,
                    })
                }
            };
        }

        if let Some(dir) = get(Self::CHART_DIR_KEY) {
            config.chart_dir = PathBuf::from(dir);
        }

        Ok(config)
    }
}
