use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use listings_core::{
    CoreSettings, FeedConfig, ScrollTrigger, DEFAULT_INITIAL_PAGE_SIZE, DEFAULT_MORE_PAGE_SIZE,
    DEFAULT_SCROLL_THRESHOLD, DEFAULT_SITE_ORIGIN, RECENTLY_VIEWED_LIMIT,
};
use listings_engine::{FetchSettings, SyntheticSettings};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("{field} must be greater than zero")]
    Zero { field: &'static str },
    #[error("site_origin {origin:?} is not an http(s) URL")]
    InvalidOrigin { origin: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub initial_page_size: usize,
    pub more_page_size: usize,
    pub recently_viewed_limit: usize,
    pub scroll_threshold: u32,
    pub request_timeout_ms: u64,
    pub initial_latency_ms: u64,
    pub more_latency_ms: u64,
    pub site_origin: String,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            initial_page_size: DEFAULT_INITIAL_PAGE_SIZE,
            more_page_size: DEFAULT_MORE_PAGE_SIZE,
            recently_viewed_limit: RECENTLY_VIEWED_LIMIT,
            scroll_threshold: DEFAULT_SCROLL_THRESHOLD,
            request_timeout_ms: 5_000,
            initial_latency_ms: 500,
            more_latency_ms: 800,
            site_origin: DEFAULT_SITE_ORIGIN.to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn core_settings(&self) -> CoreSettings {
        CoreSettings {
            feed: FeedConfig {
                initial_page_size: self.initial_page_size,
                more_page_size: self.more_page_size,
            },
            recently_viewed_limit: self.recently_viewed_limit,
            site_origin: self.site_origin.clone(),
        }
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            request_timeout: Duration::from_millis(self.request_timeout_ms),
        }
    }

    pub fn synthetic_settings(&self, seed: Option<u64>) -> SyntheticSettings {
        SyntheticSettings {
            initial_latency: Duration::from_millis(self.initial_latency_ms),
            more_latency: Duration::from_millis(self.more_latency_ms),
            seed,
        }
    }

    pub fn scroll_trigger(&self) -> ScrollTrigger {
        ScrollTrigger::new(self.scroll_threshold)
    }

    fn validate(self) -> Result<Self, ConfigError> {
        for (field, value) in [
            ("initial_page_size", self.initial_page_size),
            ("more_page_size", self.more_page_size),
            ("recently_viewed_limit", self.recently_viewed_limit),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero { field });
            }
        }
        if self.request_timeout_ms == 0 {
            return Err(ConfigError::Zero {
                field: "request_timeout_ms",
            });
        }
        let origin_ok = Url::parse(&self.site_origin)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false);
        if !origin_ok {
            return Err(ConfigError::InvalidOrigin {
                origin: self.site_origin,
            });
        }
        Ok(self)
    }
}

/// Parses and validates RON config text. Missing fields take their defaults.
pub fn parse_config(text: &str) -> Result<AppConfig, ConfigError> {
    let config: AppConfig = ron::from_str(text)?;
    config.validate()
}

/// Loads the config at `path`. A missing file yields the defaults.
pub fn load_config(path: &Path) -> Result<AppConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(text) => parse_config(&text),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(err) => Err(ConfigError::Io(err)),
    }
}
