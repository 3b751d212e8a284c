//! Configuration structures
//!
//! Plain data; resolution (environment variables, config files, the
//! hardcoded fallback) lives in the infra loader.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL_SECS, DEFAULT_REQUEST_ATTEMPTS,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};

/// Top-level application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub api: ApiConfig,
    pub cache: CacheConfig,
}

/// ERP API connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the ERP backend. Falls back to the production endpoint
    /// when neither the environment nor a config file overrides it.
    pub base_url: String,
    pub timeout_secs: u64,
    /// Attempt budget for idempotent reads. Financial summary reads always
    /// run single-attempt regardless of this value.
    pub request_attempts: u32,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            request_attempts: DEFAULT_REQUEST_ATTEMPTS,
        }
    }
}

/// Query cache sizing and expiry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    pub max_entries: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self { ttl_secs: DEFAULT_CACHE_TTL_SECS, max_entries: DEFAULT_CACHE_MAX_ENTRIES }
    }
}
