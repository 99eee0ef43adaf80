use serde::{Deserialize, Serialize};

/// Main configuration structure for Drover
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// GitHub connection configuration
    #[serde(default)]
    pub github: GithubConfig,

    /// Batch pacing configuration
    #[serde(default)]
    pub batch: BatchSettings,

    /// Processed-state store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github: GithubConfig::default(),
            batch: BatchSettings::default(),
            store: StoreConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// GitHub connection configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GithubConfig {
    /// API base URL; overridable for GitHub Enterprise
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Organization to push into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org: Option<String>,

    /// Repository to push into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,

    /// API token; falls back to the GITHUB_TOKEN env var when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_api_base() -> String {
    "https://api.github.com".to_string()
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            org: None,
            repo: None,
            token: None,
        }
    }
}

/// Batch pacing configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BatchSettings {
    /// Issues attempted concurrently per window
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Pause between windows, in milliseconds
    #[serde(default = "default_batch_pause_ms")]
    pub batch_pause_ms: u64,

    /// Pause before each individual retry, in milliseconds
    #[serde(default = "default_retry_pause_ms")]
    pub retry_pause_ms: u64,
}

const fn default_batch_size() -> usize {
    3
}

const fn default_batch_pause_ms() -> u64 {
    1000
}

const fn default_retry_pause_ms() -> u64 {
    500
}

impl Default for BatchSettings {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            batch_pause_ms: default_batch_pause_ms(),
            retry_pause_ms: default_retry_pause_ms(),
        }
    }
}

/// Processed-state store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct StoreConfig {
    /// Directory holding the per-collection record files
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_path() -> String {
    ".drover/state".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
