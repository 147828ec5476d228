//! Centralized configuration management for evfinder

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Nearest-stations endpoint used when nothing else is configured
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/api/nearest-stations";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL the search request is POSTed to
    pub endpoint: String,
    /// Log file written by both CLI and TUI modes
    pub log_file: PathBuf,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds; `None` leaves it to the network stack
    pub timeout_seconds: Option<u64>,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: None,
            user_agent: "evfinder/0.1.0".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            log_file: "evfinder.log".into(),
            http: HttpConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();

        let endpoint = lookup("EVFINDER_ENDPOINT").unwrap_or(defaults.endpoint);

        let log_file = lookup("EVFINDER_LOG_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.log_file);

        let http = HttpConfig {
            timeout_seconds: parse_var(&lookup, "EVFINDER_HTTP_TIMEOUT_SECONDS")?,
            user_agent: lookup("EVFINDER_USER_AGENT").unwrap_or(defaults.http.user_agent),
        };

        Ok(Config {
            endpoint,
            log_file,
            http,
        })
    }

    /// Replace the endpoint, e.g. from a command line flag
    pub fn with_endpoint(mut self, endpoint: Option<String>) -> Self {
        if let Some(endpoint) = endpoint {
            self.endpoint = endpoint;
        }
        self
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Option<Duration> {
        self.http.timeout_seconds.map(Duration::from_secs)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
            return Err(anyhow::anyhow!(
                "Endpoint must be an http(s) URL: {}",
                self.endpoint
            ));
        }

        if self.http.timeout_seconds == Some(0) {
            return Err(anyhow::anyhow!("HTTP timeout must be greater than zero"));
        }

        Ok(())
    }
}

/// Helper function to parse a variable as a specific type
fn parse_var<T, F>(lookup: &F, var_name: &str) -> Result<Option<T>>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match lookup(var_name) {
        Some(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        None => Ok(None),
    }
}
