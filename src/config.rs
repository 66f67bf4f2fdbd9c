use dotenvy::dotenv;
use reqwest::Url;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api/scrape";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

const DEFAULT_LOCATIONS: [&str; 6] = [
    "Mumbai",
    "Delhi",
    "Bangalore",
    "Pune",
    "Hyderabad",
    "Chennai",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Url,
    pub timeout: Option<Duration>,
    pub reports_file: Option<String>,
    pub locations: Vec<String>,
    pub bind_addr: SocketAddr,
    pub log_level: tracing::Level,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_url: Url::parse(DEFAULT_API_URL).expect("default api url is valid"),
            timeout: None,
            reports_file: None,
            locations: default_locations(),
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            log_level: tracing::Level::INFO,
        }
    }
}

impl Config {
    /// Load configuration from the environment (and a `.env` file if present).
    ///
    /// Every variable is optional:
    /// - `RANKER_API_URL`: scrape endpoint
    /// - `RANKER_TIMEOUT_SECS`: request timeout, none when unset
    /// - `RANKER_REPORTS_FILE`: JSON file seeding the report history
    /// - `RANKER_LOCATIONS`: comma-separated city list
    /// - `RANKER_BIND_ADDR`: address for `serve`
    /// - `RANKER_LOG_LEVEL`: trace, debug, info, warn or error
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup. `from_env` uses the process
    /// environment; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Config::default();

        let api_url = match get("RANKER_API_URL") {
            Some(raw) => Url::parse(&raw).map_err(|e| ConfigError::InvalidValue {
                key: "RANKER_API_URL",
                message: e.to_string(),
            })?,
            None => defaults.api_url,
        };

        let timeout = match get("RANKER_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "RANKER_TIMEOUT_SECS",
                    message: format!("expected a whole number of seconds, got {raw:?}"),
                })?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        let locations = match get("RANKER_LOCATIONS") {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => defaults.locations,
        };

        let bind_addr = match get("RANKER_BIND_ADDR") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "RANKER_BIND_ADDR",
                message: format!("expected host:port, got {raw:?}"),
            })?,
            None => defaults.bind_addr,
        };

        let log_level = match get("RANKER_LOG_LEVEL") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "RANKER_LOG_LEVEL",
                message: format!("unknown level {raw:?}"),
            })?,
            None => defaults.log_level,
        };

        Ok(Config {
            api_url,
            timeout,
            reports_file: get("RANKER_REPORTS_FILE"),
            locations,
            bind_addr,
            log_level,
        })
    }
}

fn default_locations() -> Vec<String> {
    DEFAULT_LOCATIONS.iter().map(|s| s.to_string()).collect()
}
