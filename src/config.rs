use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::feed::fetcher::DEFAULT_FEED_URL;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 20;

const HOST_KEY: &str = "CREATEAI_FEED_HOST";
const PORT_KEY: &str = "PORT";
const FEED_URL_KEY: &str = "CREATEAI_FEED_URL";
const TIMEOUT_KEY: &str = "CREATEAI_FEED_TIMEOUT_SECS";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT value: {0}")]
    InvalidPort(String),
    #[error("invalid CREATEAI_FEED_TIMEOUT_SECS value: {0}")]
    InvalidTimeout(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub feed_url: String,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            feed_url: DEFAULT_FEED_URL.to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Reads `.env.local` and `.env` (when present) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let value = |key: &str| lookup(key).filter(|raw| !raw.trim().is_empty());

        let port = match value(PORT_KEY) {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            None => defaults.port,
        };
        let request_timeout_secs = match value(TIMEOUT_KEY) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
            None => defaults.request_timeout_secs,
        };

        Ok(Self {
            host: value(HOST_KEY).unwrap_or(defaults.host),
            port,
            feed_url: value(FEED_URL_KEY).unwrap_or(defaults.feed_url),
            request_timeout_secs,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
