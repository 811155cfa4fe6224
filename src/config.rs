//! Service configuration from environment variables.

use std::env;
use std::path::PathBuf;

/// Settings for the `web` binary.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Bind host (HOST, default 0.0.0.0).
    pub host: String,
    /// Bind port (PORT, default 8080).
    pub port: u16,
    /// Directory for the file store (PAINTRAID_DATA_DIR, default `data`).
    pub data_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            data_dir: PathBuf::from("data"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup; unset variables keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let port = match lookup("PORT") {
            Some(p) => p
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(p))?,
            None => defaults.port,
        };
        Ok(Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            data_dir: lookup("PAINTRAID_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.data_dir),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid PORT value {0:?}")]
    InvalidPort(String),
}
