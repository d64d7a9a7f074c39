//! Transport configuration.
//!
//! Loaded from a JSON file or from the SAI profile key/value pairs the host
//! hands over at `sai_api_initialize`. Profile keys override file values.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Profile key naming the forwarding engine address.
pub const PROFILE_ADDRESS: &str = "SAI_RPC_ADDRESS";
/// Profile key for the connect timeout in milliseconds.
pub const PROFILE_CONNECT_TIMEOUT_MS: &str = "SAI_RPC_CONNECT_TIMEOUT_MS";
/// Profile key for the per-request deadline in milliseconds.
pub const PROFILE_REQUEST_TIMEOUT_MS: &str = "SAI_RPC_REQUEST_TIMEOUT_MS";
/// Profile key naming the metadata key that carries the trace id.
pub const PROFILE_TRACE_KEY: &str = "SAI_RPC_TRACE_KEY";
/// Profile key pointing at a JSON configuration file.
pub const PROFILE_CONFIG_FILE: &str = "SAI_RPC_CONFIG_FILE";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Settings of the RPC channel to the forwarding engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransportConfig {
    /// Engine URI, e.g. `http://127.0.0.1:50000`
    #[serde(default = "default_address")]
    pub address: String,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,

    /// Deadline applied to every RPC
    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// Response metadata key holding the correlation id
    #[serde(default = "default_trace_metadata_key")]
    pub trace_metadata_key: String,
}

fn default_address() -> String {
    "http://127.0.0.1:50000".to_string()
}

fn default_connect_timeout() -> u64 {
    5_000
}

fn default_request_timeout() -> u64 {
    30_000
}

fn default_trace_metadata_key() -> String {
    "traceparent".to_string()
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            connect_timeout_ms: default_connect_timeout(),
            request_timeout_ms: default_request_timeout(),
            trace_metadata_key: default_trace_metadata_key(),
        }
    }
}

fn parse_ms(key: &'static str, value: String) -> Result<u64, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

impl TransportConfig {
    /// Loads a JSON configuration file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds the configuration from SAI profile values.
    ///
    /// `lookup` returns the value of a profile key, if set.
    pub fn from_profile<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match lookup(PROFILE_CONFIG_FILE) {
            Some(path) => Self::from_json_file(path)?,
            None => Self::default(),
        };

        if let Some(address) = lookup(PROFILE_ADDRESS) {
            config.address = address;
        }
        if let Some(value) = lookup(PROFILE_CONNECT_TIMEOUT_MS) {
            config.connect_timeout_ms = parse_ms(PROFILE_CONNECT_TIMEOUT_MS, value)?;
        }
        if let Some(value) = lookup(PROFILE_REQUEST_TIMEOUT_MS) {
            config.request_timeout_ms = parse_ms(PROFILE_REQUEST_TIMEOUT_MS, value)?;
        }
        if let Some(key) = lookup(PROFILE_TRACE_KEY) {
            config.trace_metadata_key = key;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.address.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: PROFILE_ADDRESS,
                value: self.address.clone(),
            });
        }
        if self.trace_metadata_key.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: PROFILE_TRACE_KEY,
                value: self.trace_metadata_key.clone(),
            });
        }
        Ok(())
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
