//! Runtime configuration.
//!
//! Defaults, then an optional TOML file named by `BAZAAR_CONFIG`, then
//! individual environment overrides:
//!
//! | Variable | Field |
//! |---|---|
//! | `BAZAAR_BIND` | `bind_addr` |
//! | `BAZAAR_CHANNEL_BUFFER` | `channel_buffer` |
//! | `BAZAAR_LOG` | `log_filter` |
//! | `BAZAAR_SESSION_TTL` | `session_ttl_secs` |
//!
//! ```toml
//! bind_addr = "0.0.0.0:8080"
//! channel_buffer = 64
//! log_filter = "bazaar=debug,tower_http=info"
//! session_ttl_secs = 3600
//! ```

use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

pub const CONFIG_PATH_VAR: &str = "BAZAAR_CONFIG";
pub const BIND_VAR: &str = "BAZAAR_BIND";
pub const CHANNEL_BUFFER_VAR: &str = "BAZAAR_CHANNEL_BUFFER";
pub const LOG_VAR: &str = "BAZAAR_LOG";
pub const SESSION_TTL_VAR: &str = "BAZAAR_SESSION_TTL";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value {value:?} for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BazaarConfig {
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,
    /// Request channel capacity of each resource actor.
    pub channel_buffer: usize,
    /// Default `tracing` filter directive; `RUST_LOG` still wins.
    pub log_filter: String,
    /// Seconds a session stays valid after login.
    pub session_ttl_secs: u64,
}

impl Default for BazaarConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            channel_buffer: 32,
            log_filter: "info".to_string(),
            session_ttl_secs: 24 * 60 * 60,
        }
    }
}

impl BazaarConfig {
    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_secs)
    }

    /// Loads the configuration from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_env(|name| std::env::var(name).ok())
    }

    /// Like [`BazaarConfig::load`], reading variables through `var`.
    pub fn from_env(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = match var(CONFIG_PATH_VAR) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.with_overrides(var)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()
    }

    fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        if let Some(value) = var(BIND_VAR) {
            self.bind_addr = value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: BIND_VAR,
                value: value.clone(),
                reason: "expected host:port".into(),
            })?;
        }
        if let Some(value) = var(CHANNEL_BUFFER_VAR) {
            self.channel_buffer = value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: CHANNEL_BUFFER_VAR,
                value: value.clone(),
                reason: "expected a positive integer".into(),
            })?;
        }
        if let Some(value) = var(LOG_VAR) {
            self.log_filter = value;
        }
        if let Some(value) = var(SESSION_TTL_VAR) {
            self.session_ttl_secs = value.trim().parse().map_err(|_| ConfigError::Invalid {
                name: SESSION_TTL_VAR,
                value: value.clone(),
                reason: "expected a number of seconds".into(),
            })?;
        }
        self.validate()
    }

    fn validate(self) -> Result<Self, ConfigError> {
        // tokio's mpsc::channel panics on a zero capacity
        if self.channel_buffer == 0 {
            return Err(ConfigError::Invalid {
                name: "channel_buffer",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.session_ttl_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "session_ttl_secs",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(self)
    }
}
