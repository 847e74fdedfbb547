// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! SDK configuration.
//!
//! Compile-time defaults live here as constants. [`SdkConfig`] can be built
//! programmatically or loaded from a TOML file:
//!
//! ```toml
//! client_name = "inspection-app"
//!
//! [rpc]
//! default_timeout_ms = 30000
//!
//! [time_sync]
//! poll_interval_ms = 60000
//! not_ready_backoff_ms = 5000
//! slice_ms = 20
//!
//! [readiness]
//! interval_ms = 100
//! timeout_ms = 10000
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Time between estimates once time sync is established.
pub const DEFAULT_TIME_SYNC_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Back-off while the robot reports its time-sync service not ready.
pub const DEFAULT_TIME_SYNC_NOT_READY_BACKOFF: Duration = Duration::from_secs(5);

/// Granularity of the time-sync worker's sleeps and of `wait_for_sync`.
pub const TIME_SYNC_SLICE: Duration = Duration::from_millis(20);

/// Default interval between directory polls.
pub const DEFAULT_READINESS_INTERVAL: Duration = Duration::from_millis(100);

/// Default per-call deadline.
pub const DEFAULT_RPC_TIMEOUT: Duration = Duration::from_secs(30);

/// Default client name stamped into request headers.
pub const DEFAULT_CLIENT_NAME: &str = "quadlink-client";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level SDK configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SdkConfig {
    /// Name stamped into every request header.
    #[serde(default = "default_client_name")]
    pub client_name: String,

    #[serde(default)]
    pub rpc: RpcConfig,

    #[serde(default)]
    pub time_sync: TimeSyncConfig,

    #[serde(default)]
    pub readiness: ReadinessConfig,
}

/// Per-call defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcConfig {
    /// Deadline applied when a call does not set its own (milliseconds).
    #[serde(default = "default_rpc_timeout_ms")]
    pub default_timeout_ms: u64,

    /// Trace-log a stripped copy of every request.
    #[serde(default)]
    pub log_requests: bool,
}

/// Time-sync worker settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSyncConfig {
    /// Interval between estimates once established (milliseconds).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Back-off while the service is not ready (milliseconds).
    #[serde(default = "default_not_ready_backoff_ms")]
    pub not_ready_backoff_ms: u64,

    /// Sleep slice (milliseconds).
    #[serde(default = "default_slice_ms")]
    pub slice_ms: u64,
}

/// Service readiness waiter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadinessConfig {
    /// Interval between directory polls (milliseconds).
    #[serde(default = "default_readiness_interval_ms")]
    pub interval_ms: u64,

    /// Overall budget (milliseconds); 0 means one pass.
    #[serde(default)]
    pub timeout_ms: u64,
}

fn default_client_name() -> String {
    DEFAULT_CLIENT_NAME.to_string()
}

fn default_rpc_timeout_ms() -> u64 {
    DEFAULT_RPC_TIMEOUT.as_millis() as u64
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_TIME_SYNC_POLL_INTERVAL.as_millis() as u64
}

fn default_not_ready_backoff_ms() -> u64 {
    DEFAULT_TIME_SYNC_NOT_READY_BACKOFF.as_millis() as u64
}

fn default_slice_ms() -> u64 {
    TIME_SYNC_SLICE.as_millis() as u64
}

fn default_readiness_interval_ms() -> u64 {
    DEFAULT_READINESS_INTERVAL.as_millis() as u64
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            client_name: default_client_name(),
            rpc: RpcConfig::default(),
            time_sync: TimeSyncConfig::default(),
            readiness: ReadinessConfig::default(),
        }
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            default_timeout_ms: default_rpc_timeout_ms(),
            log_requests: false,
        }
    }
}

impl Default for TimeSyncConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            not_ready_backoff_ms: default_not_ready_backoff_ms(),
            slice_ms: default_slice_ms(),
        }
    }
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_readiness_interval_ms(),
            timeout_ms: 0,
        }
    }
}

impl SdkConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Default configuration with a custom client name.
    pub fn with_client_name(name: impl Into<String>) -> Self {
        Self {
            client_name: name.into(),
            ..Default::default()
        }
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.client_name.trim().is_empty() {
            return Err(ConfigError::Invalid("client_name must not be empty".into()));
        }
        if self.rpc.default_timeout_ms == 0 {
            return Err(ConfigError::Invalid(
                "rpc.default_timeout_ms must be positive".into(),
            ));
        }
        if self.time_sync.slice_ms == 0 {
            return Err(ConfigError::Invalid("time_sync.slice_ms must be positive".into()));
        }
        if self.time_sync.poll_interval_ms < self.time_sync.slice_ms {
            return Err(ConfigError::Invalid(format!(
                "time_sync.poll_interval_ms ({}) is shorter than slice_ms ({})",
                self.time_sync.poll_interval_ms, self.time_sync.slice_ms
            )));
        }
        if self.readiness.interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "readiness.interval_ms must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl RpcConfig {
    pub fn default_timeout(&self) -> Duration {
        Duration::from_millis(self.default_timeout_ms)
    }
}

impl TimeSyncConfig {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn not_ready_backoff(&self) -> Duration {
        Duration::from_millis(self.not_ready_backoff_ms)
    }

    pub fn slice(&self) -> Duration {
        Duration::from_millis(self.slice_ms)
    }
}

impl ReadinessConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = SdkConfig::default();
        assert_eq!(config.client_name, DEFAULT_CLIENT_NAME);
        assert_eq!(config.time_sync.poll_interval(), DEFAULT_TIME_SYNC_POLL_INTERVAL);
        assert_eq!(config.time_sync.not_ready_backoff(), DEFAULT_TIME_SYNC_NOT_READY_BACKOFF);
        assert_eq!(config.time_sync.slice(), TIME_SYNC_SLICE);
        assert_eq!(config.readiness.interval(), DEFAULT_READINESS_INTERVAL);
        assert_eq!(config.rpc.default_timeout(), DEFAULT_RPC_TIMEOUT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config = SdkConfig::from_toml_str(
            r#"
            client_name = "inspector"

            [time_sync]
            poll_interval_ms = 1000
            "#,
        )
        .unwrap();
        assert_eq!(config.client_name, "inspector");
        assert_eq!(config.time_sync.poll_interval(), Duration::from_secs(1));
        assert_eq!(config.time_sync.slice_ms, 20);
        assert_eq!(config.readiness, ReadinessConfig::default());
    }

    #[test]
    fn test_empty_client_name_rejected() {
        let err = SdkConfig::from_toml_str("client_name = \"  \"").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_poll_interval_shorter_than_slice_rejected() {
        let mut config = SdkConfig::default();
        config.time_sync.poll_interval_ms = 5;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("shorter than slice_ms"));
    }

    #[test]
    fn test_bad_toml_reports_parse_error() {
        let err = SdkConfig::from_toml_str("client_name = [").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let config = SdkConfig::with_client_name("roundtrip");
        let text = toml::to_string(&config).unwrap();
        assert_eq!(SdkConfig::from_toml_str(&text).unwrap(), config);
    }
}
