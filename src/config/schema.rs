//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the harness.
//! All types derive Serde traits for deserialization from config files, and
//! every field has a default so an empty config file is valid. The defaults
//! mirror the settings the harness is normally benchmarked with.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Root configuration for the benchmark harness.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BenchConfig {
    /// Fixed-response server settings.
    pub server: ServerConfig,

    /// Load generator settings.
    pub load: LoadConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Fixed-response server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0:8000").
    pub bind_address: String,

    /// Maximum concurrent connections (backpressure).
    pub max_connections: usize,

    /// Connection lifecycle settings.
    pub connection: ConnectionConfig,

    /// The fixed response every request receives.
    pub response: ResponseConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8000".to_string(),
            max_connections: 10_000,
            connection: ConnectionConfig::default(),
            response: ResponseConfig::default(),
        }
    }
}

/// Connection lifecycle configuration.
///
/// Persistence requires both a `keep-alive` close policy and a non-zero idle
/// timeout; a zero timeout disables connection reuse regardless of the
/// advertised `Connection` header.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectionConfig {
    /// Value of the `Connection` response header (`close` or `keep-alive`).
    pub close_policy: ClosePolicy,

    /// How long an idle persistent connection is held open, in milliseconds.
    /// 0 disables persistence entirely.
    pub keep_alive_timeout_ms: u64,

    /// Maximum time a client may take to send its request headers, in
    /// milliseconds, before the connection is dropped.
    pub header_timeout_ms: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            close_policy: ClosePolicy::Close,
            keep_alive_timeout_ms: 0,
            header_timeout_ms: 65_000,
        }
    }
}

/// Connection-close policy advertised to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum ClosePolicy {
    /// Close the connection after every response.
    #[default]
    Close,
    /// Permit long-lived connections, subject to the idle timeout.
    KeepAlive,
}

impl ClosePolicy {
    /// Value for the `Connection` response header.
    pub fn as_header_value(&self) -> &'static str {
        match self {
            ClosePolicy::Close => "close",
            ClosePolicy::KeepAlive => "keep-alive",
        }
    }
}

impl FromStr for ClosePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "close" => Ok(ClosePolicy::Close),
            "keep-alive" => Ok(ClosePolicy::KeepAlive),
            other => Err(format!(
                "invalid close policy '{}', expected 'close' or 'keep-alive'",
                other
            )),
        }
    }
}

impl std::fmt::Display for ClosePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_header_value())
    }
}

/// The fixed status/body pair returned for every request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResponseConfig {
    /// Value of the `Content-Type` header.
    pub content_type: String,

    /// Response body.
    pub body: String,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            content_type: "text/plain".to_string(),
            body: "Hello, World!".to_string(),
        }
    }
}

/// Load generator configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoadConfig {
    /// URL every worker issues GET requests against.
    pub target_url: String,

    /// Number of concurrent workers.
    pub workers: usize,

    /// Optional per-request timeout in milliseconds. When absent a slow or
    /// hanging server can stall a worker indefinitely.
    pub request_timeout_ms: Option<u64>,

    /// Interval between aggregate progress logs, in seconds. 0 disables
    /// periodic reporting.
    pub report_interval_secs: u64,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            target_url: "http://127.0.0.1:60000/".to_string(),
            workers: 128,
            request_timeout_ms: None,
            report_interval_secs: 0,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
