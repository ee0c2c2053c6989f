//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the cache.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Upstream inventory document fetched by default.
pub const DEFAULT_UPSTREAM_URL: &str = "https://layer.bicyclesharing.net/map/v1/mtl/map-inventory";

/// User-Agent the upstream expects; it rejects obvious non-browser clients.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:12.0) Gecko/20100101 Firefox/12.0";

/// Root configuration for the inventory cache.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct CacheConfig {
    /// Listener configuration (bind address, request timeout).
    pub listener: ListenerConfig,

    /// Upstream document and polling schedule.
    pub upstream: UpstreamConfig,

    /// How the cached document is written back to clients.
    pub response: ResponseOptions,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8999").
    pub bind_address: String,

    /// Upper bound on handling a single request, in seconds.
    pub request_timeout_secs: u64,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8999".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// Upstream polling configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Document URL (http or https).
    pub url: String,

    /// User-Agent header sent with every fetch.
    pub user_agent: String,

    /// Pause between the end of one fetch and the start of the next, in seconds.
    pub interval_secs: u64,

    /// Deadline for a single fetch (connect + headers + body), in seconds.
    pub timeout_secs: u64,

    /// Honor `HTTP_PROXY`/`HTTPS_PROXY` from the environment.
    pub system_proxy: bool,

    /// Treat non-2xx answers as failed fetches instead of caching their body.
    pub reject_error_status: bool,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_UPSTREAM_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            interval_secs: 30,
            timeout_secs: 10,
            system_proxy: true,
            reject_error_status: false,
        }
    }
}

/// Response shaping toggles.
///
/// With both flags off the body is written verbatim with no extra headers.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct ResponseOptions {
    /// Gzip the body when the client sends `Accept-Encoding: gzip`.
    pub compression: bool,

    /// Always send `Access-Control-Allow-Origin: *`.
    pub cors: bool,
}

impl Default for ResponseOptions {
    fn default() -> Self {
        Self {
            compression: true,
            cors: true,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
