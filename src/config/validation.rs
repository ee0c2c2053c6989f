//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (interval and timeouts > 0)
//! - Check addresses and the upstream URL parse
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: CacheConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;
use std::net::SocketAddr;

use url::Url;

use crate::config::schema::CacheConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &CacheConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }
    if config.listener.request_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "listener.request_timeout_secs",
            "must be greater than zero",
        ));
    }

    match Url::parse(&config.upstream.url) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::new(
            "upstream.url",
            format!("unsupported scheme '{}'", url.scheme()),
        )),
        Err(e) => errors.push(ValidationError::new("upstream.url", e.to_string())),
    }
    if config.upstream.user_agent.trim().is_empty() {
        errors.push(ValidationError::new("upstream.user_agent", "must not be empty"));
    }
    if config.upstream.interval_secs == 0 {
        errors.push(ValidationError::new(
            "upstream.interval_secs",
            "must be greater than zero",
        ));
    }
    if config.upstream.timeout_secs == 0 {
        errors.push(ValidationError::new(
            "upstream.timeout_secs",
            "must be greater than zero",
        ));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
