//! Structured logging.
//!
//! `RUST_LOG` takes precedence; otherwise the configured level applies to
//! this crate and to `tower_http` request spans.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{LogFormat, ObservabilityConfig};

/// Default filter directive for a configured level.
pub fn default_directive(level: &str) -> String {
    format!("inventory_cache={level},tower_http={level}")
}

/// Install the global tracing subscriber.
pub fn init(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_directive(&config.log_level).into());

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_parses() {
        let directive = default_directive("debug");
        assert_eq!(directive, "inventory_cache=debug,tower_http=debug");
        assert!(EnvFilter::try_new(directive).is_ok());
    }
}
