//! Command-line interface.
//!
//! Precedence: flags > config file > built-in defaults.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{load_config, validation::validate_config, CacheConfig, ConfigError};

#[derive(Debug, Parser)]
#[command(name = "inventory-cache")]
#[command(version, long_about = None)]
#[command(about = "Polls the bike-share station inventory and serves the latest copy")]
pub struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "INVENTORY_CACHE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listen address, e.g. 0.0.0.0:8999.
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Upstream document URL.
    #[arg(long)]
    pub upstream_url: Option<String>,

    /// Never gzip responses.
    #[arg(long)]
    pub no_compression: bool,

    /// Do not send Access-Control-Allow-Origin.
    #[arg(long)]
    pub no_cors: bool,
}

impl Cli {
    /// Resolve the effective configuration.
    pub fn resolve(&self) -> Result<CacheConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => CacheConfig::default(),
        };

        if let Some(bind) = &self.bind {
            config.listener.bind_address = bind.clone();
        }
        if let Some(url) = &self.upstream_url {
            config.upstream.url = url.clone();
        }
        if self.no_compression {
            config.response.compression = false;
        }
        if self.no_cors {
            config.response.cors = false;
        }

        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(config)
    }
}
