//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use crate::config::schema::CacheConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Validation(Vec<ValidationError>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "IO error: {}", e),
            ConfigError::Parse(e) => write!(f, "Parse error: {}", e),
            ConfigError::Validation(errors) => {
                write!(f, "Validation failed: ")?;
                for (i, err) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", err)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Validation(_) => None,
        }
    }
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<CacheConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(ConfigError::Io)?;
    parse_config(&content)
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<CacheConfig, ConfigError> {
    let config: CacheConfig = toml::from_str(content).map_err(ConfigError::Parse)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = parse_config(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [upstream]
            url = "http://127.0.0.1:3000/inventory"
            interval_secs = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.upstream.url, "http://127.0.0.1:3000/inventory");
        assert_eq!(config.upstream.interval_secs, 5);
        assert_eq!(config.upstream.timeout_secs, 10);
    }

    #[test]
    fn test_example_file_matches_defaults() {
        let config = parse_config(include_str!("../../inventory-cache.example.toml")).unwrap();
        assert_eq!(config, CacheConfig::default());
    }

    #[test]
    fn test_syntax_error_is_parse_error() {
        let err = parse_config("[upstream\nurl = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_errors_are_listed() {
        let err = parse_config(
            r#"
            [upstream]
            interval_secs = 0
            timeout_secs = 0
            "#,
        )
        .unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("Validation failed: "));
        assert!(message.contains("upstream.interval_secs"));
        assert!(message.contains("upstream.timeout_secs"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
