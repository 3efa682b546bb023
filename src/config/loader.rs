//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::ServiceConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `listener.port`.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse a TOML document into a config. Missing sections take their defaults.
pub fn parse_config(content: &str) -> Result<ServiceConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load a config from an optional TOML file, apply the environment, then validate.
pub fn load_config(path: Option<&Path>) -> Result<ServiceConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_config(&fs::read_to_string(path)?)?,
        None => ServiceConfig::default(),
    };

    apply_port_override(&mut config, std::env::var(PORT_ENV).ok().as_deref());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply a `PORT` value. Unset keeps the configured port; garbage is logged and ignored.
pub fn apply_port_override(config: &mut ServiceConfig, port: Option<&str>) {
    let Some(raw) = port else {
        return;
    };

    match raw.trim().parse::<u16>() {
        Ok(port) => config.listener.port = port,
        Err(_) => {
            tracing::warn!(
                value = %raw,
                port = config.listener.port,
                "Ignoring unparsable PORT, keeping configured port"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_yields_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config.listener.port, 3000);
        assert_eq!(config.auth.header, "x-api-key");
        assert_eq!(config.catalog.default_limit, 10);
        assert!(config.catalog.seed_demo_data);
    }

    #[test]
    fn test_partial_sections() {
        let config = parse_config(
            r#"
            [listener]
            port = 8080

            [auth]
            api_key = "hunter2"

            [catalog]
            seed_demo_data = false
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.port, 8080);
        assert_eq!(config.listener.host, "0.0.0.0");
        assert_eq!(config.auth.api_key, "hunter2");
        assert_eq!(config.auth.header, "x-api-key");
        assert!(!config.catalog.seed_demo_data);
    }

    #[test]
    fn test_parse_error() {
        let err = parse_config("[listener]\nport = \"not a number\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_port_override() {
        let mut config = ServiceConfig::default();

        apply_port_override(&mut config, None);
        assert_eq!(config.listener.port, 3000);

        apply_port_override(&mut config, Some("4100"));
        assert_eq!(config.listener.port, 4100);

        apply_port_override(&mut config, Some("eighty"));
        assert_eq!(config.listener.port, 4100);
    }

    #[test]
    fn test_validation_error_display() {
        let err = ConfigError::Validation(vec![
            ValidationError {
                field: "auth.api_key",
                reason: "must not be empty".into(),
            },
            ValidationError {
                field: "timeouts.request_secs",
                reason: "must be greater than 0".into(),
            },
        ]);
        assert_eq!(
            err.to_string(),
            "Validation failed: auth.api_key: must not be empty, timeouts.request_secs: must be greater than 0"
        );
    }
}
