//! Configuration validation.
//!
//! Serde handles syntax; this pass checks values the service cannot run with.
//! Every problem is collected so one startup failure reports them all.

use axum::http::HeaderName;
use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem in a loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: String,
}

impl ValidationError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Check a configuration, returning every problem found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.host.trim().is_empty() {
        errors.push(ValidationError::new("listener.host", "must not be empty"));
    }

    if config.auth.api_key.is_empty() {
        errors.push(ValidationError::new("auth.api_key", "must not be empty"));
    }

    if config.auth.header.is_empty() {
        errors.push(ValidationError::new("auth.header", "must not be empty"));
    } else if HeaderName::from_bytes(config.auth.header.as_bytes()).is_err() {
        errors.push(ValidationError::new(
            "auth.header",
            format!("'{}' is not a valid header name", config.auth.header),
        ));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than 0"));
    }

    if config.catalog.default_page == 0 {
        errors.push(ValidationError::new("catalog.default_page", "must be greater than 0"));
    }

    if config.catalog.default_limit == 0 {
        errors.push(ValidationError::new("catalog.default_limit", "must be greater than 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
