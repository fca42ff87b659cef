//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, worker count > 0)
//! - Check the target URL is absolute and uses a supported scheme
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BenchConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderValue;
use url::Url;

use crate::config::schema::BenchConfig;

/// A single semantic configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    InvalidBindAddress(String),
    ZeroMaxConnections,
    ZeroHeaderTimeout,
    InvalidContentType(String),
    InvalidTargetUrl(String),
    UnsupportedScheme(String),
    ZeroWorkers,
    ZeroRequestTimeout,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::InvalidBindAddress(addr) => {
                write!(f, "server.bind_address '{}' is not a valid socket address", addr)
            }
            ValidationError::ZeroMaxConnections => {
                write!(f, "server.max_connections must be greater than 0")
            }
            ValidationError::ZeroHeaderTimeout => {
                write!(f, "server.connection.header_timeout_ms must be greater than 0")
            }
            ValidationError::InvalidContentType(value) => {
                write!(f, "server.response.content_type '{}' is not a valid header value", value)
            }
            ValidationError::InvalidTargetUrl(url) => {
                write!(f, "load.target_url '{}' is not a valid URL", url)
            }
            ValidationError::UnsupportedScheme(scheme) => {
                write!(f, "load.target_url scheme '{}' is not supported (use http or https)", scheme)
            }
            ValidationError::ZeroWorkers => {
                write!(f, "load.workers must be greater than 0")
            }
            ValidationError::ZeroRequestTimeout => {
                write!(f, "load.request_timeout_ms must be greater than 0 when set")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validate a configuration, collecting every error found.
pub fn validate_config(config: &BenchConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.server.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.server.bind_address.clone(),
        ));
    }

    if config.server.max_connections == 0 {
        errors.push(ValidationError::ZeroMaxConnections);
    }

    if config.server.connection.header_timeout_ms == 0 {
        errors.push(ValidationError::ZeroHeaderTimeout);
    }

    if HeaderValue::from_str(&config.server.response.content_type).is_err() {
        errors.push(ValidationError::InvalidContentType(
            config.server.response.content_type.clone(),
        ));
    }

    match Url::parse(&config.load.target_url) {
        Ok(url) => {
            if url.scheme() != "http" && url.scheme() != "https" {
                errors.push(ValidationError::UnsupportedScheme(url.scheme().to_string()));
            }
        }
        Err(_) => {
            errors.push(ValidationError::InvalidTargetUrl(
                config.load.target_url.clone(),
            ));
        }
    }

    if config.load.workers == 0 {
        errors.push(ValidationError::ZeroWorkers);
    }

    if config.load.request_timeout_ms == Some(0) {
        errors.push(ValidationError::ZeroRequestTimeout);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&BenchConfig::default()).is_ok());
    }

    #[test]
    fn collects_all_errors() {
        let mut config = BenchConfig::default();
        config.server.bind_address = "not-an-address".to_string();
        config.server.connection.header_timeout_ms = 0;
        config.load.workers = 0;
        config.load.target_url = "ftp://127.0.0.1/".to_string();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::ZeroHeaderTimeout));
        assert!(errors.contains(&ValidationError::ZeroWorkers));
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::UnsupportedScheme(_))));
    }

    #[test]
    fn zero_request_timeout_rejected() {
        let mut config = BenchConfig::default();
        config.load.request_timeout_ms = Some(0);
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::ZeroRequestTimeout]);
    }

    #[test]
    fn relative_target_url_rejected() {
        let mut config = BenchConfig::default();
        config.load.target_url = "/just/a/path".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ValidationError::InvalidTargetUrl(_))));
    }
}
