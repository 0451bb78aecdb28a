//! Configuration validation.
//!
//! Serde handles syntax; this module checks values that parse but cannot
//! work. All problems are collected so an operator sees them in one go.

use std::net::SocketAddr;

use axum::http::HeaderValue;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::config::schema::BeaconConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address `{0}` is not a socket address")]
    BindAddress(String),

    #[error("shutdown.timeout_secs must be greater than zero")]
    ShutdownTimeout,

    #[error("tls.{0} must not be empty")]
    EmptyPath(&'static str),

    #[error("response.server_name `{0}` is not a valid header value")]
    ServerName(String),

    #[error("observability.log_level `{0}` is not a valid filter directive")]
    LogLevel(String),
}

/// Check every field of `config`, returning all failures.
pub fn validate_config(config: &BeaconConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(config.listener.bind_address.clone()));
    }

    if config.shutdown.timeout_secs == 0 {
        errors.push(ValidationError::ShutdownTimeout);
    }

    if config.tls.cert_path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyPath("cert_path"));
    }
    if config.tls.key_path.as_os_str().is_empty() {
        errors.push(ValidationError::EmptyPath("key_path"));
    }

    if HeaderValue::from_str(&config.response.server_name).is_err() {
        errors.push(ValidationError::ServerName(config.response.server_name.clone()));
    }

    if EnvFilter::try_new(&config.observability.log_level).is_err() {
        errors.push(ValidationError::LogLevel(config.observability.log_level.clone()));
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
    use std::path::PathBuf;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(validate_config(&BeaconConfig::default()), Ok(()));
    }

    #[test]
    fn reports_every_problem() {
        let mut config = BeaconConfig::default();
        config.listener.bind_address = "localhost".into();
        config.shutdown.timeout_secs = 0;
        config.tls.key_path = PathBuf::new();
        config.response.server_name = "bad\nname".into();

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(
            errors,
            vec![
                ValidationError::BindAddress("localhost".into()),
                ValidationError::ShutdownTimeout,
                ValidationError::EmptyPath("key_path"),
                ValidationError::ServerName("bad\nname".into()),
            ]
        );
    }

    #[test]
    fn rejects_malformed_log_filter() {
        let mut config = BeaconConfig::default();
        config.observability.log_level = "http_beacon=loud".into();
        assert_eq!(
            validate_config(&config),
            Err(vec![ValidationError::LogLevel("http_beacon=loud".into())])
        );
    }
}
