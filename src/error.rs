//! Top-level error type.
//!
//! Everything here is a startup failure: once the beacon is serving,
//! problems are logged and reflected in the exit code only.

use axum::http::header::InvalidHeaderValue;
use thiserror::Error;

use crate::config::ConfigError;
use crate::net::{ListenerError, TlsError};
use crate::observability::LoggingError;

#[derive(Debug, Error)]
pub enum BeaconError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("error create logger: {0}")]
    Logging(#[from] LoggingError),

    #[error("error register interrupt handler: {0}")]
    Signal(#[source] std::io::Error),

    #[error("invalid server name: {0}")]
    ServerName(#[from] InvalidHeaderValue),

    #[error("error load TLS material: {0}")]
    Tls(#[from] TlsError),

    #[error("error start TCP listener: {0}")]
    Listener(#[from] ListenerError),
}
