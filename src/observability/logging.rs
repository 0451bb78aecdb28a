//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the global `tracing` subscriber
//! - Pick the filter (`RUST_LOG` first, then the configured level)
//! - Pick the output format (pretty, compact, JSON)

use thiserror::Error;
use tracing_subscriber::{
    filter::ParseError, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
    EnvFilter,
};

use crate::config::{LogFormat, ObservabilityConfig};

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter `{directive}`: {source}")]
    Filter {
        directive: String,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Init(#[from] TryInitError),
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &ObservabilityConfig) -> Result<(), LoggingError> {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let (filter, rejected_env) = build_filter(env.as_deref(), &config.log_level)?;
    let registry = tracing_subscriber::registry().with(filter);

    match config.log_format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer().pretty()).try_init()?,
        LogFormat::Compact => registry.with(tracing_subscriber::fmt::layer().compact()).try_init()?,
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).try_init()?,
    }

    if let (Some(directive), Some(error)) = (env.as_deref(), rejected_env) {
        tracing::warn!(
            directive,
            %error,
            fallback = %config.log_level,
            "Ignoring invalid RUST_LOG, using configured log level"
        );
    }
    Ok(())
}

/// A usable `env` directive wins; otherwise `fallback` must parse.
///
/// Also returns the parse error of an `env` directive that was dropped.
fn build_filter(
    env: Option<&str>,
    fallback: &str,
) -> Result<(EnvFilter, Option<ParseError>), LoggingError> {
    let rejected = match env.map(EnvFilter::try_new) {
        Some(Ok(filter)) => return Ok((filter, None)),
        Some(Err(e)) => Some(e),
        None => None,
    };
    let filter = EnvFilter::try_new(fallback).map_err(|source| LoggingError::Filter {
        directive: fallback.to_string(),
        source,
    })?;
    Ok((filter, rejected))
}
