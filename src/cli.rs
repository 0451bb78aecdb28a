//! Command line interface of the `http-beacon` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::config::loader::{finalize, load_config};
use crate::config::schema::working_dir;
use crate::config::{BeaconConfig, ConfigError, KeepAliveMode, LogFormat};

#[derive(Debug, Parser)]
#[command(name = "http-beacon", version)]
#[command(about = "TLS liveness beacon answering every request with 200 OK", long_about = None)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, env = "BEACON_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    pub bind: Option<String>,

    /// Where to switch TCP keep-alive off, if anywhere
    #[arg(long, value_enum)]
    pub keep_alive: Option<KeepAliveMode>,

    /// Certificate chain (PEM)
    #[arg(long)]
    pub cert: Option<PathBuf>,

    /// Private key (PEM)
    #[arg(long)]
    pub key: Option<PathBuf>,

    /// Upper bound for the graceful shutdown, in seconds
    #[arg(long)]
    pub shutdown_timeout_secs: Option<u64>,

    /// Log output format
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,
}

impl Cli {
    /// Load the config file, if any, apply flags on top and validate.
    pub fn into_config(self) -> Result<BeaconConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => BeaconConfig::default(),
        };

        if let Some(bind) = self.bind {
            config.listener.bind_address = bind;
        }
        if let Some(mode) = self.keep_alive {
            config.listener.keep_alive = mode;
        }
        if let Some(cert) = self.cert {
            config.tls.cert_path = cert;
        }
        if let Some(key) = self.key {
            config.tls.key_path = key;
        }
        if let Some(secs) = self.shutdown_timeout_secs {
            config.shutdown.timeout_secs = secs;
        }
        if let Some(format) = self.log_format {
            config.observability.log_format = format;
        }
        config.tls.resolve_against(&working_dir());

        finalize(config)
    }
}
