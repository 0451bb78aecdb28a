//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the beacon.
//! All types derive Serde traits for deserialization from config files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Identifier sent in the `Server-Name` response header.
pub const DEFAULT_SERVER_NAME: &str = "troydai/http-beacon";

/// Root configuration for the beacon.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BeaconConfig {
    /// Listener configuration (bind address, keep-alive).
    pub listener: ListenerConfig,

    /// Certificate and key locations.
    pub tls: TlsConfig,

    /// Graceful shutdown settings.
    pub shutdown: ShutdownConfig,

    /// Fixed response settings.
    pub response: ResponseConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "127.0.0.1:8443").
    pub bind_address: String,

    /// TCP keep-alive handling for accepted connections.
    pub keep_alive: KeepAliveMode,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:8443".to_string(),
            keep_alive: KeepAliveMode::default(),
        }
    }
}

/// Where, if anywhere, TCP keep-alive gets switched off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum KeepAliveMode {
    /// Leave the operating system default untouched.
    #[default]
    #[serde(rename = "default")]
    #[value(name = "default")]
    OsDefault,

    /// Clear `SO_KEEPALIVE` on the listening socket before it starts listening.
    DisabledAtListener,

    /// Clear `SO_KEEPALIVE` on every accepted stream, before the TLS handshake.
    DisabledPerConnection,
}

impl std::fmt::Display for KeepAliveMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            KeepAliveMode::OsDefault => "default",
            KeepAliveMode::DisabledAtListener => "disabled-at-listener",
            KeepAliveMode::DisabledPerConnection => "disabled-per-connection",
        };
        f.write_str(name)
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TlsConfig {
    /// Path to certificate chain file (PEM).
    pub cert_path: PathBuf,

    /// Path to private key file (PEM).
    pub key_path: PathBuf,
}

impl TlsConfig {
    /// Look for `cert.pem` and `key.pem` inside `dir`.
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            cert_path: dir.join("cert.pem"),
            key_path: dir.join("key.pem"),
        }
    }

    /// Anchor relative paths at `base`. Absolute paths are kept as they are.
    pub fn resolve_against(&mut self, base: &Path) {
        if self.cert_path.is_relative() {
            self.cert_path = base.join(&self.cert_path);
        }
        if self.key_path.is_relative() {
            self.key_path = base.join(&self.key_path);
        }
    }
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self::in_dir(&working_dir().join("certs"))
    }
}

/// The directory named by `$PWD`, falling back to the process working directory.
pub fn working_dir() -> PathBuf {
    std::env::var_os("PWD")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .or_else(|| std::env::current_dir().ok())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Graceful shutdown configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ShutdownConfig {
    /// Upper bound for draining in-flight connections, in seconds.
    pub timeout_secs: u64,
}

impl ShutdownConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ShutdownConfig {
    fn default() -> Self {
        Self { timeout_secs: 10 }
    }
}

/// Fixed response configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ResponseConfig {
    /// Value of the `Server-Name` header.
    pub server_name: String,
}

impl Default for ResponseConfig {
    fn default() -> Self {
        Self {
            server_name: DEFAULT_SERVER_NAME.to_string(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Filter directive used when `RUST_LOG` is not set.
    pub log_level: String,

    /// Output format.
    pub log_format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "debug".to_string(),
            log_format: LogFormat::default(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_beacon_contract() {
        let config = BeaconConfig::default();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8443");
        assert_eq!(config.listener.keep_alive, KeepAliveMode::OsDefault);
        assert_eq!(config.shutdown.timeout(), std::time::Duration::from_secs(10));
        assert_eq!(config.response.server_name, DEFAULT_SERVER_NAME);
        assert!(config.tls.cert_path.ends_with("certs/cert.pem"));
        assert!(config.tls.key_path.ends_with("certs/key.pem"));
    }

    #[test]
    fn keep_alive_modes_use_kebab_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            mode: KeepAliveMode,
        }

        let parse = |s: &str| toml::from_str::<Wrapper>(&format!("mode = \"{s}\"")).map(|w| w.mode);
        assert_eq!(parse("default").ok(), Some(KeepAliveMode::OsDefault));
        assert_eq!(parse("disabled-at-listener").ok(), Some(KeepAliveMode::DisabledAtListener));
        assert_eq!(
            parse("disabled-per-connection").ok(),
            Some(KeepAliveMode::DisabledPerConnection)
        );
        assert!(parse("off").is_err());
        assert_eq!(KeepAliveMode::DisabledPerConnection.to_string(), "disabled-per-connection");
    }

    #[test]
    fn relative_tls_paths_resolve_against_base() {
        let mut tls = TlsConfig {
            cert_path: PathBuf::from("certs/cert.pem"),
            key_path: PathBuf::from("/etc/beacon/key.pem"),
        };
        tls.resolve_against(Path::new("/srv/beacon"));
        assert_eq!(tls.cert_path, PathBuf::from("/srv/beacon/certs/cert.pem"));
        assert_eq!(tls.key_path, PathBuf::from("/etc/beacon/key.pem"));
    }
}
