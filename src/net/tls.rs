//! TLS configuration and certificate loading.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use axum_server::tls_rustls::RustlsConfig;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use thiserror::Error;

use crate::config::TlsConfig;

/// Errors raised while preparing the TLS acceptor.
#[derive(Debug, Error)]
pub enum TlsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no certificate found in {0}")]
    NoCertificate(PathBuf),

    #[error("no private key found in {0}")]
    NoPrivateKey(PathBuf),

    #[error("failed to install the rustls crypto provider")]
    CryptoProvider,

    #[error("certificate and key rejected: {0}")]
    Rustls(#[from] rustls::Error),
}

/// Install ring as the process-wide rustls provider, once.
pub fn install_crypto_provider() -> Result<(), TlsError> {
    static RUSTLS_INIT: OnceLock<bool> = OnceLock::new();
    let installed = RUSTLS_INIT.get_or_init(|| {
        rustls::crypto::ring::default_provider().install_default().is_ok()
            || rustls::crypto::CryptoProvider::get_default().is_some()
    });
    if *installed {
        Ok(())
    } else {
        Err(TlsError::CryptoProvider)
    }
}

/// Load TLS configuration from certificate and key files.
pub fn load_tls_config(config: &TlsConfig) -> Result<RustlsConfig, TlsError> {
    install_crypto_provider()?;

    let certs = read_certificates(&config.cert_path)?;
    let key = read_private_key(&config.key_path)?;

    let mut server_config = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)?;
    server_config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];

    tracing::debug!(
        cert_path = %config.cert_path.display(),
        key_path = %config.key_path.display(),
        "TLS configuration loaded"
    );

    Ok(RustlsConfig::from_config(Arc::new(server_config)))
}

fn open(path: &Path) -> Result<BufReader<File>, TlsError> {
    File::open(path).map(BufReader::new).map_err(|source| TlsError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn read_certificates(path: &Path) -> Result<Vec<CertificateDer<'static>>, TlsError> {
    let mut reader = open(path)?;
    let certs = rustls_pemfile::certs(&mut reader)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|source| TlsError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    if certs.is_empty() {
        return Err(TlsError::NoCertificate(path.to_path_buf()));
    }
    Ok(certs)
}

fn read_private_key(path: &Path) -> Result<PrivateKeyDer<'static>, TlsError> {
    let mut reader = open(path)?;
    rustls_pemfile::private_key(&mut reader)
        .map_err(|source| TlsError::Read {
            path: path.to_path_buf(),
            source,
        })?
        .ok_or_else(|| TlsError::NoPrivateKey(path.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixtures() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/certs")
    }

    #[test]
    fn loads_fixture_pair() {
        let config = TlsConfig::in_dir(&fixtures());
        assert!(load_tls_config(&config).is_ok());
    }

    #[test]
    fn missing_certificate_file() {
        let config = TlsConfig {
            cert_path: fixtures().join("absent.pem"),
            key_path: fixtures().join("key.pem"),
        };
        assert!(matches!(load_tls_config(&config), Err(TlsError::Read { .. })));
    }

    #[test]
    fn key_file_without_certificate() {
        let config = TlsConfig {
            cert_path: fixtures().join("key.pem"),
            key_path: fixtures().join("key.pem"),
        };
        assert!(matches!(load_tls_config(&config), Err(TlsError::NoCertificate(_))));
    }

    #[test]
    fn certificate_file_without_key() {
        let config = TlsConfig {
            cert_path: fixtures().join("cert.pem"),
            key_path: fixtures().join("cert.pem"),
        };
        assert!(matches!(load_tls_config(&config), Err(TlsError::NoPrivateKey(_))));
    }

    #[test]
    fn provider_install_is_idempotent() {
        assert!(install_crypto_provider().is_ok());
        assert!(install_crypto_provider().is_ok());
    }
}
