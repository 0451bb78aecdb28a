//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use http_beacon::config::{BeaconConfig, TlsConfig};
use http_beacon::net::tls::install_crypto_provider;
use http_beacon::{Beacon, Termination};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

/// Defaults, an ephemeral loopback port and the self-signed fixture certificate.
pub fn test_config() -> BeaconConfig {
    let mut config = BeaconConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.tls = TlsConfig::in_dir(&Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/certs"));
    config
}

/// A beacon running on a background task, with a trigger standing in for SIGINT.
pub struct RunningBeacon {
    pub addr: SocketAddr,
    pub handle: axum_server::Handle,
    interrupt: Option<oneshot::Sender<()>>,
    task: JoinHandle<Termination>,
}

impl RunningBeacon {
    pub fn start(config: &BeaconConfig) -> Self {
        let beacon = Beacon::start(config).expect("beacon should start");
        let addr = beacon.local_addr();
        let handle = beacon.handle();
        let (tx, rx) = oneshot::channel::<()>();
        let task = tokio::spawn(beacon.run(async move {
            // A dropped sender must not count as an interrupt.
            if rx.await.is_err() {
                std::future::pending::<()>().await;
            }
        }));
        Self {
            addr,
            handle,
            interrupt: Some(tx),
            task,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("https://{}{}", self.addr, path)
    }

    pub fn interrupt(&mut self) {
        if let Some(tx) = self.interrupt.take() {
            let _ = tx.send(());
        }
    }

    /// Wait for `run` to return, failing the test after `limit`.
    pub async fn finish(self, limit: Duration) -> Termination {
        let _interrupt = self.interrupt;
        tokio::time::timeout(limit, self.task)
            .await
            .expect("beacon did not terminate in time")
            .expect("run task panicked")
    }
}

/// HTTPS client trusting the self-signed fixture.
pub fn client() -> reqwest::Client {
    install_crypto_provider().unwrap();
    reqwest::Client::builder()
        .danger_accept_invalid_certs(true)
        .no_proxy()
        .build()
        .unwrap()
}
