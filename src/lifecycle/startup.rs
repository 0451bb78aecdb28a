//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the HTTP server from the validated configuration
//! - Load TLS material
//! - Bind the listener
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal and nothing has been spawned yet
//! - The listener is bound last (the port is only held once everything else is ready)

use std::net::SocketAddr;

use axum_server::{tls_rustls::RustlsConfig, Handle};

use crate::config::BeaconConfig;
use crate::error::BeaconError;
use crate::http::BeaconServer;
use crate::lifecycle::Shutdown;
use crate::net::{load_tls_config, Listener};

/// A beacon that has everything it needs to serve, but is not serving yet.
pub struct Beacon {
    pub(super) listener: Listener,
    pub(super) tls: RustlsConfig,
    pub(super) server: BeaconServer,
    pub(super) shutdown: Shutdown,
}

impl std::fmt::Debug for Beacon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Beacon")
            .field("listener", &self.listener)
            .field("shutdown", &self.shutdown)
            .finish_non_exhaustive()
    }
}

impl Beacon {
    /// Prepare the server, load certificates and bind the listener.
    pub fn start(config: &BeaconConfig) -> Result<Self, BeaconError> {
        let server = BeaconServer::new(&config.response)?;
        let tls = load_tls_config(&config.tls)?;
        let listener = Listener::bind(&config.listener)?;

        Ok(Self {
            listener,
            tls,
            server,
            shutdown: Shutdown::new(Handle::new(), config.shutdown.timeout()),
        })
    }

    /// Address the listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.listener.local_addr()
    }

    /// Handle controlling the server loop.
    ///
    /// Calling `shutdown()` on it ends the loop without going through the
    /// graceful shutdown sequence.
    pub fn handle(&self) -> Handle {
        self.shutdown.handle().clone()
    }
}
