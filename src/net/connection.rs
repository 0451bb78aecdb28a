//! Post-accept connection hook.
//!
//! # Responsibilities
//! - Assign every accepted TCP stream an ID for log correlation
//! - Clear `SO_KEEPALIVE` per connection when configured to
//! - Hand the stream on to the TLS acceptor unchanged

use std::future::{ready, Ready};
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};

use axum_server::accept::Accept;
use socket2::SockRef;
use tokio::net::TcpStream;

use crate::config::KeepAliveMode;

/// Global atomic counter for connection IDs.
/// Using relaxed ordering is sufficient since we only need uniqueness, not synchronization.
static CONNECTION_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Generate a new unique connection ID.
    pub fn new() -> Self {
        Self(CONNECTION_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }

    /// Get the raw ID value.
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Innermost acceptor: sees the raw TCP stream before the TLS handshake.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionHook {
    keep_alive: KeepAliveMode,
}

impl ConnectionHook {
    pub fn new(keep_alive: KeepAliveMode) -> Self {
        Self { keep_alive }
    }

    fn on_accept(&self, stream: &TcpStream) {
        let id = ConnectionId::new();
        let peer = stream.peer_addr().ok();
        let local = stream.local_addr().ok();
        tracing::debug!(connection_id = %id, peer = ?peer, local = ?local, "Connection accepted");

        if self.keep_alive != KeepAliveMode::DisabledPerConnection {
            return;
        }
        // Errors are logged only; the connection is still served.
        match SockRef::from(stream).set_keepalive(false) {
            Ok(()) => tracing::debug!(connection_id = %id, "Keep-alive disabled"),
            Err(e) => tracing::error!(connection_id = %id, error = %e, "Failed to disable keep-alive"),
        }
    }
}

impl<S> Accept<TcpStream, S> for ConnectionHook {
    type Stream = TcpStream;
    type Service = S;
    type Future = Ready<io::Result<(Self::Stream, Self::Service)>>;

    fn accept(&self, stream: TcpStream, service: S) -> Self::Future {
        self.on_accept(&stream);
        ready(Ok((stream, service)))
    }
}
