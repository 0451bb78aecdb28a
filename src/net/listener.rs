//! TCP listener construction.
//!
//! # Responsibilities
//! - Bind to the configured address
//! - Apply the listener-level keep-alive setting before `listen(2)`
//! - Fail fast: a bind error is never retried

use std::net::SocketAddr;

use socket2::{Domain, Protocol, SockRef, Socket, Type};

use crate::config::{KeepAliveMode, ListenerConfig};

const BACKLOG: i32 = 1024;

/// Error type for listener operations.
#[derive(Debug)]
pub enum ListenerError {
    /// The bind address did not parse.
    Address(std::net::AddrParseError),
    /// Failed to create, configure or bind the socket.
    Bind(std::io::Error),
}

impl std::fmt::Display for ListenerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ListenerError::Address(e) => write!(f, "Invalid bind address: {}", e),
            ListenerError::Bind(e) => write!(f, "Failed to bind: {}", e),
        }
    }
}

impl std::error::Error for ListenerError {}

/// A bound, listening socket ready to be handed to the server task.
#[derive(Debug)]
pub struct Listener {
    inner: std::net::TcpListener,
    local_addr: SocketAddr,
    keep_alive: KeepAliveMode,
}

impl Listener {
    /// Bind to the configured address.
    ///
    /// With [`KeepAliveMode::DisabledAtListener`] the listening socket has
    /// `SO_KEEPALIVE` cleared, which accepted sockets inherit.
    pub fn bind(config: &ListenerConfig) -> Result<Self, ListenerError> {
        let addr: SocketAddr = config.bind_address.parse().map_err(ListenerError::Address)?;

        let socket = Socket::new(Domain::for_address(addr), Type::STREAM, Some(Protocol::TCP))
            .map_err(ListenerError::Bind)?;
        #[cfg(unix)]
        socket.set_reuse_address(true).map_err(ListenerError::Bind)?;
        if config.keep_alive == KeepAliveMode::DisabledAtListener {
            socket.set_keepalive(false).map_err(ListenerError::Bind)?;
        }
        socket.set_nonblocking(true).map_err(ListenerError::Bind)?;
        socket.bind(&addr.into()).map_err(ListenerError::Bind)?;
        socket.listen(BACKLOG).map_err(ListenerError::Bind)?;

        let inner: std::net::TcpListener = socket.into();
        let local_addr = inner.local_addr().map_err(ListenerError::Bind)?;

        tracing::info!(
            address = %local_addr,
            keep_alive = %config.keep_alive,
            "Listener bound"
        );

        Ok(Self {
            inner,
            local_addr,
            keep_alive: config.keep_alive,
        })
    }

    /// Get the local address this listener is bound to.
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Keep-alive mode the listener was built with.
    pub fn keep_alive(&self) -> KeepAliveMode {
        self.keep_alive
    }

    /// Whether `SO_KEEPALIVE` is currently set on the listening socket.
    pub fn keepalive_enabled(&self) -> std::io::Result<bool> {
        SockRef::from(&self.inner).keepalive()
    }

    /// Give up the socket to the server.
    pub fn into_std(self) -> std::net::TcpListener {
        self.inner
    }
}
