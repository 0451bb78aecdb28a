//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! Startup
//!     → listener.rs (bind, listener-level keep-alive)
//!     → tls.rs (certificate chain + key → rustls config)
//!
//! Incoming TCP connection
//!     → connection.rs (connection ID, per-connection keep-alive)
//!     → TLS handshake (axum-server RustlsAcceptor)
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - The listener is bound before any task starts; failure is fatal
//! - Keep-alive is one configuration axis, applied at listener or per connection

pub mod connection;
pub mod listener;
pub mod tls;

pub use connection::{ConnectionHook, ConnectionId};
pub use listener::{Listener, ListenerError};
pub use tls::{load_tls_config, TlsError};
