//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TLS connection
//!     → server.rs (axum-server, HTTP/1.1 + HTTP/2, middleware)
//!     → response.rs (log request, fixed 200 response)
//!     → Send to client
//! ```

pub mod response;
pub mod server;

pub use response::SERVER_NAME;
pub use server::BeaconServer;
