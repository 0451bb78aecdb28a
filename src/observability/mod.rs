//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → tracing events (startup, connections, requests, shutdown, exit)
//!     → logging.rs subscriber (stdout, pretty/compact/JSON)
//! ```
//!
//! # Design Decisions
//! - Structured fields rather than formatted messages
//! - Request ID generated per request and attached to its span

pub mod logging;

pub use logging::{init_logging, LoggingError};
