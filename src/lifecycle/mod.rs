//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGINT registered before anything binds → resolves once
//!
//! Startup (startup.rs):
//!     Validated config → HTTP server → TLS → bind listener
//!
//! Run (coordinator.rs):
//!     spawn server loop ─┐
//!     spawn shutdown task┴→ first completion token decides the exit code
//!
//! Shutdown (shutdown.rs):
//!     Stop accepting → drain connections (bounded) → force close stragglers
//! ```
//!
//! # Design Decisions
//! - Ordered startup: config first, then TLS, then listener
//! - Shutdown has a timeout; exceeding it is reported with exit code 1
//! - Only one-shot channels cross task boundaries

pub mod coordinator;
pub mod shutdown;
pub mod signals;
pub mod startup;

pub use coordinator::Termination;
pub use shutdown::{Shutdown, ShutdownOutcome};
pub use signals::InterruptSignal;
pub use startup::Beacon;
