//! TLS liveness beacon library

pub mod cli;
pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::BeaconConfig;
pub use error::BeaconError;
pub use http::BeaconServer;
pub use lifecycle::{Beacon, InterruptSignal, Shutdown, ShutdownOutcome, Termination};
