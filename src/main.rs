//! HTTP beacon
//!
//! A TLS-terminated responder that answers every request with `200 OK`,
//! `Content-Type: text/plain` and a `Server-Name` header. Useful as a
//! liveness/reachability probe target.
//!
//! # Architecture Overview
//!
//! ```text
//!                  ┌──────────────────────────────────────────────┐
//!                  │                   BEACON                     │
//!                  │                                              │
//!   Client ────────┼─▶ net::listener ─▶ net::connection ─▶ TLS ──┼─┐
//!                  │   (bind, keep-alive)  (per-conn hook)         │ │
//!                  │                                              │ │
//!   Client ◀───────┼── http::response ◀── http::server ◀──────────┼─┘
//!                  │   (200, Server-Name)   (axum + tower-http)     │
//!                  │                                              │
//!   SIGINT ────────┼─▶ lifecycle: signal → bounded drain → exit   │
//!                  └──────────────────────────────────────────────┘
//! ```
//!
//! # Exit codes
//! - `0`: the server loop stopped, or an interrupt drained every connection in time
//! - `1`: startup failed, or the graceful shutdown hit its timeout

use std::process::ExitCode;

use clap::Parser;

use http_beacon::cli::Cli;
use http_beacon::observability::init_logging;
use http_beacon::{Beacon, BeaconError, InterruptSignal};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match Cli::parse().into_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", BeaconError::from(e));
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_logging(&config.observability) {
        eprintln!("{}", BeaconError::from(e));
        return ExitCode::FAILURE;
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "http-beacon starting");
    tracing::info!(
        bind_address = %config.listener.bind_address,
        keep_alive = %config.listener.keep_alive,
        cert_path = %config.tls.cert_path.display(),
        key_path = %config.tls.key_path.display(),
        shutdown_timeout_secs = config.shutdown.timeout_secs,
        "Configuration loaded"
    );

    // Registered before binding so an early interrupt is not lost.
    let interrupt = match InterruptSignal::install() {
        Ok(interrupt) => interrupt,
        Err(e) => {
            tracing::error!(error = %BeaconError::Signal(e), "Fatal startup error");
            return ExitCode::FAILURE;
        }
    };

    let beacon = match Beacon::start(&config) {
        Ok(beacon) => beacon,
        Err(e) => {
            tracing::error!(error = %e, "Fatal startup error");
            return ExitCode::FAILURE;
        }
    };

    let termination = beacon.run(interrupt.recv()).await;
    tracing::info!(?termination, exit_code = termination.exit_code(), "Exiting");
    ExitCode::from(termination.exit_code())
}
