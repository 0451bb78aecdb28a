//! The race between the server loop and the shutdown sequence.
//!
//! ```text
//!             ┌──────────────┐  server loop ended   ┌──────────┐
//!             │ server task  │─────────────────────▶│          │
//!             └──────────────┘     (oneshot)        │  run()   │──▶ Termination
//!             ┌──────────────┐ shutdown ended+code  │  select  │
//! interrupt ─▶│ shutdown task│─────────────────────▶│          │
//!             └──────────────┘     (oneshot)        └──────────┘
//! ```
//!
//! Whichever token arrives first decides the exit code. The other sender
//! finds its receiver gone and its `send` returns immediately.

use std::future::Future;

use tokio::sync::oneshot;

use crate::lifecycle::shutdown::ShutdownOutcome;
use crate::lifecycle::Beacon;

/// Which terminal event ended the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The serve loop returned on its own.
    ServerStopped,
    /// An interrupt triggered the shutdown sequence, which finished first.
    ShutdownCompleted(ShutdownOutcome),
}

impl Termination {
    /// Process exit code for this termination.
    pub fn exit_code(&self) -> u8 {
        match self {
            Termination::ServerStopped => 0,
            Termination::ShutdownCompleted(outcome) => outcome.exit_code(),
        }
    }
}

impl Beacon {
    /// Serve until the server loop ends or `shutdown_requested` resolves and
    /// the bounded graceful shutdown completes, whichever happens first.
    pub async fn run<F>(self, shutdown_requested: F) -> Termination
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Beacon {
            listener,
            tls,
            server,
            shutdown,
        } = self;

        let (server_stopped_tx, server_stopped_rx) = oneshot::channel::<()>();
        let (shutdown_done_tx, shutdown_done_rx) = oneshot::channel::<ShutdownOutcome>();

        let handle = shutdown.handle().clone();
        tokio::spawn(async move {
            tracing::info!("Server started");
            match server.serve(listener, tls, handle).await {
                Ok(()) => tracing::info!("Server stopped"),
                Err(e) => tracing::error!(error = %e, "Server stopped with error"),
            }
            let _ = server_stopped_tx.send(());
        });

        tokio::spawn(async move {
            shutdown_requested.await;
            tracing::info!(
                timeout_secs = shutdown.timeout().as_secs(),
                "Shutting down server, waiting for in-flight requests"
            );

            let outcome = shutdown.drain().await;
            match outcome {
                ShutdownOutcome::Drained => tracing::info!("Server drained"),
                ShutdownOutcome::TimedOut { open_connections } => tracing::warn!(
                    open_connections,
                    "Shutdown timed out, closing remaining connections"
                ),
            }

            // Report before forcing, so the forced loop exit cannot win the race.
            let _ = shutdown_done_tx.send(outcome);
            if let ShutdownOutcome::TimedOut { .. } = outcome {
                shutdown.force();
            }
        });

        tokio::select! {
            biased;
            Ok(outcome) = shutdown_done_rx => {
                tracing::info!(exit_code = outcome.exit_code(), "Shutdown sequence finished, exiting");
                Termination::ShutdownCompleted(outcome)
            }
            _ = server_stopped_rx => {
                tracing::info!("Server stopped, exiting");
                Termination::ServerStopped
            }
        }
    }
}
