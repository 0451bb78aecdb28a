//! OS signal handling.
//!
//! # Responsibilities
//! - Register for the interrupt signal (SIGINT, Ctrl+C on Windows)
//! - Resolve once, on the first delivery
//!
//! # Design Decisions
//! - Registration happens in [`InterruptSignal::install`], before the
//!   listener is bound; a signal arriving in between is buffered by tokio
//! - `recv` consumes the handle, so the signal is never re-armed

#[cfg(unix)]
type Inner = tokio::signal::unix::Signal;
#[cfg(windows)]
type Inner = tokio::signal::windows::CtrlC;

/// A registered, not yet consumed, interrupt notification.
#[derive(Debug)]
pub struct InterruptSignal {
    inner: Inner,
}

impl InterruptSignal {
    /// Register the handler. Must be called from within a tokio runtime.
    pub fn install() -> std::io::Result<Self> {
        #[cfg(unix)]
        let inner = tokio::signal::unix::signal(tokio::signal::unix::SignalKind::interrupt())?;
        #[cfg(windows)]
        let inner = tokio::signal::windows::ctrl_c()?;

        Ok(Self { inner })
    }

    /// Wait for the first interrupt.
    pub async fn recv(mut self) {
        match self.inner.recv().await {
            Some(()) => tracing::info!("Interrupt received"),
            None => {
                tracing::warn!("Interrupt stream closed, shutdown can no longer be signalled");
                std::future::pending::<()>().await;
            }
        }
    }
}
