//! Shutdown coordination for the beacon.

use std::time::Duration;

use axum_server::Handle;

const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// How a graceful shutdown ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Every connection finished within the bound.
    Drained,
    /// The bound elapsed with connections still open.
    TimedOut { open_connections: usize },
}

impl ShutdownOutcome {
    /// Process exit code reported for this outcome.
    pub fn exit_code(&self) -> u8 {
        match self {
            ShutdownOutcome::Drained => 0,
            ShutdownOutcome::TimedOut { .. } => 1,
        }
    }
}

/// Bounded graceful shutdown of the server sharing `handle`.
#[derive(Clone)]
pub struct Shutdown {
    handle: Handle,
    timeout: Duration,
}

impl std::fmt::Debug for Shutdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Shutdown")
            .field("timeout", &self.timeout)
            .field("open_connections", &self.handle.connection_count())
            .finish()
    }
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new(handle: Handle, timeout: Duration) -> Self {
        Self { handle, timeout }
    }

    /// The server handle this coordinator drives.
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Upper bound for [`Shutdown::drain`].
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Stop accepting and wait, at most `timeout`, for open connections to finish.
    ///
    /// Connections still open at the bound are left for [`Shutdown::force`].
    pub async fn drain(&self) -> ShutdownOutcome {
        self.handle.graceful_shutdown(None);

        match tokio::time::timeout(self.timeout, self.wait_for_connections()).await {
            Ok(()) => ShutdownOutcome::Drained,
            Err(_) => ShutdownOutcome::TimedOut {
                open_connections: self.handle.connection_count(),
            },
        }
    }

    /// Close every remaining connection now.
    pub fn force(&self) {
        self.handle.shutdown();
    }

    async fn wait_for_connections(&self) {
        while self.handle.connection_count() > 0 {
            tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
        }
    }
}
