//! Shutdown coordination for the proxy.

use tokio::sync::watch;

/// Coordinator for stopping the server.
///
/// The server holds a [`ShutdownSignal`]; whoever owns the coordinator
/// (the signal listener in `main`, or a test) calls [`Shutdown::trigger`].
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

impl Shutdown {
    /// Create a new shutdown coordinator.
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    /// Hand out a signal that resolves once shutdown is triggered.
    pub fn subscribe(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Trigger shutdown. Idempotent.
    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

/// Receiving half of [`Shutdown`].
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl ShutdownSignal {
    /// Resolve when shutdown is triggered or the coordinator is dropped.
    pub async fn wait(mut self) {
        // An Err means the sender is gone; treat that as shutdown too.
        let _ = self.rx.wait_for(|stopped| *stopped).await;
    }
}
