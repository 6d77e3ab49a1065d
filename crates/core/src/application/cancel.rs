// Cancellation Signal

use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Cancellation signal observed by a single execution
///
/// Cloneable; every clone sees the same cancellation. A dropped
/// [`CancelHandle`] never counts as cancellation.
#[derive(Clone, Debug)]
pub struct CancelSignal {
    rx: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

impl CancelSignal {
    /// A signal that never fires
    pub fn never() -> Self {
        Self {
            rx: None,
            deadline: None,
        }
    }

    /// A signal that fires once `timeout` has elapsed
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            rx: None,
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// Check if cancellation was requested
    pub fn is_cancelled(&self) -> bool {
        let triggered = self.rx.as_ref().is_some_and(|rx| *rx.borrow());
        let expired = self.deadline.is_some_and(|d| Instant::now() >= d);
        triggered || expired
    }

    /// Wait until cancellation is requested
    ///
    /// Pends forever when the signal can no longer fire.
    pub async fn cancelled(&mut self) {
        let deadline = self.deadline;
        let expired = async move {
            match deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            _ = self.triggered() => {}
            _ = expired => {}
        }
    }

    async fn triggered(&mut self) {
        let Some(rx) = self.rx.as_mut() else {
            return std::future::pending().await;
        };

        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                // Handle dropped without cancelling
                return std::future::pending().await;
            }
        }
    }
}

/// Cancellation trigger
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Request cancellation of every execution observing this signal
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }
}

/// Create a cancellation channel
pub fn cancel_channel() -> (CancelHandle, CancelSignal) {
    let (tx, rx) = watch::channel(false);
    (
        CancelHandle { tx },
        CancelSignal {
            rx: Some(rx),
            deadline: None,
        },
    )
}
