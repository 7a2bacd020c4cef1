//! Cancellation and deadline token threaded through every alert call.

use super::error::TransportError;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

#[derive(Debug, Clone, Default)]
pub struct Context {
    deadline: Option<Instant>,
    signals: Vec<watch::Receiver<bool>>,
}

/// Cancels the context returned alongside it by [`Context::with_cancel`].
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

impl Context {
    pub fn background() -> Self {
        Self::default()
    }

    /// A timeout that overflows `Instant` adds no deadline.
    pub fn with_timeout(&self, timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => self.with_deadline(deadline),
            None => self.clone(),
        }
    }

    /// Child context whose deadline is the earlier of this one's and `deadline`.
    pub fn with_deadline(&self, deadline: Instant) -> Self {
        let mut child = self.clone();
        child.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        child
    }

    pub fn with_cancel(&self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        let mut child = self.clone();
        child.signals.push(rx);
        (child, CancelHandle { tx })
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.signals.iter().any(|rx| *rx.borrow())
    }

    /// Why the context is done, or `None` while it is still live.
    pub fn err(&self) -> Option<TransportError> {
        if self.is_cancelled() {
            return Some(TransportError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(TransportError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Resolves once any cancel handle in the chain fires. Never resolves for
    /// a context without one.
    pub async fn cancelled(&self) {
        if self.signals.is_empty() {
            return std::future::pending().await;
        }

        let waits = self.signals.iter().cloned().map(|mut rx| {
            Box::pin(async move {
                loop {
                    if *rx.borrow_and_update() {
                        return;
                    }
                    // Handle dropped without cancelling
                    if rx.changed().await.is_err() {
                        std::future::pending::<()>().await;
                    }
                }
            })
        });

        futures::future::select_all(waits).await;
    }
}
