//! Cooperative cancellation signal
//!
//! A `watch`-channel based signal selected against the waited future.
//! Cancellation only affects waiting; work already started runs to
//! completion.

use tokio::sync::watch;

/// Fires the paired [`CancelSignal`]
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Fire the signal; idempotent
    pub fn cancel(&self) {
        // Receivers may already be gone; that just means nobody is waiting.
        let _ = self.tx.send(true);
    }
}

/// Observer side of a cancellation signal
///
/// Cloning yields another observer of the same signal.
#[derive(Debug, Clone)]
pub struct CancelSignal {
    rx: Option<watch::Receiver<bool>>,
}

impl CancelSignal {
    /// Create a connected handle/signal pair
    pub fn channel() -> (CancelHandle, CancelSignal) {
        let (tx, rx) = watch::channel(false);
        (CancelHandle { tx }, CancelSignal { rx: Some(rx) })
    }

    /// A signal that never fires, for callers without cancellation
    pub fn never() -> Self {
        Self { rx: None }
    }

    /// Whether the signal has already fired
    pub fn is_cancelled(&self) -> bool {
        self.rx.as_ref().is_some_and(|rx| *rx.borrow())
    }

    /// Suspend until the signal fires
    ///
    /// Pends forever for [`CancelSignal::never`] and when the handle was
    /// dropped without firing.
    pub async fn cancelled(&mut self) {
        match &mut self.rx {
            Some(rx) => {
                if rx.wait_for(|cancelled| *cancelled).await.is_err() {
                    std::future::pending::<()>().await;
                }
            }
            None => std::future::pending().await,
        }
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::never()
    }
}
