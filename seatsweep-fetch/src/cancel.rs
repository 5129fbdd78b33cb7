//! Cooperative cancellation for in-flight fetch jobs.

use std::sync::Arc;
use tokio::sync::watch;

/// Handle for aborting a fetch job, including during a backoff sleep.
///
/// Cloneable; all clones observe the same signal. The fetch loop races its
/// backoff sleeps against [`cancelled`](CancelToken::cancelled) and checks
/// [`is_cancelled`](CancelToken::is_cancelled) before each network attempt,
/// so cancellation takes effect within a bounded delay and issues no further
/// requests.
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
    rx: watch::Receiver<bool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(false);
        Self {
            tx: Arc::new(tx),
            rx,
        }
    }

    /// Signals cancellation to all clones.
    pub fn cancel(&self) {
        let _ = self.tx.send(true);
    }

    /// Returns true if cancellation has been signalled.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves once cancellation is signalled.
    pub async fn cancelled(&self) {
        let mut rx = self.rx.clone();
        while !*rx.borrow_and_update() {
            if rx.changed().await.is_err() {
                // Sender gone without signalling; cancellation can no longer
                // occur, so park forever rather than resolve spuriously.
                std::future::pending::<()>().await;
            }
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
