//! Per-call cancellation and deadline handling.
//!
//! Every request runs under a [`RequestContext`]. A context may carry a
//! deadline, a cancellation signal, or both. When either fires while a call
//! is in flight the call is aborted and reports [`KisError::Timeout`] or
//! [`KisError::Cancelled`].
//!
//! ```rust
//! use std::time::Duration;
//! use kis_api_client::context::RequestContext;
//!
//! let (ctx, cancel) = RequestContext::background()
//!     .with_timeout(Duration::from_secs(5))
//!     .with_cancel();
//! cancel.cancel();
//! assert!(ctx.err().is_some());
//! ```

use std::future::pending;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{Instant, sleep_until};

use crate::error::KisError;

/// Cancellation signal and optional deadline for a single call.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancel: Vec<watch::Receiver<bool>>,
}

impl RequestContext {
    /// A context that never fires.
    pub fn background() -> Self {
        Self::default()
    }

    /// Set the deadline relative to now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// Set an absolute deadline. An earlier existing deadline is kept.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(existing) if existing < deadline => existing,
            _ => deadline,
        });
        self
    }

    /// Attach a cancellation signal, returning the handle that triggers it.
    ///
    /// Signals already on the context are kept, so the derived context is
    /// cancelled by its own handle or by any handle of the context it came from.
    pub fn with_cancel(mut self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        self.cancel.push(rx);
        (
            self,
            CancelHandle {
                sender: Arc::new(tx),
            },
        )
    }

    /// The deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// The reason this context is done, or `None` if it is still live.
    ///
    /// Cancellation is reported ahead of an expired deadline.
    pub fn err(&self) -> Option<KisError> {
        if self.cancel.iter().any(|rx| *rx.borrow()) {
            return Some(KisError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(KisError::Timeout),
            _ => None,
        }
    }

    /// Resolves once the context is cancelled or its deadline passes.
    pub async fn done(&self) -> KisError {
        if let Some(err) = self.err() {
            return err;
        }

        let cancelled = async {
            if self.cancel.is_empty() {
                pending::<()>().await;
            }
            let waits = self.cancel.iter().map(|rx| {
                let mut rx = rx.clone();
                Box::pin(async move {
                    let closed = rx.wait_for(|cancelled| *cancelled).await.map(|_| ()).is_err();
                    if closed {
                        // Handle dropped without cancelling.
                        pending::<()>().await;
                    }
                })
            });
            futures_util::future::select_all(waits).await;
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => sleep_until(deadline).await,
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => KisError::Cancelled,
            _ = expired => KisError::Timeout,
        }
    }

    /// Run `fut` under this context.
    pub(crate) async fn run<F, T>(&self, fut: F) -> Result<T, KisError>
    where
        F: Future<Output = T>,
    {
        tokio::select! {
            biased;
            err = self.done() => Err(err),
            out = fut => Ok(out),
        }
    }
}

/// Triggers cancellation of the [`RequestContext`] it was created with.
///
/// Clones share the same signal.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    sender: Arc<watch::Sender<bool>>,
}

impl CancelHandle {
    /// Cancel the context. Idempotent.
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    /// Whether [`CancelHandle::cancel`] has been called.
    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }
}
