//! # Shutdown Signal
//!
//! Broadcast, one-shot "closing time" flag observed by every actor.
//!
//! The signal wraps a [`CancellationToken`], which already gives us the hard
//! parts: any number of tasks can wait on [`ShutdownSignal::closed`], all of them
//! are released together when the token is cancelled, and once cancelled it
//! stays cancelled (new waits complete immediately).
//!
//! On top of that we track whether the transition has happened so that
//! [`ShutdownSignal::close`] can tell the caller if *it* was the one that closed
//! the restaurant. The deadline timer and an external caller may race to close;
//! exactly one of them wins.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default)]
pub struct ShutdownSignal {
    token: CancellationToken,
    closed: Arc<AtomicBool>,
}

impl ShutdownSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closes the signal. Returns `true` only for the call that performed the
    /// open -> closed transition; every later call is a no-op returning `false`.
    pub fn close(&self) -> bool {
        if self.closed.swap(true, Ordering::SeqCst) {
            return false;
        }
        self.token.cancel();
        true
    }

    /// Non-blocking check.
    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Completes once the signal is closed (immediately if it already is).
    /// Cancel-safe, so it can sit in any `tokio::select!` arm.
    pub async fn closed(&self) {
        self.token.cancelled().await
    }
}
