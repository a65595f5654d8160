//! # Admission Queue
//!
//! The bounded FIFO that sits between producers and workers. It is the only
//! point where the two sides meet, and it is the only place that knows about
//! all three ways a wait can end: a slot frees up, the caller's patience runs
//! out, or the shutdown signal fires.
//!
//! ## Shape
//!
//! Like the recipe's actor/client split, [`admission_queue`] hands back two
//! halves:
//!
//! - [`AdmissionSender`] for producers: [`try_admit`](AdmissionSender::try_admit)
//! - [`AdmissionReceiver`] for workers: [`take`](AdmissionReceiver::take)
//!
//! Both halves are cheap to clone. The underlying storage is a bounded
//! `tokio::sync::mpsc` channel. Workers share its single receiver behind a
//! `tokio::sync::Mutex`; the mutex is fair, so waiting workers are served in
//! arrival order and items leave the queue in the order they were admitted.
//!
//! ## Admission
//!
//! Admission reserves a slot *before* handing over the item
//! ([`mpsc::Sender::reserve`]). Until the permit is granted the caller still owns
//! the item, which is why [`Admission::TimedOut`] and [`Admission::Cancelled`]
//! give it back. Nothing is ever dropped by the queue on a failed attempt.

use crate::framework::error::FrameworkError;
use crate::framework::shutdown::ShutdownSignal;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};

/// Outcome of a single admission attempt.
#[derive(Debug, PartialEq, Eq)]
pub enum Admission<T> {
    /// The item is in the queue.
    Admitted,
    /// No slot became free within the caller's patience. The item is returned.
    TimedOut(T),
    /// Shutdown fired first (or had already fired). The item is returned.
    Cancelled(T),
}

/// Creates a queue holding at most `capacity` items, wired to `shutdown`.
pub fn admission_queue<T: Send>(
    capacity: usize,
    shutdown: ShutdownSignal,
) -> Result<(AdmissionSender<T>, AdmissionReceiver<T>), FrameworkError> {
    if capacity == 0 {
        return Err(FrameworkError::ZeroCapacity);
    }
    let (sender, receiver) = mpsc::channel(capacity);
    let sender = AdmissionSender {
        sender,
        shutdown: shutdown.clone(),
    };
    let receiver = AdmissionReceiver {
        receiver: Arc::new(Mutex::new(receiver)),
        shutdown,
    };
    Ok((sender, receiver))
}

/// Producer half of the queue.
#[derive(Debug)]
pub struct AdmissionSender<T> {
    sender: mpsc::Sender<T>,
    shutdown: ShutdownSignal,
}

// Manual impl: `T` itself does not need to be `Clone`.
impl<T> Clone for AdmissionSender<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<T: Send> AdmissionSender<T> {
    /// Waits up to `patience` for a free slot.
    ///
    /// Shutdown wins every tie: if the signal is already closed the attempt is
    /// `Cancelled` even when a slot is free.
    pub async fn try_admit(&self, item: T, patience: Duration) -> Admission<T> {
        if self.shutdown.is_closed() {
            return Admission::Cancelled(item);
        }

        tokio::select! {
            biased;
            _ = self.shutdown.closed() => Admission::Cancelled(item),
            reserved = tokio::time::timeout(patience, self.sender.reserve()) => match reserved {
                Ok(Ok(permit)) => {
                    permit.send(item);
                    Admission::Admitted
                }
                // Every receiver is gone; nobody will ever serve this item.
                Ok(Err(_)) => Admission::Cancelled(item),
                Err(_) => Admission::TimedOut(item),
            },
        }
    }

    /// Number of admitted items still waiting for a worker.
    pub fn pending(&self) -> usize {
        self.sender.max_capacity() - self.sender.capacity()
    }

    pub fn capacity(&self) -> usize {
        self.sender.max_capacity()
    }
}

/// Worker half of the queue.
#[derive(Debug)]
pub struct AdmissionReceiver<T> {
    receiver: Arc<Mutex<mpsc::Receiver<T>>>,
    shutdown: ShutdownSignal,
}

impl<T> Clone for AdmissionReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            receiver: self.receiver.clone(),
            shutdown: self.shutdown.clone(),
        }
    }
}

impl<T: Send> AdmissionReceiver<T> {
    /// Waits for the next item in FIFO order.
    ///
    /// Returns `None` once shutdown has fired (preferred over a ready item, so a
    /// worker never picks up new work after closing time) or when every sender
    /// has been dropped.
    pub async fn take(&self) -> Option<T> {
        tokio::select! {
            biased;
            _ = self.shutdown.closed() => None,
            item = async { self.receiver.lock().await.recv().await } => item,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(capacity: usize) -> (AdmissionSender<u64>, AdmissionReceiver<u64>, ShutdownSignal) {
        let shutdown = ShutdownSignal::new();
        let (tx, rx) = admission_queue(capacity, shutdown.clone()).unwrap();
        (tx, rx, shutdown)
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let result = admission_queue::<u64>(0, ShutdownSignal::new());
        assert!(matches!(result, Err(FrameworkError::ZeroCapacity)));
    }

    #[tokio::test]
    async fn test_admitted_items_leave_in_fifo_order() {
        let (tx, rx, _shutdown) = queue(3);
        for id in 1..=3 {
            assert_eq!(tx.try_admit(id, Duration::ZERO).await, Admission::Admitted);
        }
        assert_eq!(tx.pending(), 3);

        assert_eq!(rx.take().await, Some(1));
        assert_eq!(rx.take().await, Some(2));
        assert_eq!(rx.take().await, Some(3));
        assert_eq!(tx.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_queue_times_out_and_returns_item() {
        let (tx, _rx, _shutdown) = queue(1);
        assert_eq!(tx.try_admit(1, Duration::from_secs(1)).await, Admission::Admitted);

        let started = tokio::time::Instant::now();
        let outcome = tx.try_admit(2, Duration::from_secs(7)).await;
        assert_eq!(outcome, Admission::TimedOut(2));
        assert!(started.elapsed() >= Duration::from_secs(7));
    }

    #[tokio::test(start_paused = true)]
    async fn test_waiting_admission_succeeds_when_slot_frees() {
        let (tx, rx, _shutdown) = queue(1);
        assert_eq!(tx.try_admit(1, Duration::ZERO).await, Admission::Admitted);

        let waiter = {
            let tx = tx.clone();
            tokio::spawn(async move { tx.try_admit(2, Duration::from_secs(7)).await })
        };

        tokio::time::sleep(Duration::from_secs(3)).await;
        assert_eq!(rx.take().await, Some(1));
        assert_eq!(waiter.await.unwrap(), Admission::Admitted);
        assert_eq!(rx.take().await, Some(2));
    }

    #[tokio::test]
    async fn test_shutdown_cancels_pending_admission() {
        let (tx, _rx, shutdown) = queue(1);
        assert_eq!(tx.try_admit(1, Duration::ZERO).await, Admission::Admitted);

        let waiter = {
            let tx = tx.clone();
            tokio::spawn(async move { tx.try_admit(2, Duration::from_secs(3600)).await })
        };
        tokio::task::yield_now().await;

        shutdown.close();
        assert_eq!(waiter.await.unwrap(), Admission::Cancelled(2));
    }

    #[tokio::test]
    async fn test_admission_after_shutdown_is_cancelled_even_with_room() {
        let (tx, _rx, shutdown) = queue(3);
        shutdown.close();
        assert_eq!(tx.try_admit(7, Duration::from_secs(1)).await, Admission::Cancelled(7));
        assert_eq!(tx.pending(), 0);
    }

    #[tokio::test]
    async fn test_take_prefers_shutdown_over_ready_item() {
        let (tx, rx, shutdown) = queue(3);
        assert_eq!(tx.try_admit(1, Duration::ZERO).await, Admission::Admitted);

        shutdown.close();
        assert_eq!(rx.take().await, None);
    }

    #[tokio::test]
    async fn test_blocked_take_is_released_by_shutdown() {
        let (_tx, rx, shutdown) = queue(3);
        let worker = tokio::spawn(async move { rx.take().await });
        tokio::task::yield_now().await;

        shutdown.close();
        assert_eq!(worker.await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_competing_workers_never_duplicate_items() {
        let (tx, rx, shutdown) = queue(2);
        let mut workers = vec![];
        for _ in 0..3 {
            let rx = rx.clone();
            workers.push(tokio::spawn(async move {
                let mut got = vec![];
                while let Some(item) = rx.take().await {
                    got.push(item);
                }
                got
            }));
        }

        for id in 1..=50 {
            assert_eq!(tx.try_admit(id, Duration::from_secs(5)).await, Admission::Admitted);
        }
        // Let the workers drain before closing
        while tx.pending() > 0 {
            tokio::task::yield_now().await;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
        shutdown.close();

        let mut all = vec![];
        for worker in workers {
            let got = worker.await.unwrap();
            // Each worker sees its own items in admission order
            assert!(got.windows(2).all(|w| w[0] < w[1]));
            all.extend(got);
        }
        all.sort_unstable();
        assert_eq!(all, (1..=50).collect::<Vec<_>>());
    }
}
