//! # Observability & Tracing
//!
//! Two layers work together here:
//!
//! 1. [`setup_tracing`] initializes the `tracing` subscriber for the process.
//! 2. [`EventSink`] receives a [`KitchenEvent`] at every actor state transition.
//!    The stock sinks render each event as one structured log line via
//!    [`KitchenEvent::log`].
//!
//! ## Configuration
//!
//! The subscriber uses a compact format that hides the crate/module prefix
//! (`with_target(false)`). Verbosity comes from `RUST_LOG`:
//!
//! ```bash
//! # One line per state transition
//! RUST_LOG=info cargo run
//!
//! # Plus queue hand-offs and actor state changes
//! RUST_LOG=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! With `RUST_LOG=info` a short run looks like:
//!
//! ```text
//! INFO Starting work cook=Remy
//! INFO Arrived customer=Ani
//! INFO Placed order customer=Ani order=order_1
//! INFO Waiter took order customer=Ani order=order_1 queued=1
//! INFO Cooking cook=Remy order=order_1 customer=Ani
//! INFO Delivered cook=Remy order=order_1 customer=Ani
//! INFO Ate meal customer=Ani order=order_1 prepared_by=Remy meals_eaten=1
//! WARN Waiting too long, abandoning order customer=Bai order=order_4
//! INFO Restaurant closing reason=Deadline
//! WARN Leaving early, restaurant closing customer=Bai stage=WaitingForMeal meals_eaten=2
//! WARN Delivery abandoned cook=Colette order=order_9 customer=Bai reason=ClosingTime
//! INFO Restaurant has closed
//! ```
//!
//! ## Custom Sinks
//!
//! Implement [`EventSink`] to ship events elsewhere and install it with
//! [`Restaurant::with_sink`](crate::lifecycle::Restaurant::with_sink). Tests use
//! [`RecordingSink`] to assert on the exact sequence of transitions.

use crate::model::KitchenEvent;
use std::sync::{Arc, Mutex};

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false) // Don't show module paths - actor names carry the context
        .compact()
        .init();
}

/// Append-only consumer of trace events.
///
/// Called from many actor tasks at once, so implementations must be cheap and
/// must not block on I/O for long.
pub trait EventSink: Send + Sync {
    fn record(&self, event: KitchenEvent);
}

/// Default sink: one structured `tracing` line per event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn record(&self, event: KitchenEvent) {
        event.log();
    }
}

/// Keeps every event in memory (and still logs it).
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<KitchenEvent>>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything recorded so far, in arrival order.
    pub fn events(&self) -> Vec<KitchenEvent> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of recorded events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&KitchenEvent) -> bool) -> usize {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .filter(|event| predicate(event))
            .count()
    }
}

impl EventSink for RecordingSink {
    fn record(&self, event: KitchenEvent) {
        event.log();
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OrderId;

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        let shared: Arc<dyn EventSink> = Arc::new(sink.clone());

        shared.record(KitchenEvent::CookStarted { cook: "Remy".into() });
        shared.record(KitchenEvent::OrderPlaced {
            customer: "Ani".into(),
            order: OrderId(1),
        });
        shared.record(KitchenEvent::Closed);

        let events = sink.events();
        assert_eq!(events.len(), 3);
        assert_eq!(events[0], KitchenEvent::CookStarted { cook: "Remy".into() });
        assert_eq!(events[2], KitchenEvent::Closed);
        assert_eq!(
            sink.count(|e| matches!(e, KitchenEvent::OrderPlaced { .. })),
            1
        );
    }
}
