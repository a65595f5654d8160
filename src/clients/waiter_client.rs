use crate::framework::{Admission, AdmissionSender};
use crate::model::Order;
use std::time::Duration;
use tracing::{debug, instrument};

/// Customer-facing handle to the waiter.
///
/// Wraps the generic [`AdmissionSender`] so customers speak in orders rather
/// than queue items.
#[derive(Debug, Clone)]
pub struct WaiterClient {
    inner: AdmissionSender<Order>,
}

impl WaiterClient {
    pub fn new(inner: AdmissionSender<Order>) -> Self {
        Self { inner }
    }

    /// Hands `order` to the waiter, waiting at most `patience` for room.
    #[instrument(skip(self, order), fields(order = %order.id, customer = %order.customer))]
    pub async fn place_order(&self, order: Order, patience: Duration) -> Admission<Order> {
        debug!(?patience, queued = self.inner.pending(), "Sending order to waiter");
        self.inner.try_admit(order, patience).await
    }

    /// Orders the waiter is holding for the cooks.
    pub fn pending(&self) -> usize {
        self.inner.pending()
    }
}
