use crate::framework::AdmissionReceiver;
use crate::model::Order;
use tracing::{debug, instrument};

/// Cook-facing handle to the pass, the counter where the waiter leaves orders.
#[derive(Debug, Clone)]
pub struct PassClient {
    inner: AdmissionReceiver<Order>,
}

impl PassClient {
    pub fn new(inner: AdmissionReceiver<Order>) -> Self {
        Self { inner }
    }

    /// Next order in the order it was admitted, or `None` once the
    /// restaurant is closing.
    #[instrument(skip(self))]
    pub async fn next_order(&self) -> Option<Order> {
        let order = self.inner.take().await;
        debug!(order = ?order.as_ref().map(|o| o.id), "Took from pass");
        order
    }
}
