/// Represents a customer order travelling through the kitchen.
///
/// An order carries its own reply slot: a one-shot channel whose sender rides
/// along with the order and whose receiver stays with the customer who placed
/// it. The cook that prepares the order consumes the sender when replying, so
/// the slot can be written at most once by construction.
///
/// The cook's name is never stamped on the `Order` itself; it only exists on the
/// [`PreparedOrder`] sent back through the slot.
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use tokio::sync::oneshot;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub u64);

impl From<u64> for OrderId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "order_{}", self.0)
    }
}

/// Sender half of an order's reply slot.
pub type ReplySlot = oneshot::Sender<PreparedOrder>;

/// Receiver half of an order's reply slot, held by the customer.
pub type ReplyReceiver = oneshot::Receiver<PreparedOrder>;

#[derive(Debug)]
pub struct Order {
    pub id: OrderId,
    pub customer: String,
    reply_to: ReplySlot,
}

/// The cooked meal handed back to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedOrder {
    pub id: OrderId,
    pub customer: String,
    pub prepared_by: String,
}

impl Order {
    /// Creates a new Order and the receiver its customer waits on.
    ///
    /// # Arguments
    /// * `id` - Unique identifier (from the restaurant's id generator)
    /// * `customer` - Name of the customer placing the order
    pub fn new(id: OrderId, customer: impl Into<String>) -> (Self, ReplyReceiver) {
        let (reply_to, reply) = oneshot::channel();
        let order = Self {
            id,
            customer: customer.into(),
            reply_to,
        };
        (order, reply)
    }

    /// Stamps the cook's name and splits the order into the meal and the slot
    /// it must be delivered through.
    pub fn prepare(self, cook: impl Into<String>) -> (PreparedOrder, ReplySlot) {
        let meal = PreparedOrder {
            id: self.id,
            customer: self.customer,
            prepared_by: cook.into(),
        };
        (meal, self.reply_to)
    }
}
