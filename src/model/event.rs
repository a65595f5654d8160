//! Trace events emitted at every state transition.
//!
//! Actors never call `tracing` directly for state changes. They build a
//! [`KitchenEvent`] and hand it to an [`EventSink`](crate::lifecycle::EventSink),
//! which decides what to do with it. [`KitchenEvent::log`] is the canonical
//! structured rendering used by the stock sinks.

use crate::model::order::OrderId;
use crate::model::report::{LeaveStage, LostReason, ShutdownReason};
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum KitchenEvent {
    Opened {
        customers: usize,
        cooks: usize,
        capacity: usize,
    },
    CookStarted {
        cook: String,
    },
    CustomerArrived {
        customer: String,
    },
    OrderPlaced {
        customer: String,
        order: OrderId,
    },
    OrderAdmitted {
        customer: String,
        order: OrderId,
        queued: usize,
    },
    /// The waiter did not take the order within the customer's patience.
    OrderAbandoned {
        customer: String,
        order: OrderId,
    },
    CookingStarted {
        cook: String,
        order: OrderId,
        customer: String,
    },
    OrderDelivered {
        cook: String,
        order: OrderId,
        customer: String,
    },
    /// A cooked order that never reached its customer.
    DeliveryAbandoned {
        cook: String,
        order: OrderId,
        customer: String,
        reason: LostReason,
    },
    MealEaten {
        customer: String,
        order: OrderId,
        prepared_by: String,
        meals_eaten: usize,
    },
    LeftEarly {
        customer: String,
        stage: LeaveStage,
        meals_eaten: usize,
    },
    WentHome {
        customer: String,
        meals_eaten: usize,
    },
    CookStopped {
        cook: String,
        orders_cooked: usize,
    },
    Closing {
        reason: ShutdownReason,
    },
    Closed,
}

impl KitchenEvent {
    /// Name of the actor the event belongs to, if any.
    pub fn actor(&self) -> Option<&str> {
        match self {
            KitchenEvent::CookStarted { cook }
            | KitchenEvent::CookingStarted { cook, .. }
            | KitchenEvent::OrderDelivered { cook, .. }
            | KitchenEvent::DeliveryAbandoned { cook, .. }
            | KitchenEvent::CookStopped { cook, .. } => Some(cook.as_str()),
            KitchenEvent::CustomerArrived { customer }
            | KitchenEvent::OrderPlaced { customer, .. }
            | KitchenEvent::OrderAdmitted { customer, .. }
            | KitchenEvent::OrderAbandoned { customer, .. }
            | KitchenEvent::MealEaten { customer, .. }
            | KitchenEvent::LeftEarly { customer, .. }
            | KitchenEvent::WentHome { customer, .. } => Some(customer.as_str()),
            KitchenEvent::Opened { .. } | KitchenEvent::Closing { .. } | KitchenEvent::Closed => {
                None
            }
        }
    }

    /// Emits the event as a structured `tracing` line.
    pub fn log(&self) {
        match self {
            KitchenEvent::Opened {
                customers,
                cooks,
                capacity,
            } => info!(customers, cooks, capacity, "Restaurant open"),
            KitchenEvent::CookStarted { cook } => info!(%cook, "Starting work"),
            KitchenEvent::CustomerArrived { customer } => info!(%customer, "Arrived"),
            KitchenEvent::OrderPlaced { customer, order } => {
                info!(%customer, %order, "Placed order")
            }
            KitchenEvent::OrderAdmitted {
                customer,
                order,
                queued,
            } => info!(%customer, %order, queued, "Waiter took order"),
            KitchenEvent::OrderAbandoned { customer, order } => {
                warn!(%customer, %order, "Waiting too long, abandoning order")
            }
            KitchenEvent::CookingStarted {
                cook,
                order,
                customer,
            } => info!(%cook, %order, %customer, "Cooking"),
            KitchenEvent::OrderDelivered {
                cook,
                order,
                customer,
            } => info!(%cook, %order, %customer, "Delivered"),
            KitchenEvent::DeliveryAbandoned {
                cook,
                order,
                customer,
                reason,
            } => warn!(%cook, %order, %customer, ?reason, "Delivery abandoned"),
            KitchenEvent::MealEaten {
                customer,
                order,
                prepared_by,
                meals_eaten,
            } => info!(%customer, %order, %prepared_by, meals_eaten, "Ate meal"),
            KitchenEvent::LeftEarly {
                customer,
                stage,
                meals_eaten,
            } => warn!(%customer, ?stage, meals_eaten, "Leaving early, restaurant closing"),
            KitchenEvent::WentHome {
                customer,
                meals_eaten,
            } => info!(%customer, meals_eaten, "Going home"),
            KitchenEvent::CookStopped {
                cook,
                orders_cooked,
            } => info!(%cook, orders_cooked, "Shutting down"),
            KitchenEvent::Closing { reason } => info!(?reason, "Restaurant closing"),
            KitchenEvent::Closed => info!("Restaurant has closed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_tagged_record() {
        let abandoned = KitchenEvent::DeliveryAbandoned {
            cook: "Remy".into(),
            order: OrderId(9),
            customer: "Bai".into(),
            reason: LostReason::ClosingTime,
        };
        assert_eq!(
            serde_json::to_value(&abandoned).unwrap(),
            serde_json::json!({
                "event": "delivery_abandoned",
                "cook": "Remy",
                "order": 9,
                "customer": "Bai",
                "reason": "ClosingTime",
            })
        );
        assert_eq!(
            serde_json::to_value(&KitchenEvent::Closed).unwrap(),
            serde_json::json!({ "event": "closed" })
        );
    }

    #[test]
    fn test_actor_names() {
        let cooking = KitchenEvent::CookingStarted {
            cook: "Remy".into(),
            order: OrderId(1),
            customer: "Ani".into(),
        };
        assert_eq!(cooking.actor(), Some("Remy"));

        let abandoned = KitchenEvent::OrderAbandoned {
            customer: "Ani".into(),
            order: OrderId(1),
        };
        assert_eq!(abandoned.actor(), Some("Ani"));
        assert_eq!(KitchenEvent::Closed.actor(), None);
    }
}
