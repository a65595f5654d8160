//! The cook: takes orders from the pass, cooks them, and delivers the meal
//! straight into each order's reply slot.
//!
//! A cook never starts a new order once the restaurant is closing, but it
//! always finishes the one in hand. Delivery then races the shutdown signal:
//! if closing time arrived while cooking, the meal is abandoned.

pub mod state;

pub use state::CookState;

use crate::clients::PassClient;
use crate::framework::{Labor, ShutdownSignal};
use crate::lifecycle::EventSink;
use crate::model::{CookReport, KitchenEvent, LostReason, Order, OrderId};
use std::sync::Arc;
use tracing::debug;

/// Dependencies injected when the cook starts working.
#[derive(Clone)]
pub struct CookContext {
    pub pass: PassClient,
    pub shutdown: ShutdownSignal,
    pub sink: Arc<dyn EventSink>,
    pub cooking: Arc<dyn Labor>,
}

pub struct Cook {
    name: String,
    state: CookState,
    orders_cooked: usize,
    orders_delivered: usize,
    lost_deliveries: usize,
}

impl Cook {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: CookState::Idle,
            orders_cooked: 0,
            orders_delivered: 0,
            lost_deliveries: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Works the pass until the restaurant closes.
    pub async fn run(mut self, ctx: CookContext) -> CookReport {
        ctx.sink.record(KitchenEvent::CookStarted {
            cook: self.name.clone(),
        });

        while let Some(order) = ctx.pass.next_order().await {
            self.transition(CookState::Working);
            let keep_working = self.handle(order, &ctx).await;
            if !keep_working {
                break;
            }
            self.transition(CookState::Idle);
        }

        self.transition(CookState::Stopped);
        ctx.sink.record(KitchenEvent::CookStopped {
            cook: self.name.clone(),
            orders_cooked: self.orders_cooked,
        });

        CookReport {
            name: self.name,
            orders_cooked: self.orders_cooked,
            orders_delivered: self.orders_delivered,
            lost_deliveries: self.lost_deliveries,
        }
    }

    /// Cooks and delivers one order. Returns `false` when the cook should stop.
    async fn handle(&mut self, order: Order, ctx: &CookContext) -> bool {
        let id = order.id;
        let customer = order.customer.clone();
        ctx.sink.record(KitchenEvent::CookingStarted {
            cook: self.name.clone(),
            order: id,
            customer: customer.clone(),
        });

        ctx.cooking.perform().await;
        self.orders_cooked += 1;
        let (meal, reply_to) = order.prepare(self.name.clone());

        if ctx.shutdown.is_closed() {
            self.lose(id, customer, LostReason::ClosingTime, ctx);
            return false;
        }

        // Closing time can still land between the check and the send. The
        // leaving customer closes its slot and checks it once more, so this
        // send is either eaten or refused, never dropped silently.
        match reply_to.send(meal) {
            Ok(()) => {
                self.orders_delivered += 1;
                ctx.sink.record(KitchenEvent::OrderDelivered {
                    cook: self.name.clone(),
                    order: id,
                    customer,
                });
            }
            Err(_) => self.lose(id, customer, LostReason::CustomerGone, ctx),
        }
        true
    }

    fn lose(&mut self, order: OrderId, customer: String, reason: LostReason, ctx: &CookContext) {
        self.lost_deliveries += 1;
        ctx.sink.record(KitchenEvent::DeliveryAbandoned {
            cook: self.name.clone(),
            order,
            customer,
            reason,
        });
    }

    fn transition(&mut self, next: CookState) {
        debug!(cook = %self.name, from = %self.state, to = %next, "State change");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::{admission_queue, Admission, AdmissionSender, Effort};
    use crate::lifecycle::RecordingSink;
    use async_trait::async_trait;
    use std::time::Duration;

    /// Closes the restaurant while the order is on the stove.
    struct CloseWhileCooking(ShutdownSignal);

    #[async_trait]
    impl Labor for CloseWhileCooking {
        async fn perform(&self) {
            self.0.close();
        }
    }

    fn setup(
        cooking: Arc<dyn Labor>,
        shutdown: ShutdownSignal,
    ) -> (AdmissionSender<Order>, CookContext, RecordingSink) {
        let (tx, rx) = admission_queue(3, shutdown.clone()).unwrap();
        let sink = RecordingSink::new();
        let ctx = CookContext {
            pass: PassClient::new(rx),
            shutdown,
            sink: Arc::new(sink.clone()),
            cooking,
        };
        (tx, ctx, sink)
    }

    #[tokio::test]
    async fn test_cook_delivers_then_stops_on_shutdown() {
        let shutdown = ShutdownSignal::new();
        let (tx, ctx, sink) = setup(Arc::new(Effort::Instant), shutdown.clone());

        let (order, reply) = Order::new(OrderId(1), "Ani");
        assert!(matches!(
            tx.try_admit(order, Duration::from_secs(1)).await,
            Admission::Admitted
        ));

        let handle = tokio::spawn(Cook::new("Remy").run(ctx));

        let meal = reply.await.unwrap();
        assert_eq!(meal.prepared_by, "Remy");

        shutdown.close();
        let report = handle.await.unwrap();
        assert_eq!(report.orders_cooked, 1);
        assert_eq!(report.orders_delivered, 1);
        assert_eq!(report.lost_deliveries, 0);

        let events = sink.events();
        assert_eq!(events.first(), Some(&KitchenEvent::CookStarted { cook: "Remy".into() }));
        assert_eq!(
            events.last(),
            Some(&KitchenEvent::CookStopped {
                cook: "Remy".into(),
                orders_cooked: 1
            })
        );
    }

    #[tokio::test]
    async fn test_cook_keeps_working_when_customer_is_gone() {
        let shutdown = ShutdownSignal::new();
        let (tx, ctx, sink) = setup(Arc::new(Effort::Instant), shutdown.clone());

        let (gone, reply) = Order::new(OrderId(1), "Ani");
        drop(reply);
        let (waiting, reply) = Order::new(OrderId(2), "Bai");
        tx.try_admit(gone, Duration::from_secs(1)).await;
        tx.try_admit(waiting, Duration::from_secs(1)).await;

        let handle = tokio::spawn(Cook::new("Colette").run(ctx));
        assert_eq!(reply.await.unwrap().id, OrderId(2));

        shutdown.close();
        let report = handle.await.unwrap();
        assert_eq!(report.orders_cooked, 2);
        assert_eq!(report.orders_delivered, 1);
        assert_eq!(report.lost_deliveries, 1);
        assert!(sink.events().contains(&KitchenEvent::DeliveryAbandoned {
            cook: "Colette".into(),
            order: OrderId(1),
            customer: "Ani".into(),
            reason: LostReason::CustomerGone,
        }));
    }

    #[tokio::test]
    async fn test_meal_finished_after_closing_is_abandoned() {
        let shutdown = ShutdownSignal::new();
        let (tx, ctx, sink) = setup(
            Arc::new(CloseWhileCooking(shutdown.clone())),
            shutdown.clone(),
        );

        let (order, reply) = Order::new(OrderId(7), "Cat");
        tx.try_admit(order, Duration::from_secs(1)).await;

        let report = Cook::new("Linguini").run(ctx).await;
        assert_eq!(report.orders_cooked, 1);
        assert_eq!(report.orders_delivered, 0);
        assert_eq!(report.lost_deliveries, 1);
        // The slot was dropped with the meal, so the customer sees it too
        assert!(reply.await.is_err());
        assert_eq!(
            sink.count(|e| matches!(
                e,
                KitchenEvent::DeliveryAbandoned {
                    reason: LostReason::ClosingTime,
                    ..
                }
            )),
            1
        );
    }

    #[tokio::test]
    async fn test_cook_never_starts_after_closing() {
        let shutdown = ShutdownSignal::new();
        let (tx, ctx, sink) = setup(Arc::new(Effort::Instant), shutdown.clone());

        let (order, _reply) = Order::new(OrderId(1), "Dao");
        tx.try_admit(order, Duration::from_secs(1)).await;
        shutdown.close();

        let report = Cook::new("Remy").run(ctx).await;
        assert_eq!(report.orders_cooked, 0);
        assert_eq!(
            sink.count(|e| matches!(e, KitchenEvent::CookingStarted { .. })),
            0
        );
    }
}
