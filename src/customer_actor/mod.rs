//! The customer: orders, waits, eats, and repeats until full or until the
//! restaurant closes.
//!
//! ## Lifecycle
//!
//! ```text
//! Idle ──order──▶ Admitting ──admitted──▶ Waiting ──meal──▶ Idle
//!   │                 │ timed out ─▶ Idle     │
//!   │ closing         │ closing               │ closing / slot dropped
//!   ▼                 ▼                       ▼
//!              LeavingEarly ──▶ Stopped
//! ```
//!
//! A timed-out order is simply abandoned; the customer waits a moment and
//! orders again with a brand-new order. It counts neither as a meal nor as a
//! reason to leave. Once `appetite` meals have been eaten the customer goes
//! home.

pub mod state;

pub use state::CustomerState;

use crate::clients::WaiterClient;
use crate::framework::{Admission, IdGenerator, Labor, ShutdownSignal};
use crate::lifecycle::EventSink;
use crate::model::{
    CustomerExit, CustomerReport, KitchenEvent, LeaveStage, Order, OrderId, PreparedOrder,
    ReplyReceiver,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Dependencies injected when the customer walks in.
#[derive(Clone)]
pub struct CustomerContext {
    pub waiter: WaiterClient,
    pub ids: IdGenerator,
    pub shutdown: ShutdownSignal,
    pub sink: Arc<dyn EventSink>,
    pub eating: Arc<dyn Labor>,
    pub abandoning: Arc<dyn Labor>,
}

pub struct Customer {
    name: String,
    appetite: usize,
    patience: Duration,
    state: CustomerState,
    meals_eaten: usize,
    orders_placed: usize,
    orders_abandoned: usize,
}

impl Customer {
    /// # Arguments
    /// * `appetite` - Meals to eat before going home
    /// * `patience` - How long to wait for the waiter before abandoning an order
    pub fn new(name: impl Into<String>, appetite: usize, patience: Duration) -> Self {
        Self {
            name: name.into(),
            appetite,
            patience,
            state: CustomerState::Idle,
            meals_eaten: 0,
            orders_placed: 0,
            orders_abandoned: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub async fn run(mut self, ctx: CustomerContext) -> CustomerReport {
        ctx.sink.record(KitchenEvent::CustomerArrived {
            customer: self.name.clone(),
        });

        let exit = loop {
            if self.meals_eaten >= self.appetite {
                break CustomerExit::WentHome;
            }
            if ctx.shutdown.is_closed() {
                break CustomerExit::LeftEarly(LeaveStage::BeforeOrdering);
            }

            let (order, reply) = self.place(&ctx);
            let id = order.id;
            self.transition(CustomerState::Admitting);

            match ctx.waiter.place_order(order, self.patience).await {
                Admission::Admitted => {
                    ctx.sink.record(KitchenEvent::OrderAdmitted {
                        customer: self.name.clone(),
                        order: id,
                        queued: ctx.waiter.pending(),
                    });
                    self.transition(CustomerState::Waiting);

                    match wait_for_meal(reply, &ctx.shutdown).await {
                        Some(meal) => self.eat(meal, &ctx).await,
                        None => break CustomerExit::LeftEarly(LeaveStage::WaitingForMeal),
                    }
                }
                Admission::TimedOut(_) => self.abandon(id, &ctx).await,
                Admission::Cancelled(_) => break CustomerExit::LeftEarly(LeaveStage::Admitting),
            }
        };

        self.leave(exit, &ctx);
        CustomerReport {
            name: self.name,
            meals_eaten: self.meals_eaten,
            orders_placed: self.orders_placed,
            orders_abandoned: self.orders_abandoned,
            exit,
        }
    }

    fn place(&mut self, ctx: &CustomerContext) -> (Order, ReplyReceiver) {
        let id = OrderId(ctx.ids.next_id());
        self.orders_placed += 1;
        ctx.sink.record(KitchenEvent::OrderPlaced {
            customer: self.name.clone(),
            order: id,
        });
        Order::new(id, self.name.clone())
    }

    async fn eat(&mut self, meal: PreparedOrder, ctx: &CustomerContext) {
        ctx.eating.perform().await;
        self.meals_eaten += 1;
        ctx.sink.record(KitchenEvent::MealEaten {
            customer: self.name.clone(),
            order: meal.id,
            prepared_by: meal.prepared_by,
            meals_eaten: self.meals_eaten,
        });
        self.transition(CustomerState::Idle);
    }

    async fn abandon(&mut self, id: OrderId, ctx: &CustomerContext) {
        self.orders_abandoned += 1;
        ctx.sink.record(KitchenEvent::OrderAbandoned {
            customer: self.name.clone(),
            order: id,
        });
        // Closing time cuts the pause short; the next iteration notices it.
        tokio::select! {
            biased;
            _ = ctx.shutdown.closed() => {}
            _ = ctx.abandoning.perform() => {}
        }
        self.transition(CustomerState::Idle);
    }

    fn leave(&mut self, exit: CustomerExit, ctx: &CustomerContext) {
        match exit {
            CustomerExit::WentHome => ctx.sink.record(KitchenEvent::WentHome {
                customer: self.name.clone(),
                meals_eaten: self.meals_eaten,
            }),
            CustomerExit::LeftEarly(stage) => {
                self.transition(CustomerState::LeavingEarly);
                ctx.sink.record(KitchenEvent::LeftEarly {
                    customer: self.name.clone(),
                    stage,
                    meals_eaten: self.meals_eaten,
                });
            }
        }
        self.transition(CustomerState::Stopped);
    }

    fn transition(&mut self, next: CustomerState) {
        debug!(customer = %self.name, from = %self.state, to = %next, "State change");
        self.state = next;
    }
}

/// Waits for the meal or closing time, whichever comes first. A meal that is
/// already on the table wins over closing time.
///
/// On closing time the slot is closed before it is checked one last time, so
/// a cook either delivered before that check (and the meal is eaten) or its
/// send fails. A delivered meal is never left uneaten.
async fn wait_for_meal(mut reply: ReplyReceiver, shutdown: &ShutdownSignal) -> Option<PreparedOrder> {
    tokio::select! {
        biased;
        meal = &mut reply => meal.ok(),
        _ = shutdown.closed() => {
            reply.close();
            reply.try_recv().ok()
        }
    }
}
