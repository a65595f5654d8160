//! # Mock Kitchen & Testing Guide
//!
//! `MockKitchen` stands in for the cooks. It pulls orders off the pass exactly
//! like a real [`Cook`](crate::cook_actor::Cook) would, but instead of cooking
//! it follows a script of expectations you set up front. That makes it easy to
//! drive a real [`Customer`](crate::customer_actor::Customer) through paths that
//! are hard to hit with real cooks, such as a reply slot that is dropped, or
//! an order that is taken and then never answered.
//!
//! ## When to use the Mock vs Real Cooks
//!
//! | Feature | MockKitchen | Real Cooks |
//! |---------|-------------|------------|
//! | **Speed** | Instant | Depends on the cooking effort |
//! | **Determinism** | Scripted, one order at a time | Subject to scheduler |
//! | **Failure Injection** | Easy (`drop_reply`, `hold`) | Needs shutdown races |
//! | **Use Case** | Testing customer logic | Testing the whole restaurant |
//!
//! ## Example
//!
//! ```rust
//! use restaurant_sim::clients::{PassClient, WaiterClient};
//! use restaurant_sim::framework::{admission_queue, mock::MockKitchen, Admission, ShutdownSignal};
//! use restaurant_sim::model::{Order, OrderId};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let shutdown = ShutdownSignal::new();
//!     let (tx, rx) = admission_queue(3, shutdown.clone()).unwrap();
//!     let waiter = WaiterClient::new(tx);
//!
//!     // 1. Script the kitchen
//!     let kitchen = MockKitchen::new(PassClient::new(rx));
//!     kitchen.expect_order().deliver_as("Remy");
//!
//!     // 2. Place an order through the real waiter
//!     let (order, reply) = Order::new(OrderId(1), "Ani");
//!     let admission = waiter.place_order(order, Duration::from_secs(1)).await;
//!     assert!(matches!(admission, Admission::Admitted));
//!
//!     // 3. The scripted reply arrives
//!     assert_eq!(reply.await.unwrap().prepared_by, "Remy");
//!     kitchen.verify();
//! }
//! ```

use crate::clients::PassClient;
use crate::model::{Order, OrderId};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// What the kitchen does with the next order it takes.
enum Expectation {
    /// Reply immediately, signed by this cook.
    Deliver { cook: String },
    /// Drop the order, closing its reply slot unanswered.
    DropReply,
    /// Keep the order forever; the reply slot stays open but silent.
    Hold,
}

#[derive(Default)]
struct Script {
    expectations: VecDeque<Expectation>,
    received: Vec<OrderId>,
    held: Vec<Order>,
    unexpected: Vec<OrderId>,
}

/// A scripted stand-in for the cooks.
///
/// # Example
/// ```ignore
/// let kitchen = MockKitchen::new(pass);
/// kitchen.expect_order().deliver_as("Remy");
/// kitchen.expect_order().drop_reply();
///
/// // Run a customer against the waiter...
/// kitchen.verify(); // Ensures all expectations were met
/// ```
pub struct MockKitchen {
    script: Arc<Mutex<Script>>,
    _handle: tokio::task::JoinHandle<()>,
}

impl MockKitchen {
    /// Starts taking orders from `pass` in a background task.
    ///
    /// The task stops when the pass closes (shutdown or all senders gone).
    pub fn new(pass: PassClient) -> Self {
        let script = Arc::new(Mutex::new(Script::default()));
        let script_clone = script.clone();

        let handle = tokio::spawn(async move {
            while let Some(order) = pass.next_order().await {
                let mut script = script_clone.lock().unwrap();
                script.received.push(order.id);
                match script.expectations.pop_front() {
                    Some(Expectation::Deliver { cook }) => {
                        let (meal, reply_to) = order.prepare(cook);
                        let _ = reply_to.send(meal);
                    }
                    Some(Expectation::DropReply) => drop(order),
                    Some(Expectation::Hold) => script.held.push(order),
                    None => {
                        script.unexpected.push(order.id);
                        drop(order);
                    }
                }
            }
        });

        Self {
            script,
            _handle: handle,
        }
    }

    /// Expects one more order to arrive.
    pub fn expect_order(&self) -> OrderExpectationBuilder {
        OrderExpectationBuilder {
            script: self.script.clone(),
        }
    }

    /// Ids of every order taken so far, in the order they were taken.
    pub fn received(&self) -> Vec<OrderId> {
        self.script.lock().unwrap().received.clone()
    }

    /// Verifies that all expectations were met and nothing unexpected arrived.
    pub fn verify(&self) {
        let script = self.script.lock().unwrap();
        if !script.expectations.is_empty() {
            panic!(
                "Not all expectations were met. {} remaining",
                script.expectations.len()
            );
        }
        if !script.unexpected.is_empty() {
            panic!("Unexpected orders: {:?}", script.unexpected);
        }
    }
}

/// Builder for order expectations.
pub struct OrderExpectationBuilder {
    script: Arc<Mutex<Script>>,
}

impl OrderExpectationBuilder {
    /// Cook the order at once and deliver it, signed by `cook`.
    pub fn deliver_as(self, cook: impl Into<String>) {
        self.push(Expectation::Deliver { cook: cook.into() });
    }

    /// Take the order and drop it without replying.
    pub fn drop_reply(self) {
        self.push(Expectation::DropReply);
    }

    /// Take the order and never answer it.
    pub fn hold(self) {
        self.push(Expectation::Hold);
    }

    fn push(self, expectation: Expectation) {
        self.script.lock().unwrap().expectations.push_back(expectation);
    }
}
