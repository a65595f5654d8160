#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Restaurant Simulation
//!
//! > **Bounded producer/consumer concurrency, told as a restaurant.**
//!
//! Customers place orders with a waiter who can hold only a few at a time.
//! Cooks take orders off the pass in arrival order, cook them, and hand each
//! meal straight back to the customer who ordered it. At closing time
//! everybody stops, and nobody is left waiting forever.
//!
//! ## 🏗️ Design Philosophy
//!
//! | Restaurant | Concurrency |
//! |------------|-------------|
//! | Customer | Producer task |
//! | Cook | Worker task |
//! | Waiter | Bounded FIFO queue with timed admission |
//! | Reply slot | One-shot channel per order |
//! | Closing time | Broadcast cancellation |
//!
//! Three outcomes are normal and never errors: the waiter is full for too long
//! (the customer abandons the order and tries again), closing time arrives
//! while a customer is waiting (the customer leaves early), and a meal is
//! ready after its customer has gone (the delivery is abandoned).
//!
//! ## 🚀 Core Concepts
//!
//! ### Every wait is bounded
//! A customer waits for the waiter at most its patience, and waits for its
//! meal only until closing time. A cook waits for orders only until closing
//! time. The one thing shutdown never interrupts is work already in hand:
//! a cook always finishes cooking, a customer always finishes eating.
//!
//! ### Replies ride with the order
//! Each [`Order`](model::Order) carries the sending half of a one-shot channel.
//! The cook consumes it to deliver, so an order can be answered at most once
//! and only to the customer who placed it.
//!
//! ### Mocking: Testing without Pain
//! [`MockKitchen`](framework::mock::MockKitchen) plays the cooks from a script.
//! See the [`framework::mock`] module for a complete guide.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Configuration problems and failed actor tasks are
//! [`RestaurantError`](lifecycle::RestaurantError)s. Everything else is an
//! outcome recorded in the [`ServiceReport`](model::ServiceReport).
//!
//! ### 2. Async Context Injection
//! Actors are constructed with only their own settings. Shared plumbing (the
//! waiter, the pass, the shutdown signal, the trace sink) is injected when
//! `run(ctx)` is called, so tests can hand a real customer a scripted kitchen.
//!
//! ### 3. Observability
//! Every state transition is a [`KitchenEvent`](model::KitchenEvent) sent to an
//! [`EventSink`](lifecycle::EventSink). The default sink writes structured
//! `tracing` lines. See the [`lifecycle::tracing`] module for details.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Role**: Generic building blocks that know nothing about restaurants.
//! - **Key items**: [`admission_queue`](framework::admission_queue),
//!   [`ShutdownSignal`](framework::ShutdownSignal), [`Labor`](framework::Labor).
//!
//! ### 2. The Orchestrator ([`lifecycle`])
//! - **Role**: Builds the restaurant, closes it on time, joins every actor.
//! - **Key items**: [`Restaurant`](lifecycle::Restaurant),
//!   [`RestaurantConfig`](lifecycle::RestaurantConfig).
//!
//! ### 3. The Interface ([`clients`])
//! - **Role**: Order-speaking wrappers around the two ends of the queue.
//! - **Key items**: [`WaiterClient`](clients::WaiterClient),
//!   [`PassClient`](clients::PassClient).
//!
//! ### 4. The Actors ([`customer_actor`], [`cook_actor`])
//! - **Role**: The producer and worker loops.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # The reference service (20 seconds)
//! RUST_LOG=info cargo run
//!
//! # Same scenario, 50 ms per time unit
//! RESTAURANT_TIME_UNIT_MS=50 RUST_LOG=info cargo run
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod clients;
pub mod cook_actor;
pub mod customer_actor;
pub mod framework;
pub mod lifecycle;
pub mod model;
