//! # Restaurant Lifecycle & Orchestration
//!
//! Individual actors are simple. Wiring them together, closing on time, and
//! making sure every one of them actually stops is where the complexity lives.
//!
//! **Key Responsibilities:**
//! 1. **Configuration** - [`RestaurantConfig`] with the reference defaults
//! 2. **Wiring** - one queue, one shutdown signal and one id generator per run,
//!    injected into every actor's context at start
//! 3. **Closing Time** - a one-shot deadline, or "everyone went home" when no
//!    deadline is set
//! 4. **Termination** - joining every actor task within the shutdown grace period
//! 5. **Observability** - [`setup_tracing`] and the [`EventSink`] seam
//!
//! ## Shutdown Sequence
//!
//! ```text
//! deadline ──▶ ShutdownSignal::close()
//!                 ├─▶ customers leave (before ordering / admitting / waiting)
//!                 ├─▶ cooks stop taking orders, finish the one in hand
//!                 └─▶ orders still queued are dropped with the queue
//! Restaurant::run joins everyone ──▶ Closed ──▶ ServiceReport
//! ```

pub mod config;
pub mod error;
pub mod restaurant;
pub mod tracing;

pub use config::RestaurantConfig;
pub use error::{ConfigError, RestaurantError};
pub use restaurant::Restaurant;
pub use self::tracing::{setup_tracing, EventSink, RecordingSink, TracingSink};
