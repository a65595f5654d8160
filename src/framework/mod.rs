//! Generic concurrency building blocks for the simulation.
//!
//! # Main Components
//!
//! - [`admission_queue`] - Bounded FIFO with timeout- and shutdown-aware admission
//! - [`ShutdownSignal`] - Broadcast, one-shot closing-time flag
//! - [`IdGenerator`] - Lock-free unique id source
//! - [`Labor`] / [`Effort`] - Simulated, non-cancellable work
//! - [`FrameworkError`] - Errors from the building blocks themselves
//!
//! # Testing
//!
//! See [`mock`] module for a scripted kitchen that lets you test customers
//! without spawning real cooks.

pub mod error;
pub mod id;
pub mod labor;
pub mod mock;
pub mod queue;
pub mod shutdown;

// Re-export core types for convenience
pub use error::FrameworkError;
pub use id::IdGenerator;
pub use labor::{Effort, Labor};
pub use queue::{admission_queue, Admission, AdmissionReceiver, AdmissionSender};
pub use shutdown::ShutdownSignal;
