//! # Framework Errors
//!
//! Errors raised by the concurrency building blocks themselves. Control
//! outcomes such as a timed-out admission are *not* errors; see
//! [`Admission`](crate::framework::Admission).

/// Errors that can occur within the framework itself.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrameworkError {
    #[error("Queue capacity must be at least 1")]
    ZeroCapacity,
}
