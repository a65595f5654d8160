//! Error types for the restaurant lifecycle.
//!
//! Timeouts, cancellations, and lost deliveries are normal outcomes and show
//! up in the [`ServiceReport`](crate::model::ServiceReport), never here.

use crate::framework::FrameworkError;
use thiserror::Error;

/// Problems with a [`RestaurantConfig`](crate::lifecycle::RestaurantConfig).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The waiter must be able to hold at least one order.
    #[error("Queue capacity must be at least 1")]
    ZeroCapacity,

    /// Customers with no appetite would leave before ordering.
    #[error("Meals per customer must be at least 1")]
    ZeroMeals,

    /// Reports are keyed by actor name, so names must be unique.
    #[error("Duplicate actor name: {0}")]
    DuplicateName(String),

    /// Without cooks and without a deadline, customers would wait forever.
    #[error("A restaurant without cooks needs a deadline")]
    NoCooksWithoutDeadline,
}

/// Errors that can end [`Restaurant::run`](crate::lifecycle::Restaurant::run).
#[derive(Debug, Error)]
pub enum RestaurantError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Framework error: {0}")]
    Framework(#[from] FrameworkError),

    /// An actor task panicked or was cancelled.
    #[error("Actor {name} failed: {source}")]
    ActorFailed {
        name: String,
        #[source]
        source: tokio::task::JoinError,
    },

    /// An actor was still running when the shutdown grace period ran out.
    #[error("Actor {name} did not stop within the shutdown grace period")]
    GraceExpired { name: String },
}
