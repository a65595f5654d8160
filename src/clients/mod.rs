//! Type-safe wrappers around the two halves of the [admission queue](crate::framework::queue).

pub mod pass_client;
pub mod waiter_client;

pub use pass_client::*;
pub use waiter_client::*;
