//! Pure data: orders, trace events, and run reports.

pub mod event;
pub mod order;
pub mod report;

pub use event::*;
pub use order::*;
pub use report::*;
