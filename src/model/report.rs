//! Outcome types: why the restaurant closed, how each actor ended, and the
//! per-run summary returned by [`Restaurant::run`](crate::lifecycle::Restaurant::run).

use serde::{Deserialize, Serialize};

/// What closed the shutdown signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShutdownReason {
    /// The configured deadline elapsed.
    Deadline,
    /// No deadline was configured and every customer finished.
    AllCustomersServed,
    /// Someone holding the signal closed it.
    External,
}

/// Where a customer was when it noticed closing time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveStage {
    /// Before placing a new order.
    BeforeOrdering,
    /// While waiting for the waiter to take the order.
    Admitting,
    /// While waiting for an admitted order to come back.
    WaitingForMeal,
}

/// Why a cooked order never reached its customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LostReason {
    /// Closing time arrived before the cook could deliver.
    ClosingTime,
    /// The customer had already left and dropped its reply slot.
    CustomerGone,
}

/// Terminal state of a customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CustomerExit {
    WentHome,
    LeftEarly(LeaveStage),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerReport {
    pub name: String,
    pub meals_eaten: usize,
    pub orders_placed: usize,
    /// Orders given up after the admission timeout.
    pub orders_abandoned: usize,
    pub exit: CustomerExit,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CookReport {
    pub name: String,
    pub orders_cooked: usize,
    pub orders_delivered: usize,
    pub lost_deliveries: usize,
}

/// Summary of one restaurant run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceReport {
    pub reason: ShutdownReason,
    pub customers: Vec<CustomerReport>,
    pub cooks: Vec<CookReport>,
}

impl ServiceReport {
    pub fn customer(&self, name: &str) -> Option<&CustomerReport> {
        self.customers.iter().find(|c| c.name == name)
    }

    pub fn cook(&self, name: &str) -> Option<&CookReport> {
        self.cooks.iter().find(|c| c.name == name)
    }

    pub fn meals_eaten(&self) -> usize {
        self.customers.iter().map(|c| c.meals_eaten).sum()
    }

    pub fn orders_delivered(&self) -> usize {
        self.cooks.iter().map(|c| c.orders_delivered).sum()
    }
}
