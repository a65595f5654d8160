use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerState {
    /// Between orders: deciding whether to order again.
    Idle,
    /// Waiting for the waiter to take the order.
    Admitting,
    /// Waiting for an admitted order to come back from the kitchen.
    Waiting,
    LeavingEarly,
    Stopped,
}

impl Display for CustomerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CustomerState::Idle => "idle",
            CustomerState::Admitting => "admitting",
            CustomerState::Waiting => "waiting",
            CustomerState::LeavingEarly => "leaving_early",
            CustomerState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}
