use std::fmt::Display;

/// Where a cook is in its loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CookState {
    /// Waiting at the pass for the next order.
    Idle,
    /// Cooking or delivering an order.
    Working,
    Stopped,
}

impl Display for CookState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            CookState::Idle => "idle",
            CookState::Working => "working",
            CookState::Stopped => "stopped",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(CookState::Idle.to_string(), "idle");
        assert_eq!(CookState::Stopped.to_string(), "stopped");
    }
}
