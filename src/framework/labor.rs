//! # Simulated Labor
//!
//! Cooking, eating, and giving up on an order all take time in the simulation.
//! [`Labor`] is the seam where that time is spent; [`Effort`] is the stock
//! implementation driven by configuration.
//!
//! Labor is deliberately *not* cancellable by the shutdown signal. Once a cook
//! starts an order it finishes it, exactly like a real kitchen. Callers simply
//! `.await` it outside any `select!`.

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Something that takes time.
///
/// Tests implement this to control exactly when a cook finishes (see the
/// mid-delivery shutdown scenario in `tests/integration_test.rs`).
#[async_trait]
pub trait Labor: Send + Sync {
    async fn perform(&self);
}

/// How long a simulated task takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effort {
    /// Completes without yielding to the timer.
    Instant,
    /// Always takes exactly this long.
    Fixed(Duration),
    /// Takes a uniformly random duration in `[min, max)`.
    Between { min: Duration, max: Duration },
}

impl Effort {
    /// A task of `units` time units, randomized to between half and all of it.
    ///
    /// With a one-second unit, `Effort::units(10, ..)` takes 5–10 seconds.
    /// Saturates at [`Duration::MAX`]; use [`Effort::checked_units`] to detect that.
    pub fn units(units: u32, time_unit: Duration) -> Self {
        Self::between_half_and(time_unit.saturating_mul(units))
    }

    /// Like [`Effort::units`], but `None` if the task length overflows.
    pub fn checked_units(units: u32, time_unit: Duration) -> Option<Self> {
        time_unit.checked_mul(units).map(Self::between_half_and)
    }

    fn between_half_and(max: Duration) -> Self {
        Effort::Between { min: max / 2, max }
    }

    /// Picks the duration for one run of this task.
    pub fn sample(&self) -> Duration {
        match *self {
            Effort::Instant => Duration::ZERO,
            Effort::Fixed(duration) => duration,
            Effort::Between { min, max } if min >= max => min,
            Effort::Between { min, max } => rand::rng().random_range(min..max),
        }
    }
}

#[async_trait]
impl Labor for Effort {
    async fn perform(&self) {
        // Sample before awaiting: the thread-local rng must not live across the await.
        let duration = self.sample();
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_units_spans_half_to_full() {
        let effort = Effort::units(10, Duration::from_secs(1));
        assert_eq!(
            effort,
            Effort::Between {
                min: Duration::from_secs(5),
                max: Duration::from_secs(10)
            }
        );
        for _ in 0..100 {
            let d = effort.sample();
            assert!(d >= Duration::from_secs(5) && d < Duration::from_secs(10));
        }
    }

    #[test]
    fn test_huge_units_do_not_overflow() {
        assert_eq!(Effort::checked_units(10, Duration::MAX), None);
        assert_eq!(
            Effort::units(10, Duration::MAX),
            Effort::Between {
                min: Duration::MAX / 2,
                max: Duration::MAX
            }
        );
        assert_eq!(
            Effort::checked_units(2, Duration::from_secs(1)),
            Some(Effort::units(2, Duration::from_secs(1)))
        );
    }

    #[test]
    fn test_degenerate_range_uses_min() {
        let effort = Effort::Between {
            min: Duration::from_millis(3),
            max: Duration::from_millis(3),
        };
        assert_eq!(effort.sample(), Duration::from_millis(3));
        assert_eq!(Effort::Instant.sample(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_effort_sleeps_exactly() {
        let started = tokio::time::Instant::now();
        Effort::Fixed(Duration::from_secs(10)).perform().await;
        assert!(started.elapsed() >= Duration::from_secs(10));
        assert!(started.elapsed() < Duration::from_secs(11));
    }
}
