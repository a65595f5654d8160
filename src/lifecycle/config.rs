//! # Restaurant Configuration
//!
//! Everything an external collaborator can tune about a run. [`Default`] is the
//! reference behavior with one-second time units:
//!
//! | Setting | Reference |
//! |---------|-----------|
//! | customers | Ani, Bai, Cat, Dao, Eve, Fay, Gus, Hua, Iza, Jai |
//! | cooks | Remy, Colette, Linguini |
//! | queue capacity | 3 |
//! | admission timeout | 7 units |
//! | deadline | 20 units |
//! | meals per customer | 5 |
//! | cooking / eating / abandoning | 10 / 2 / 5 units, randomized to half–full |
//!
//! Use [`RestaurantConfig::scaled`] to run the reference scenario on a faster
//! clock, and the `with_*` methods to override individual settings.

use crate::framework::Effort;
use crate::lifecycle::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

const CUSTOMERS: [&str; 10] = [
    "Ani", "Bai", "Cat", "Dao", "Eve", "Fay", "Gus", "Hua", "Iza", "Jai",
];
const COOKS: [&str; 3] = ["Remy", "Colette", "Linguini"];

/// The deadline, the longest reference duration.
const LONGEST_IN_UNITS: u32 = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantConfig {
    pub customers: Vec<String>,
    pub cooks: Vec<String>,
    /// How many orders the waiter can hold at once.
    pub queue_capacity: usize,
    /// How long a customer waits for the waiter before abandoning an order.
    pub admission_timeout: Duration,
    /// Closing time, measured from the start of the run. `None` keeps the
    /// restaurant open until every customer has finished.
    pub deadline: Option<Duration>,
    pub meals_per_customer: usize,
    pub cooking: Effort,
    pub eating: Effort,
    /// Time a customer spends giving up on an order before trying again.
    pub abandoning: Effort,
    /// How long actors get to wind down after closing time before they are
    /// aborted.
    pub shutdown_grace: Duration,
}

impl Default for RestaurantConfig {
    fn default() -> Self {
        Self::scaled(Duration::from_secs(1))
    }
}

impl RestaurantConfig {
    /// The reference scenario with every duration expressed in `time_unit`s.
    ///
    /// Durations saturate at [`Duration::MAX`]; use
    /// [`checked_scaled`](Self::checked_scaled) to reject such a unit instead.
    pub fn scaled(time_unit: Duration) -> Self {
        Self {
            customers: CUSTOMERS.iter().map(|s| s.to_string()).collect(),
            cooks: COOKS.iter().map(|s| s.to_string()).collect(),
            queue_capacity: 3,
            admission_timeout: time_unit.saturating_mul(7),
            deadline: Some(time_unit.saturating_mul(LONGEST_IN_UNITS)),
            meals_per_customer: 5,
            cooking: Effort::units(10, time_unit),
            eating: Effort::units(2, time_unit),
            abandoning: Effort::units(5, time_unit),
            shutdown_grace: time_unit.saturating_mul(15),
        }
    }

    /// Like [`scaled`](Self::scaled), but `None` if any reference duration
    /// would overflow.
    pub fn checked_scaled(time_unit: Duration) -> Option<Self> {
        time_unit.checked_mul(LONGEST_IN_UNITS)?;
        Some(Self::scaled(time_unit))
    }

    pub fn with_customers<I, S>(mut self, customers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.customers = customers.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_cooks<I, S>(mut self, cooks: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.cooks = cooks.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity;
        self
    }

    pub fn with_admission_timeout(mut self, timeout: Duration) -> Self {
        self.admission_timeout = timeout;
        self
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_meals_per_customer(mut self, meals: usize) -> Self {
        self.meals_per_customer = meals;
        self
    }

    pub fn with_cooking(mut self, effort: Effort) -> Self {
        self.cooking = effort;
        self
    }

    pub fn with_eating(mut self, effort: Effort) -> Self {
        self.eating = effort;
        self
    }

    pub fn with_abandoning(mut self, effort: Effort) -> Self {
        self.abandoning = effort;
        self
    }

    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    /// Checks the settings that would otherwise panic or never terminate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.queue_capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if self.meals_per_customer == 0 {
            return Err(ConfigError::ZeroMeals);
        }
        if self.cooks.is_empty() && !self.customers.is_empty() && self.deadline.is_none() {
            return Err(ConfigError::NoCooksWithoutDeadline);
        }

        let mut seen = HashSet::new();
        for name in self.customers.iter().chain(self.cooks.iter()) {
            if !seen.insert(name.as_str()) {
                return Err(ConfigError::DuplicateName(name.clone()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reference_behavior() {
        let config = RestaurantConfig::default();
        assert_eq!(config.customers.len(), 10);
        assert_eq!(config.cooks, vec!["Remy", "Colette", "Linguini"]);
        assert_eq!(config.queue_capacity, 3);
        assert_eq!(config.admission_timeout, Duration::from_secs(7));
        assert_eq!(config.deadline, Some(Duration::from_secs(20)));
        assert_eq!(config.meals_per_customer, 5);
        assert_eq!(
            config.cooking,
            Effort::Between {
                min: Duration::from_secs(5),
                max: Duration::from_secs(10)
            }
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_scaled_shrinks_every_duration() {
        let config = RestaurantConfig::scaled(Duration::from_millis(10));
        assert_eq!(config.admission_timeout, Duration::from_millis(70));
        assert_eq!(config.deadline, Some(Duration::from_millis(200)));
        assert_eq!(config.shutdown_grace, Duration::from_millis(150));
        assert_eq!(config.abandoning, Effort::units(5, Duration::from_millis(10)));
    }

    #[test]
    fn test_scaling_an_enormous_unit() {
        assert_eq!(RestaurantConfig::checked_scaled(Duration::MAX), None);
        assert_eq!(RestaurantConfig::checked_scaled(Duration::MAX / 19), None);

        let saturated = RestaurantConfig::scaled(Duration::MAX);
        assert_eq!(saturated.deadline, Some(Duration::MAX));
        assert_eq!(saturated.shutdown_grace, Duration::MAX);

        let unit = Duration::from_millis(10);
        assert_eq!(
            RestaurantConfig::checked_scaled(unit),
            Some(RestaurantConfig::scaled(unit))
        );
    }

    #[test]
    fn test_validate_rejects_bad_settings() {
        let base = RestaurantConfig::default();

        assert_eq!(
            base.clone().with_queue_capacity(0).validate(),
            Err(ConfigError::ZeroCapacity)
        );
        assert_eq!(
            base.clone().with_meals_per_customer(0).validate(),
            Err(ConfigError::ZeroMeals)
        );
        assert_eq!(
            base.clone().with_customers(["Ani", "Remy"]).validate(),
            Err(ConfigError::DuplicateName("Remy".into()))
        );
        assert_eq!(
            base.clone()
                .with_cooks(Vec::<String>::new())
                .with_deadline(None)
                .validate(),
            Err(ConfigError::NoCooksWithoutDeadline)
        );
        // Cookless restaurants are fine as long as they close
        assert!(base.with_cooks(Vec::<String>::new()).validate().is_ok());
    }
}
