//! # Restaurant Simulation Demo
//!
//! Runs one reference service and logs a summary.
//!
//! Set `RESTAURANT_TIME_UNIT_MS` to shrink the time unit (default: 1000 ms).

use restaurant_sim::lifecycle::{setup_tracing, Restaurant, RestaurantConfig};
use restaurant_sim::model::CustomerExit;
use std::time::Duration;
use tracing::{info, warn, Instrument};

const TIME_UNIT_VAR: &str = "RESTAURANT_TIME_UNIT_MS";

fn load_config() -> Result<RestaurantConfig, String> {
    match std::env::var(TIME_UNIT_VAR) {
        Ok(raw) => config_for_time_unit(&raw),
        Err(_) => Ok(RestaurantConfig::default()),
    }
}

/// Reference scenario with a time unit of `raw` milliseconds.
fn config_for_time_unit(raw: &str) -> Result<RestaurantConfig, String> {
    let millis: u64 = raw
        .parse()
        .map_err(|e| format!("{TIME_UNIT_VAR}={raw:?} is not a number of milliseconds: {e}"))?;
    RestaurantConfig::checked_scaled(Duration::from_millis(millis))
        .ok_or_else(|| format!("{TIME_UNIT_VAR}={raw:?} is too large a time unit"))
}

#[tokio::main]
async fn main() -> Result<(), String> {
    // Setup tracing once for the entire application
    setup_tracing();

    let config = load_config()?;
    info!(
        customers = config.customers.len(),
        cooks = config.cooks.len(),
        deadline = ?config.deadline,
        "Opening restaurant"
    );

    let restaurant = Restaurant::new(config).map_err(|e| e.to_string())?;

    let span = tracing::info_span!("service");
    let report = restaurant
        .run()
        .instrument(span)
        .await
        .map_err(|e| e.to_string())?;

    for customer in &report.customers {
        match customer.exit {
            CustomerExit::WentHome => info!(
                customer = %customer.name,
                meals = customer.meals_eaten,
                abandoned = customer.orders_abandoned,
                "Went home full"
            ),
            CustomerExit::LeftEarly(stage) => warn!(
                customer = %customer.name,
                meals = customer.meals_eaten,
                abandoned = customer.orders_abandoned,
                ?stage,
                "Left hungry"
            ),
        }
    }
    for cook in &report.cooks {
        info!(
            cook = %cook.name,
            cooked = cook.orders_cooked,
            delivered = cook.orders_delivered,
            lost = cook.lost_deliveries,
            "Cook summary"
        );
    }

    info!(
        reason = ?report.reason,
        meals = report.meals_eaten(),
        "Service complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_unit_from_env_value() {
        let config = config_for_time_unit("50").unwrap();
        assert_eq!(config.deadline, Some(Duration::from_secs(1)));

        assert!(config_for_time_unit("fast").is_err());
        assert!(config_for_time_unit("18446744073709551616").is_err());

        // The largest value still scales without overflowing
        let slowest = config_for_time_unit(&u64::MAX.to_string()).unwrap();
        assert_eq!(
            slowest.shutdown_grace,
            Duration::from_millis(u64::MAX) * 15
        );
    }
}
