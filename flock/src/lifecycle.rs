//! Batch Lifecycle Calculator
//!
//! Pure date-arithmetic and rate functions: derived lifecycle dates,
//! feed type by age, pasture-move eligibility, mortality rate. No state,
//! no side effects, no I/O.

use chrono::{Duration, NaiveDate};

use crate::breeds::{self, BreedConfig};
use crate::types::{BatchDates, FeedType, PastureMoveCheck, WeatherConditions};

/// Minimum bird age before a pasture move, in days.
pub const MIN_PASTURE_AGE_DAYS: i64 = 21;

/// Minimum temperature for a pasture move, in Fahrenheit.
pub const MIN_PASTURE_TEMP_F: f64 = 45.0;

/// Derive the lifecycle dates for a batch from its processing date.
///
/// Chick arrival is `processing_date - days_to_processing`; every other
/// milestone lands `days_to_x` after arrival. Unknown breeds use the
/// default config.
pub fn calculate_batch_dates(processing_date: NaiveDate, breed: &str) -> BatchDates {
    let config = breeds::config_for(breed);
    let arrival = processing_date - Duration::days(config.days_to_processing);

    BatchDates {
        chick_arrival_date: arrival,
        first_feed_transition_date: milestone(processing_date, &config, config.days_to_first_feed_transition),
        second_feed_transition_date: milestone(processing_date, &config, config.days_to_second_feed_transition),
        first_pasture_move_date: milestone(processing_date, &config, config.days_to_first_pasture_move),
    }
}

fn milestone(processing_date: NaiveDate, config: &BreedConfig, days_from_arrival: i64) -> NaiveDate {
    processing_date - Duration::days(config.days_to_processing - days_from_arrival)
}

/// Feed type for a bird of the given age. Boundary days belong to the
/// next stage: with the default config, day 13 is STARTER and day 14 is
/// GROWER.
pub fn feed_type_for_age(age_in_days: i64, breed: &str) -> FeedType {
    let config = breeds::config_for(breed);

    if age_in_days < config.days_to_first_feed_transition {
        FeedType::Starter
    } else if age_in_days < config.days_to_second_feed_transition {
        FeedType::Grower
    } else {
        FeedType::Finisher
    }
}

/// Whole-calendar-day difference between two dates. Negative when
/// `current_date` precedes `start_date`.
pub fn age_in_days(current_date: NaiveDate, start_date: NaiveDate) -> i64 {
    (current_date - start_date).num_days()
}

/// Check whether a batch may move to pasture today.
///
/// Conditions are checked in fixed priority order, and the first failure
/// wins: (1) birds too young, (2) temperature below 45F, (3) raining.
pub fn can_move_to_pasture(
    current_date: NaiveDate,
    batch_start_date: NaiveDate,
    weather: &WeatherConditions,
) -> PastureMoveCheck {
    let age = age_in_days(current_date, batch_start_date);

    if age < MIN_PASTURE_AGE_DAYS {
        return PastureMoveCheck {
            can_move: false,
            reason: Some(format!(
                "Birds are too young. Minimum age is {} days.",
                MIN_PASTURE_AGE_DAYS
            )),
        };
    }

    if weather.temperature_f < MIN_PASTURE_TEMP_F {
        return PastureMoveCheck {
            can_move: false,
            reason: Some("Temperature is too low for pasture move.".to_string()),
        };
    }

    if weather.is_raining {
        return PastureMoveCheck {
            can_move: false,
            reason: Some("Cannot move to pasture during rain.".to_string()),
        };
    }

    PastureMoveCheck {
        can_move: true,
        reason: None,
    }
}

/// Mortality rate as a percentage of the initial count. Returns 0 when
/// the initial count is 0 rather than dividing by zero.
pub fn mortality_rate(initial_count: u32, current_count: u32) -> f64 {
    if initial_count == 0 {
        return 0.0;
    }
    (initial_count as f64 - current_count as f64) / initial_count as f64 * 100.0
}

/// Batch id derived from the processing date and breed code, e.g.
/// `20250204-CC`.
pub fn generate_batch_id(processing_date: NaiveDate, breed: &str) -> String {
    format!(
        "{}-{}",
        processing_date.format("%Y%m%d"),
        breeds::breed_code(breed)
    )
}
