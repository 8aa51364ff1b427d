//! Feed & Growth Estimates
//!
//! Rule-of-thumb consumption and growth numbers used for planning, not
//! for recording actuals.

use crate::lifecycle::feed_type_for_age;
use crate::types::FeedType;

/// Daily feed intake as a fraction of body weight, by feed stage.
const STARTER_RATE: f64 = 0.15; // 15% of body weight per day
const GROWER_RATE: f64 = 0.12; // 12%
const FINISHER_RATE: f64 = 0.10; // 10%

/// Starting weight of a day-old chick, in pounds.
const BASE_WEIGHT_LBS: f64 = 0.1;

pub fn daily_feed_rate(feed_type: FeedType) -> f64 {
    match feed_type {
        FeedType::Starter => STARTER_RATE,
        FeedType::Grower => GROWER_RATE,
        FeedType::Finisher => FINISHER_RATE,
    }
}

/// Estimated feed for one day across the whole flock, in pounds. The
/// feed stage follows the same age boundaries as `feed_type_for_age`.
pub fn estimate_daily_feed(
    current_weight_lbs: f64,
    age_in_days: i64,
    bird_count: u32,
    breed: &str,
) -> f64 {
    let rate = daily_feed_rate(feed_type_for_age(age_in_days, breed));
    current_weight_lbs * rate * bird_count as f64
}

/// Expected per-bird weight at a given age, in pounds. Simplified
/// Cornish Cross growth curve: slower gain through day 21, then faster.
pub fn expected_weight(age_in_days: i64) -> f64 {
    let daily_gain = if age_in_days <= 21 { 0.15 } else { 0.2 };
    BASE_WEIGHT_LBS + age_in_days as f64 * daily_gain
}

/// Total feed over a span of days at a flat per-bird daily amount.
pub fn estimate_total_feed(initial_count: u32, days: i64, feed_per_day_lbs: f64) -> f64 {
    initial_count as f64 * days as f64 * feed_per_day_lbs
}
