//! Domain types for FlockTrack batches
//!
//! A batch owns all of its daily records, feed transitions, and pasture
//! movements; there are no cross-batch references.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Status & Feed Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Planned,
    Active,
    Completed,
    Cancelled,
}

impl BatchStatus {
    /// Allowed lifecycle transitions. Completed and Cancelled are terminal.
    pub fn can_transition_to(self, next: BatchStatus) -> bool {
        matches!(
            (self, next),
            (BatchStatus::Planned, BatchStatus::Active)
                | (BatchStatus::Planned, BatchStatus::Cancelled)
                | (BatchStatus::Active, BatchStatus::Completed)
                | (BatchStatus::Active, BatchStatus::Cancelled)
        )
    }

    pub fn parse(s: &str) -> Option<BatchStatus> {
        match s.to_uppercase().as_str() {
            "PLANNED" => Some(BatchStatus::Planned),
            "ACTIVE" => Some(BatchStatus::Active),
            "COMPLETED" => Some(BatchStatus::Completed),
            "CANCELLED" => Some(BatchStatus::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for BatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchStatus::Planned => write!(f, "PLANNED"),
            BatchStatus::Active => write!(f, "ACTIVE"),
            BatchStatus::Completed => write!(f, "COMPLETED"),
            BatchStatus::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FeedType {
    Starter,
    Grower,
    Finisher,
}

impl fmt::Display for FeedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedType::Starter => write!(f, "STARTER"),
            FeedType::Grower => write!(f, "GROWER"),
            FeedType::Finisher => write!(f, "FINISHER"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WeatherCondition {
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
    Stormy,
}

impl WeatherCondition {
    pub fn parse(s: &str) -> Option<WeatherCondition> {
        match s.to_uppercase().as_str() {
            "SUNNY" => Some(WeatherCondition::Sunny),
            "PARTLY_CLOUDY" => Some(WeatherCondition::PartlyCloudy),
            "CLOUDY" => Some(WeatherCondition::Cloudy),
            "RAINY" => Some(WeatherCondition::Rainy),
            "STORMY" => Some(WeatherCondition::Stormy),
            _ => None,
        }
    }
}

// ============================================================================
// Weather
// ============================================================================

/// Weather observed on a given day, attached to a daily record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    pub temperature_f: f64,
    pub conditions: WeatherCondition,
    pub rainfall_in: Option<f64>,
}

/// Current conditions used by the pasture-move check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherConditions {
    pub temperature_f: f64,
    pub is_raining: bool,
}

/// Outcome of a pasture-move eligibility check. `reason` is set only when
/// the move is blocked, and reports the highest-priority failing condition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PastureMoveCheck {
    pub can_move: bool,
    pub reason: Option<String>,
}

// ============================================================================
// Batch Records
// ============================================================================

/// A sample of bird weights taken on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightSample {
    pub id: u64,
    pub date: NaiveDate,
    pub weight_lbs: f64,
    pub sample_size: u32,
    pub notes: String,
}

/// A scheduled or recorded change of feed type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedTransition {
    pub date: NaiveDate,
    pub from_feed_type: FeedType,
    pub to_feed_type: FeedType,
}

/// A movement between pastures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PastureMovement {
    pub date: NaiveDate,
    pub from_location: String,
    pub to_location: String,
}

/// Daily metrics for a batch. One record per calendar day in practice;
/// same-day events are merged into the existing record by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub id: u64,
    pub date: NaiveDate,
    pub feed_consumed_lbs: f64,
    pub mortality: u32,
    pub weight_samples: Vec<WeightSample>,
    pub notes: String,
    pub weather: Option<WeatherRecord>,
}

impl DailyRecord {
    /// Empty record for a day, ready to merge events into.
    pub fn empty(id: u64, date: NaiveDate) -> Self {
        Self {
            id,
            date,
            feed_consumed_lbs: 0.0,
            mortality: 0,
            weight_samples: Vec::new(),
            notes: String::new(),
            weather: None,
        }
    }
}

// ============================================================================
// Batch
// ============================================================================

/// Lifecycle dates derived from the processing date and breed config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchDates {
    pub chick_arrival_date: NaiveDate,
    pub first_feed_transition_date: NaiveDate,
    pub second_feed_transition_date: NaiveDate,
    pub first_pasture_move_date: NaiveDate,
}

/// A poultry processing batch.
///
/// Invariant: `current_bird_count <= initial_bird_count`; the current count
/// is decremented only by mortality events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub id: String,
    pub breed: String,
    pub processing_date: NaiveDate,
    pub dates: BatchDates,
    pub status: BatchStatus,
    pub current_bird_count: u32,
    pub initial_bird_count: u32,
    pub daily_records: Vec<DailyRecord>,
    pub feed_transitions: Vec<FeedTransition>,
    pub pasture_movements: Vec<PastureMovement>,
}

impl Batch {
    /// Bird age in whole calendar days on the given date. Negative before
    /// chick arrival.
    pub fn age_in_days(&self, on: NaiveDate) -> i64 {
        (on - self.dates.chick_arrival_date).num_days()
    }

    pub fn daily_record_for(&self, date: NaiveDate) -> Option<&DailyRecord> {
        self.daily_records.iter().find(|r| r.date == date)
    }
}

// ============================================================================
// Farm Info
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street1: String,
    pub street2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}

impl Address {
    /// US ZIP: five digits, optionally followed by a dash and four more.
    pub fn is_valid_zip(zip: &str) -> bool {
        let bytes = zip.as_bytes();
        match bytes.len() {
            5 => bytes.iter().all(u8::is_ascii_digit),
            10 => {
                bytes[..5].iter().all(u8::is_ascii_digit)
                    && bytes[5] == b'-'
                    && bytes[6..].iter().all(u8::is_ascii_digit)
            }
            _ => false,
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.street1.is_empty()
            && !self.city.is_empty()
            && self.state.len() == 2
            && Self::is_valid_zip(&self.zip_code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmInfo {
    pub first_name: String,
    pub last_name: String,
    pub farm_name: String,
    pub address: Address,
}
