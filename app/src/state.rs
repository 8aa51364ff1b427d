use flock::FlockStore;
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Global application state shared by all commands
pub struct AppState {
    pub store: Arc<Mutex<FlockStore>>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            store: Arc::new(Mutex::new(FlockStore::new())),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

// -- Serializable types returned by commands --

#[derive(Serialize, Clone, Debug)]
pub struct BatchSummaryData {
    pub id: String,
    pub breed: String,
    pub status: String,
    pub processing_date: String,
    pub chick_arrival_date: String,
    pub current_bird_count: u32,
    pub initial_bird_count: u32,
    pub age_in_days: i64,
}

#[derive(Serialize, Clone)]
pub struct BatchDatesData {
    pub chick_arrival_date: String,
    pub first_feed_transition_date: String,
    pub second_feed_transition_date: String,
    pub first_pasture_move_date: String,
}

#[derive(Serialize, Clone)]
pub struct BatchDetailData {
    pub id: String,
    pub breed: String,
    pub status: String,
    pub processing_date: String,
    pub dates: BatchDatesData,
    pub current_bird_count: u32,
    pub initial_bird_count: u32,
    pub age_in_days: i64,
    pub current_feed_type: String,
    pub total_mortality: u32,
    pub mortality_rate: f64,
    pub average_daily_feed_lbs: f64,
}

#[derive(Serialize, Clone, Debug)]
pub struct RecordResultData {
    pub batch_id: String,
    pub record_count: u32,
    pub current_bird_count: u32,
}

#[derive(Serialize, Clone)]
pub struct PastureCheckData {
    pub can_move: bool,
    pub reason: Option<String>,
}

#[derive(Serialize, Clone)]
pub struct UpcomingActionData {
    pub date: String,
    pub action: String,
    pub batch_id: String,
}

#[derive(Serialize, Clone)]
pub struct DashboardData {
    pub active_batches: u32,
    pub total_birds: u32,
    pub upcoming_actions: Vec<UpcomingActionData>,
}

#[derive(Serialize, Clone)]
pub struct ActivityEntryData {
    pub date: String,
    pub kind: String,
    pub detail: String,
    pub notes: Option<String>,
}

#[derive(Serialize, Clone)]
pub struct ReportRowData {
    pub date: String,
    pub avg_weight_lbs: Option<f64>,
    pub feed_lbs: Option<f64>,
    pub mortality: Option<u32>,
    pub notes: Option<String>,
}

#[derive(Serialize, Clone)]
pub struct FeedPlanData {
    pub batch_id: String,
    pub age_in_days: i64,
    pub feed_type: String,
    pub expected_weight_lbs: f64,
    pub estimated_daily_feed_lbs: f64,
}

#[derive(Serialize, Clone)]
pub struct FarmInfoData {
    pub first_name: String,
    pub last_name: String,
    pub farm_name: String,
    pub street1: String,
    pub street2: Option<String>,
    pub city: String,
    pub state: String,
    pub zip_code: String,
}
