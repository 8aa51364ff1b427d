use flock::lifecycle::{can_move_to_pasture, feed_type_for_age};
use flock::stats::batch_stats;
use flock::types::{Batch, BatchStatus, WeatherConditions};
use flock::breeds;

use crate::commands::{format_date, parse_count, parse_date};
use crate::state::{AppState, BatchDatesData, BatchDetailData, BatchSummaryData, PastureCheckData};

pub fn get_breeds() -> Vec<&'static str> {
    breeds::breed_names()
}

pub fn create_batch(
    state: &AppState,
    processing_date: String,
    breed: String,
    bird_count: String,
) -> Result<BatchSummaryData, String> {
    if breed.trim().is_empty() {
        return Err("Please select a breed".to_string());
    }
    let count = parse_count(&bird_count).map_err(|_| "Please enter a valid number of birds".to_string())?;
    if count == 0 {
        return Err("Please enter a valid number of birds".to_string());
    }
    let date = parse_date(&processing_date)?;

    let mut store = state.store.lock().unwrap();
    let batch = store
        .create_batch(date, breed.trim(), count)
        .map_err(|e| e.to_string())?;

    Ok(batch_summary(batch, date))
}

pub fn get_batches(state: &AppState, today: String) -> Result<Vec<BatchSummaryData>, String> {
    let today = parse_date(&today)?;
    let store = state.store.lock().unwrap();
    Ok(store.batches().iter().map(|b| batch_summary(b, today)).collect())
}

pub fn get_batch(state: &AppState, batch_id: String, today: String) -> Result<BatchDetailData, String> {
    let today = parse_date(&today)?;
    let store = state.store.lock().unwrap();
    let batch = store
        .batch(&batch_id)
        .ok_or_else(|| format!("batch not found: {}", batch_id))?;

    let age = batch.age_in_days(today);
    let stats = batch_stats(batch);

    Ok(BatchDetailData {
        id: batch.id.clone(),
        breed: batch.breed.clone(),
        status: batch.status.to_string(),
        processing_date: format_date(batch.processing_date),
        dates: BatchDatesData {
            chick_arrival_date: format_date(batch.dates.chick_arrival_date),
            first_feed_transition_date: format_date(batch.dates.first_feed_transition_date),
            second_feed_transition_date: format_date(batch.dates.second_feed_transition_date),
            first_pasture_move_date: format_date(batch.dates.first_pasture_move_date),
        },
        current_bird_count: batch.current_bird_count,
        initial_bird_count: batch.initial_bird_count,
        age_in_days: age,
        current_feed_type: feed_type_for_age(age, &batch.breed).to_string(),
        total_mortality: stats.total_mortality,
        mortality_rate: stats.mortality_rate,
        average_daily_feed_lbs: stats.average_daily_feed_lbs,
    })
}

pub fn update_batch_status(
    state: &AppState,
    batch_id: String,
    status: String,
    today: String,
) -> Result<BatchSummaryData, String> {
    let next = BatchStatus::parse(&status).ok_or_else(|| format!("unknown status: {}", status))?;
    let today = parse_date(&today)?;

    let mut store = state.store.lock().unwrap();
    let batch = store
        .update_status(&batch_id, next)
        .map_err(|e| e.to_string())?;
    Ok(batch_summary(batch, today))
}

pub fn check_pasture_move(
    state: &AppState,
    batch_id: String,
    date: String,
    temperature_f: f64,
    is_raining: bool,
) -> Result<PastureCheckData, String> {
    let date = parse_date(&date)?;
    let store = state.store.lock().unwrap();
    let batch = store
        .batch(&batch_id)
        .ok_or_else(|| format!("batch not found: {}", batch_id))?;

    let weather = WeatherConditions {
        temperature_f,
        is_raining,
    };
    let check = can_move_to_pasture(date, batch.dates.chick_arrival_date, &weather);
    Ok(PastureCheckData {
        can_move: check.can_move,
        reason: check.reason,
    })
}

pub(crate) fn batch_summary(batch: &Batch, today: chrono::NaiveDate) -> BatchSummaryData {
    BatchSummaryData {
        id: batch.id.clone(),
        breed: batch.breed.clone(),
        status: batch.status.to_string(),
        processing_date: format_date(batch.processing_date),
        chick_arrival_date: format_date(batch.dates.chick_arrival_date),
        current_bird_count: batch.current_bird_count,
        initial_bird_count: batch.initial_bird_count,
        age_in_days: batch.age_in_days(today),
    }
}
