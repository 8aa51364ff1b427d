//! FlockStore - in-memory state container
//!
//! Owns every batch and the farm profile. Each mutation builds an updated
//! batch value and swaps it into the list, so a half-applied event is
//! never observable. State lives for the process and is gone on restart.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{debug, info};

use crate::lifecycle::{calculate_batch_dates, generate_batch_id};
use crate::types::{
    Batch, BatchStatus, DailyRecord, FarmInfo, FeedTransition, FeedType, PastureMovement,
    WeatherRecord, WeightSample,
};

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("batch not found: {0}")]
    BatchNotFound(String),

    #[error("batch already exists: {0}")]
    DuplicateBatch(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid status transition: {from} -> {to}")]
    InvalidTransition { from: BatchStatus, to: BatchStatus },
}

/// The one shared resource of the application: the batch list plus the
/// farm profile. Record ids come from a store-owned counter.
#[derive(Debug, Default)]
pub struct FlockStore {
    batches: Vec<Batch>,
    farm_info: Option<FarmInfo>,
    next_record_id: u64,
}

impl FlockStore {
    pub fn new() -> Self {
        Self {
            batches: Vec::new(),
            farm_info: None,
            next_record_id: 1,
        }
    }

    // ========================================================================
    // Batch creation & status
    // ========================================================================

    /// Create a batch planned for the given processing date. Derived dates
    /// come from the breed config; the two feed transitions are seeded on
    /// their scheduled dates.
    pub fn create_batch(
        &mut self,
        processing_date: NaiveDate,
        breed: &str,
        bird_count: u32,
    ) -> Result<&Batch, StoreError> {
        if breed.trim().is_empty() {
            return Err(StoreError::InvalidInput("breed must not be empty".to_string()));
        }
        if bird_count == 0 {
            return Err(StoreError::InvalidInput(
                "bird count must be greater than zero".to_string(),
            ));
        }

        let id = generate_batch_id(processing_date, breed);
        if self.batches.iter().any(|b| b.id == id) {
            return Err(StoreError::DuplicateBatch(id));
        }

        let dates = calculate_batch_dates(processing_date, breed);
        let batch = Batch {
            id: id.clone(),
            breed: breed.to_string(),
            processing_date,
            dates,
            status: BatchStatus::Planned,
            current_bird_count: bird_count,
            initial_bird_count: bird_count,
            daily_records: Vec::new(),
            feed_transitions: vec![
                FeedTransition {
                    date: dates.first_feed_transition_date,
                    from_feed_type: FeedType::Starter,
                    to_feed_type: FeedType::Grower,
                },
                FeedTransition {
                    date: dates.second_feed_transition_date,
                    from_feed_type: FeedType::Grower,
                    to_feed_type: FeedType::Finisher,
                },
            ],
            pasture_movements: Vec::new(),
        };

        info!(batch_id = %id, breed, bird_count, "created batch");
        let idx = self.batches.len();
        self.batches.push(batch);
        Ok(&self.batches[idx])
    }

    /// Move a batch to a new status, enforcing the transition table.
    pub fn update_status(&mut self, batch_id: &str, next: BatchStatus) -> Result<&Batch, StoreError> {
        let idx = self.find_index(batch_id)?;
        let from = self.batches[idx].status;

        if !from.can_transition_to(next) {
            return Err(StoreError::InvalidTransition { from, to: next });
        }

        let mut updated = self.batches[idx].clone();
        updated.status = next;
        self.batches[idx] = updated;

        info!(batch_id, %from, to = %next, "batch status changed");
        Ok(&self.batches[idx])
    }

    // ========================================================================
    // Event recording
    // ========================================================================

    /// Record bird deaths for a day. Merges into that day's record if one
    /// exists and decrements the current bird count. Deaths beyond the
    /// current count are rejected, keeping the count nonnegative.
    pub fn record_mortality(
        &mut self,
        batch_id: &str,
        date: NaiveDate,
        deaths: u32,
        notes: &str,
    ) -> Result<&Batch, StoreError> {
        if deaths == 0 {
            return Err(StoreError::InvalidInput(
                "mortality count must be greater than zero".to_string(),
            ));
        }

        let idx = self.find_index(batch_id)?;
        if deaths > self.batches[idx].current_bird_count {
            return Err(StoreError::InvalidInput(format!(
                "mortality of {} exceeds current bird count of {}",
                deaths, self.batches[idx].current_bird_count
            )));
        }

        let mut updated = self.batches[idx].clone();
        let record_id = self.take_record_id(&updated, date);
        let record = day_record_mut(&mut updated, date, record_id);
        record.mortality += deaths;
        append_notes(&mut record.notes, "Mortality", notes);
        updated.current_bird_count -= deaths;
        self.batches[idx] = updated;

        debug!(batch_id, %date, deaths, "recorded mortality");
        Ok(&self.batches[idx])
    }

    /// Record feed consumed on a day. Same-day amounts accumulate.
    pub fn record_feed(
        &mut self,
        batch_id: &str,
        date: NaiveDate,
        pounds: f64,
        notes: &str,
    ) -> Result<&Batch, StoreError> {
        if !pounds.is_finite() || pounds <= 0.0 {
            return Err(StoreError::InvalidInput(
                "feed amount must be a positive number of pounds".to_string(),
            ));
        }

        let idx = self.find_index(batch_id)?;
        let mut updated = self.batches[idx].clone();
        let record_id = self.take_record_id(&updated, date);
        let record = day_record_mut(&mut updated, date, record_id);
        record.feed_consumed_lbs += pounds;
        append_notes(&mut record.notes, "Feed", notes);
        self.batches[idx] = updated;

        debug!(batch_id, %date, pounds, "recorded feed");
        Ok(&self.batches[idx])
    }

    /// Record a weight sample for a day. Same-day samples append to the
    /// existing record.
    pub fn record_weight(
        &mut self,
        batch_id: &str,
        date: NaiveDate,
        weight_lbs: f64,
        sample_size: u32,
        notes: &str,
    ) -> Result<&Batch, StoreError> {
        if !weight_lbs.is_finite() || weight_lbs <= 0.0 {
            return Err(StoreError::InvalidInput(
                "sample weight must be a positive number of pounds".to_string(),
            ));
        }
        if sample_size == 0 {
            return Err(StoreError::InvalidInput(
                "sample size must be greater than zero".to_string(),
            ));
        }

        let idx = self.find_index(batch_id)?;
        let mut updated = self.batches[idx].clone();

        let record_id = self.take_record_id(&updated, date);
        let sample = WeightSample {
            id: self.take_id(),
            date,
            weight_lbs,
            sample_size,
            notes: notes.to_string(),
        };
        let record = day_record_mut(&mut updated, date, record_id);
        record.weight_samples.push(sample);
        self.batches[idx] = updated;

        debug!(batch_id, %date, weight_lbs, sample_size, "recorded weight sample");
        Ok(&self.batches[idx])
    }

    /// Attach a weather observation to a day's record. A later observation
    /// for the same day replaces the earlier one.
    pub fn record_weather(
        &mut self,
        batch_id: &str,
        date: NaiveDate,
        weather: WeatherRecord,
    ) -> Result<&Batch, StoreError> {
        if !weather.temperature_f.is_finite() {
            return Err(StoreError::InvalidInput(
                "temperature must be a number".to_string(),
            ));
        }

        let idx = self.find_index(batch_id)?;
        let mut updated = self.batches[idx].clone();
        let record_id = self.take_record_id(&updated, date);
        let record = day_record_mut(&mut updated, date, record_id);
        record.weather = Some(weather);
        self.batches[idx] = updated;

        debug!(batch_id, %date, "recorded weather");
        Ok(&self.batches[idx])
    }

    /// Log a movement between pastures.
    pub fn record_pasture_move(
        &mut self,
        batch_id: &str,
        date: NaiveDate,
        from_location: &str,
        to_location: &str,
    ) -> Result<&Batch, StoreError> {
        if to_location.trim().is_empty() {
            return Err(StoreError::InvalidInput(
                "destination pasture must not be empty".to_string(),
            ));
        }

        let idx = self.find_index(batch_id)?;
        let mut updated = self.batches[idx].clone();
        updated.pasture_movements.push(PastureMovement {
            date,
            from_location: from_location.to_string(),
            to_location: to_location.to_string(),
        });
        self.batches[idx] = updated;

        debug!(batch_id, %date, to_location, "recorded pasture move");
        Ok(&self.batches[idx])
    }

    // ========================================================================
    // Farm profile
    // ========================================================================

    pub fn set_farm_info(&mut self, info: FarmInfo) -> Result<(), StoreError> {
        if info.farm_name.trim().is_empty() {
            return Err(StoreError::InvalidInput("farm name must not be empty".to_string()));
        }
        if !info.address.is_valid() {
            return Err(StoreError::InvalidInput("address is not valid".to_string()));
        }
        self.farm_info = Some(info);
        Ok(())
    }

    pub fn farm_info(&self) -> Option<&FarmInfo> {
        self.farm_info.as_ref()
    }

    // ========================================================================
    // Reads
    // ========================================================================

    pub fn batch(&self, batch_id: &str) -> Option<&Batch> {
        self.batches.iter().find(|b| b.id == batch_id)
    }

    pub fn batches(&self) -> &[Batch] {
        &self.batches
    }

    pub fn batch_count(&self) -> usize {
        self.batches.len()
    }

    fn find_index(&self, batch_id: &str) -> Result<usize, StoreError> {
        self.batches
            .iter()
            .position(|b| b.id == batch_id)
            .ok_or_else(|| StoreError::BatchNotFound(batch_id.to_string()))
    }

    fn take_id(&mut self) -> u64 {
        let id = self.next_record_id;
        self.next_record_id += 1;
        id
    }

    /// Id of the day's existing record, or a fresh one if the day has no
    /// record yet.
    fn take_record_id(&mut self, batch: &Batch, date: NaiveDate) -> u64 {
        match batch.daily_records.iter().find(|r| r.date == date) {
            Some(record) => record.id,
            None => self.take_id(),
        }
    }
}

/// The day's record, creating an empty one (with the supplied id) if the
/// day has none yet.
fn day_record_mut(batch: &mut Batch, date: NaiveDate, new_id: u64) -> &mut DailyRecord {
    let pos = batch.daily_records.iter().position(|r| r.date == date);
    match pos {
        Some(i) => &mut batch.daily_records[i],
        None => {
            batch.daily_records.push(DailyRecord::empty(new_id, date));
            let last = batch.daily_records.len() - 1;
            &mut batch.daily_records[last]
        }
    }
}

/// Merge event notes into a record, prefixed with the event label when
/// joining an existing note.
fn append_notes(existing: &mut String, label: &str, notes: &str) {
    if notes.is_empty() {
        return;
    }
    if existing.is_empty() {
        existing.push_str(notes);
    } else {
        existing.push_str(&format!("\n{}: {}", label, notes));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn store_with_batch() -> (FlockStore, String) {
        let mut store = FlockStore::new();
        let id = store
            .create_batch(date(2025, 4, 1), "Cornish Cross", 100)
            .unwrap()
            .id
            .clone();
        (store, id)
    }

    #[test]
    fn test_create_batch_defaults() {
        let (store, id) = store_with_batch();
        let batch = store.batch(&id).unwrap();

        assert_eq!(batch.id, "20250401-CC");
        assert_eq!(batch.status, BatchStatus::Planned);
        assert_eq!(batch.initial_bird_count, 100);
        assert_eq!(batch.current_bird_count, 100);
        assert!(batch.daily_records.is_empty());
        assert!(batch.pasture_movements.is_empty());

        // Seeded feed transitions on their scheduled dates
        assert_eq!(batch.feed_transitions.len(), 2);
        assert_eq!(batch.feed_transitions[0].date, batch.dates.first_feed_transition_date);
        assert_eq!(batch.feed_transitions[0].to_feed_type, FeedType::Grower);
        assert_eq!(batch.feed_transitions[1].to_feed_type, FeedType::Finisher);
    }

    #[test]
    fn test_create_batch_rejects_bad_input() {
        let mut store = FlockStore::new();
        assert!(matches!(
            store.create_batch(date(2025, 4, 1), "Cornish Cross", 0),
            Err(StoreError::InvalidInput(_))
        ));
        assert!(matches!(
            store.create_batch(date(2025, 4, 1), "  ", 10),
            Err(StoreError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_create_batch_rejects_duplicate_id() {
        let (mut store, _) = store_with_batch();
        let err = store
            .create_batch(date(2025, 4, 1), "Cornish Cross", 50)
            .unwrap_err();
        assert_eq!(err, StoreError::DuplicateBatch("20250401-CC".to_string()));
        assert_eq!(store.batch_count(), 1);
    }

    #[test]
    fn test_record_mortality_decrements_count() {
        let (mut store, id) = store_with_batch();
        let day = date(2025, 2, 10);

        store.record_mortality(&id, day, 3, "found by waterer").unwrap();
        let batch = store.batch(&id).unwrap();
        assert_eq!(batch.current_bird_count, 97);
        assert_eq!(batch.daily_records.len(), 1);
        assert_eq!(batch.daily_records[0].mortality, 3);
        assert_eq!(batch.daily_records[0].notes, "found by waterer");
    }

    #[test]
    fn test_record_mortality_merges_same_day() {
        let (mut store, id) = store_with_batch();
        let day = date(2025, 2, 10);

        store.record_mortality(&id, day, 2, "morning").unwrap();
        store.record_mortality(&id, day, 1, "evening").unwrap();

        let batch = store.batch(&id).unwrap();
        assert_eq!(batch.daily_records.len(), 1);
        assert_eq!(batch.daily_records[0].mortality, 3);
        assert_eq!(batch.daily_records[0].notes, "morning\nMortality: evening");
        assert_eq!(batch.current_bird_count, 97);
    }

    #[test]
    fn test_record_mortality_rejects_overdraw() {
        let (mut store, id) = store_with_batch();
        let err = store
            .record_mortality(&id, date(2025, 2, 10), 101, "")
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidInput(_)));
        // Nothing was applied
        let batch = store.batch(&id).unwrap();
        assert_eq!(batch.current_bird_count, 100);
        assert!(batch.daily_records.is_empty());
    }

    #[test]
    fn test_record_mortality_rejects_zero() {
        let (mut store, id) = store_with_batch();
        assert!(store.record_mortality(&id, date(2025, 2, 10), 0, "").is_err());
    }

    #[test]
    fn test_record_feed_accumulates_same_day() {
        let (mut store, id) = store_with_batch();
        let day = date(2025, 2, 10);

        store.record_feed(&id, day, 20.0, "").unwrap();
        store.record_feed(&id, day, 15.5, "second scoop").unwrap();

        let batch = store.batch(&id).unwrap();
        assert_eq!(batch.daily_records.len(), 1);
        assert_eq!(batch.daily_records[0].feed_consumed_lbs, 35.5);
        assert_eq!(batch.daily_records[0].notes, "second scoop");
        // Feed never touches the bird count
        assert_eq!(batch.current_bird_count, 100);
    }

    #[test]
    fn test_record_feed_separate_days() {
        let (mut store, id) = store_with_batch();
        let day = date(2025, 2, 10);

        store.record_feed(&id, day, 20.0, "").unwrap();
        store.record_feed(&id, day + Duration::days(1), 22.0, "").unwrap();

        let batch = store.batch(&id).unwrap();
        assert_eq!(batch.daily_records.len(), 2);
        assert_eq!(batch.daily_records[0].feed_consumed_lbs, 20.0);
        assert_eq!(batch.daily_records[1].feed_consumed_lbs, 22.0);
    }

    #[test]
    fn test_record_feed_rejects_nonpositive() {
        let (mut store, id) = store_with_batch();
        assert!(store.record_feed(&id, date(2025, 2, 10), 0.0, "").is_err());
        assert!(store.record_feed(&id, date(2025, 2, 10), -5.0, "").is_err());
        assert!(store.record_feed(&id, date(2025, 2, 10), f64::NAN, "").is_err());
    }

    #[test]
    fn test_record_weight_appends_samples_same_day() {
        let (mut store, id) = store_with_batch();
        let day = date(2025, 2, 20);

        store.record_weight(&id, day, 2.5, 10, "").unwrap();
        store.record_weight(&id, day, 2.8, 8, "afternoon").unwrap();

        let batch = store.batch(&id).unwrap();
        assert_eq!(batch.daily_records.len(), 1);
        let samples = &batch.daily_records[0].weight_samples;
        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].weight_lbs, 2.5);
        assert_eq!(samples[0].sample_size, 10);
        assert_eq!(samples[1].weight_lbs, 2.8);
        assert_eq!(samples[1].notes, "afternoon");
    }

    #[test]
    fn test_record_ids_unique() {
        let (mut store, id) = store_with_batch();
        let day = date(2025, 2, 20);

        store.record_feed(&id, day, 10.0, "").unwrap();
        store.record_weight(&id, day, 2.5, 10, "").unwrap();
        store
            .record_weight(&id, day + Duration::days(1), 2.7, 10, "")
            .unwrap();

        let batch = store.batch(&id).unwrap();
        let mut ids: Vec<u64> = batch.daily_records.iter().map(|r| r.id).collect();
        ids.extend(
            batch
                .daily_records
                .iter()
                .flat_map(|r| r.weight_samples.iter().map(|s| s.id)),
        );
        let total = ids.len();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn test_record_weather_merges_and_replaces() {
        let (mut store, id) = store_with_batch();
        let day = date(2025, 2, 10);

        store.record_feed(&id, day, 20.0, "").unwrap();
        store
            .record_weather(
                &id,
                day,
                WeatherRecord {
                    temperature_f: 38.0,
                    conditions: crate::types::WeatherCondition::Cloudy,
                    rainfall_in: None,
                },
            )
            .unwrap();
        store
            .record_weather(
                &id,
                day,
                WeatherRecord {
                    temperature_f: 42.0,
                    conditions: crate::types::WeatherCondition::Rainy,
                    rainfall_in: Some(0.3),
                },
            )
            .unwrap();

        let batch = store.batch(&id).unwrap();
        // Shares the feed record rather than opening a second one
        assert_eq!(batch.daily_records.len(), 1);
        let record = batch.daily_record_for(day).unwrap();
        assert_eq!(record.feed_consumed_lbs, 20.0);
        let weather = record.weather.as_ref().unwrap();
        assert_eq!(weather.temperature_f, 42.0);
        assert_eq!(weather.rainfall_in, Some(0.3));
    }

    #[test]
    fn test_record_against_missing_batch() {
        let mut store = FlockStore::new();
        let err = store
            .record_feed("20990101-CC", date(2025, 2, 10), 5.0, "")
            .unwrap_err();
        assert_eq!(err, StoreError::BatchNotFound("20990101-CC".to_string()));
    }

    #[test]
    fn test_record_pasture_move() {
        let (mut store, id) = store_with_batch();
        store
            .record_pasture_move(&id, date(2025, 2, 26), "Brooder", "North pasture")
            .unwrap();

        let batch = store.batch(&id).unwrap();
        assert_eq!(batch.pasture_movements.len(), 1);
        assert_eq!(batch.pasture_movements[0].to_location, "North pasture");

        assert!(store
            .record_pasture_move(&id, date(2025, 2, 27), "North pasture", " ")
            .is_err());
    }

    #[test]
    fn test_update_status_transitions() {
        let (mut store, id) = store_with_batch();

        store.update_status(&id, BatchStatus::Active).unwrap();
        assert_eq!(store.batch(&id).unwrap().status, BatchStatus::Active);

        store.update_status(&id, BatchStatus::Completed).unwrap();
        assert_eq!(store.batch(&id).unwrap().status, BatchStatus::Completed);

        // Terminal
        let err = store.update_status(&id, BatchStatus::Active).unwrap_err();
        assert_eq!(
            err,
            StoreError::InvalidTransition {
                from: BatchStatus::Completed,
                to: BatchStatus::Active,
            }
        );
    }

    #[test]
    fn test_set_farm_info_validates_address() {
        let mut store = FlockStore::new();
        let info = FarmInfo {
            first_name: "Jo".to_string(),
            last_name: "Harper".to_string(),
            farm_name: "Hilltop Pastures".to_string(),
            address: crate::types::Address {
                street1: "100 Farm Rd".to_string(),
                street2: None,
                city: "Springfield".to_string(),
                state: "VT".to_string(),
                zip_code: "05156".to_string(),
            },
        };
        store.set_farm_info(info.clone()).unwrap();
        assert_eq!(store.farm_info(), Some(&info));

        let mut bad = info;
        bad.address.zip_code = "051".to_string();
        assert!(store.set_farm_info(bad).is_err());
    }
}
