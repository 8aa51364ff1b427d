use flock::types::{Batch, WeatherCondition, WeatherRecord};

use crate::commands::{parse_count, parse_date, parse_pounds};
use crate::state::{AppState, RecordResultData};

pub fn record_mortality(
    state: &AppState,
    batch_id: String,
    date: String,
    count: String,
    notes: String,
) -> Result<RecordResultData, String> {
    let date = parse_date(&date)?;
    let deaths = parse_count(&count).map_err(|_| "Please enter a valid number of birds".to_string())?;

    let mut store = state.store.lock().unwrap();
    let batch = store
        .record_mortality(&batch_id, date, deaths, notes.trim())
        .map_err(|e| e.to_string())?;
    Ok(record_result(batch))
}

pub fn record_feed(
    state: &AppState,
    batch_id: String,
    date: String,
    pounds: String,
    notes: String,
) -> Result<RecordResultData, String> {
    let date = parse_date(&date)?;
    let pounds = parse_pounds(&pounds)?;

    let mut store = state.store.lock().unwrap();
    let batch = store
        .record_feed(&batch_id, date, pounds, notes.trim())
        .map_err(|e| e.to_string())?;
    Ok(record_result(batch))
}

pub fn record_weight(
    state: &AppState,
    batch_id: String,
    date: String,
    weight_lbs: String,
    sample_size: String,
    notes: String,
) -> Result<RecordResultData, String> {
    let date = parse_date(&date)?;
    let weight = parse_pounds(&weight_lbs)?;
    let sample_size =
        parse_count(&sample_size).map_err(|_| "Please enter a valid sample size".to_string())?;

    let mut store = state.store.lock().unwrap();
    let batch = store
        .record_weight(&batch_id, date, weight, sample_size, notes.trim())
        .map_err(|e| e.to_string())?;
    Ok(record_result(batch))
}

pub fn record_weather(
    state: &AppState,
    batch_id: String,
    date: String,
    temperature_f: f64,
    conditions: String,
    rainfall_in: Option<f64>,
) -> Result<RecordResultData, String> {
    let date = parse_date(&date)?;
    let conditions = WeatherCondition::parse(&conditions)
        .ok_or_else(|| format!("unknown weather conditions: {}", conditions))?;

    let mut store = state.store.lock().unwrap();
    let batch = store
        .record_weather(
            &batch_id,
            date,
            WeatherRecord {
                temperature_f,
                conditions,
                rainfall_in,
            },
        )
        .map_err(|e| e.to_string())?;
    Ok(record_result(batch))
}

pub fn record_pasture_move(
    state: &AppState,
    batch_id: String,
    date: String,
    from_location: String,
    to_location: String,
) -> Result<RecordResultData, String> {
    let date = parse_date(&date)?;

    let mut store = state.store.lock().unwrap();
    let batch = store
        .record_pasture_move(&batch_id, date, from_location.trim(), to_location.trim())
        .map_err(|e| e.to_string())?;
    Ok(record_result(batch))
}

fn record_result(batch: &Batch) -> RecordResultData {
    RecordResultData {
        batch_id: batch.id.clone(),
        record_count: batch.daily_records.len() as u32,
        current_bird_count: batch.current_bird_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::batches::create_batch;

    fn state_with_batch() -> (AppState, String) {
        let state = AppState::new();
        let id = create_batch(&state, "2025-04-01".into(), "Cornish Cross".into(), "100".into())
            .unwrap()
            .id;
        (state, id)
    }

    #[test]
    fn test_record_mortality_updates_count() {
        let (state, id) = state_with_batch();
        let result = record_mortality(
            &state,
            id,
            "2025-02-10".into(),
            "3".into(),
            "found by waterer".into(),
        )
        .unwrap();
        assert_eq!(result.current_bird_count, 97);
        assert_eq!(result.record_count, 1);
    }

    #[test]
    fn test_same_day_events_share_one_record() {
        let (state, id) = state_with_batch();

        record_mortality(&state, id.clone(), "2025-02-10".into(), "2".into(), "".into()).unwrap();
        record_feed(&state, id.clone(), "2025-02-10".into(), "18.5".into(), "".into()).unwrap();
        let result = record_weight(
            &state,
            id,
            "2025-02-10".into(),
            "1.2".into(),
            "10".into(),
            "".into(),
        )
        .unwrap();

        assert_eq!(result.record_count, 1);
        assert_eq!(result.current_bird_count, 98);
    }

    #[test]
    fn test_record_rejects_bad_input() {
        let (state, id) = state_with_batch();

        assert!(record_mortality(&state, id.clone(), "2025-02-10".into(), "two".into(), "".into())
            .is_err());
        assert!(record_feed(&state, id.clone(), "2025-02-10".into(), "-5".into(), "".into()).is_err());
        assert!(record_weight(
            &state,
            id.clone(),
            "2025-02-10".into(),
            "1.2".into(),
            "0".into(),
            "".into()
        )
        .is_err());
        assert!(record_feed(&state, id, "someday".into(), "5".into(), "".into()).is_err());
    }

    #[test]
    fn test_record_weather() {
        let (state, id) = state_with_batch();

        let result = record_weather(
            &state,
            id.clone(),
            "2025-02-10".into(),
            42.0,
            "rainy".into(),
            Some(0.3),
        )
        .unwrap();
        assert_eq!(result.record_count, 1);

        let err = record_weather(&state, id, "2025-02-10".into(), 42.0, "hail".into(), None)
            .unwrap_err();
        assert!(err.contains("unknown weather conditions"));
    }

    #[test]
    fn test_record_against_unknown_batch() {
        let state = AppState::new();
        let err = record_feed(
            &state,
            "20990101-CC".into(),
            "2025-02-10".into(),
            "5".into(),
            "".into(),
        )
        .unwrap_err();
        assert!(err.contains("batch not found"));
    }
}
